//! Firebase Agent CLI
//!
//! Probes the Firebase MCP server, lists the agent's tools, calls single
//! operations and runs short conversations through the Firebase node.

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::{Map, Value};

use firebase_mcp_agent::agent::AgentAssembler;
use firebase_mcp_agent::config::Config;
use firebase_mcp_agent::graph::{ConversationState, FirebaseNode, Message, Role};

/// Firebase Agent
#[derive(Parser)]
#[command(name = "firebase-agent")]
#[command(author, version, about = "Firebase Agent - a tool-calling bridge to a Firebase MCP server")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether the Firebase MCP server is reachable
    Probe,

    /// List the tools of the assembled agent
    Tools,

    /// Call one Firebase MCP operation directly
    Call {
        /// Operation name, e.g. firestore_list_collections
        operation: String,

        /// Arguments as a JSON object
        #[arg(long, default_value = "{}")]
        args: String,
    },

    /// Run one agent turn per message
    Chat {
        /// User messages, in order
        #[arg(required = true)]
        messages: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env().context("failed to load configuration")?;
    let assembler = AgentAssembler::new(config)?;

    match cli.command {
        Commands::Probe => probe(&assembler).await,
        Commands::Tools => list_tools(&assembler).await,
        Commands::Call { operation, args } => call(&assembler, &operation, &args).await,
        Commands::Chat { messages } => chat(assembler, messages).await,
    }
}

async fn probe(assembler: &AgentAssembler) -> anyhow::Result<()> {
    let endpoint = assembler.client().endpoint().clone();

    if !assembler.gate().is_available().await {
        println!("Firebase MCP server is not reachable at {}", endpoint);
        println!("Start the Firebase MCP server or set FIREBASE_MCP_URL");
        return Ok(());
    }

    println!("Firebase MCP server is running at {}", endpoint);
    match assembler.client().describe().await {
        Ok(description) => {
            println!("Server: {}", description.name);
            println!("Tools: {}", description.tools.len());
        }
        Err(e) => println!("Discovery document unavailable: {}", e),
    }
    Ok(())
}

async fn list_tools(assembler: &AgentAssembler) -> anyhow::Result<()> {
    let agent = assembler.build().await?;

    println!(
        "{} ({}, {} tools)",
        agent.profile().name,
        agent.kind(),
        agent.tools().len()
    );
    for definition in agent.tools().definitions() {
        println!(
            "- {}: {}",
            definition.name,
            definition.description.unwrap_or_default()
        );
    }
    Ok(())
}

async fn call(assembler: &AgentAssembler, operation: &str, args: &str) -> anyhow::Result<()> {
    let arguments: Map<String, Value> =
        serde_json::from_str(args).context("--args must be a JSON object")?;

    let result = assembler.client().call(operation, arguments).await;
    println!("{}", serde_json::to_string_pretty(&result.to_value())?);
    Ok(())
}

async fn chat(assembler: AgentAssembler, messages: Vec<String>) -> anyhow::Result<()> {
    let prompt = assembler.config().profile.system_prompt.clone();
    let node = FirebaseNode::new(assembler);
    let mut state = ConversationState::new(vec![Message::system(prompt)]);

    for text in messages {
        state.push_user(text);
        let seen = state.messages.len();
        state = node.step(&state).await?;

        for message in &state.messages[seen..] {
            match (message.role, &message.tool_name) {
                (Role::Tool, Some(tool)) => println!("[tool:{}] {}", tool, message.content),
                _ => println!("[{:?}] {}", message.role, message.content),
            }
        }
        println!("(signal: {})", state.signal);

        if state.is_done() {
            break;
        }
    }
    Ok(())
}
