//! Agent assembly
//!
//! Chooses the agent variant from the availability gate and binds it to the
//! matching tool set. The choice is made per [`AgentAssembler::build`] call
//! from the gate's memoized answer, so agents built from one assembler share
//! a variant until the gate is refreshed.

use std::sync::Arc;

use tracing::info;

use crate::agent::{Agent, FallbackAgent, RemoteBackedAgent};
use crate::config::Config;
use crate::error::{BridgeError, ConfigError, Result};
use crate::mcp::availability::AvailabilityGate;
use crate::mcp::client::RemoteToolClient;
use crate::tools::{fallback_tools, remote_tools, ToolRegistry};

/// Builds Firebase agents
#[derive(Debug, Clone)]
pub struct AgentAssembler {
    config: Config,
    client: Arc<RemoteToolClient>,
    gate: Arc<AvailabilityGate>,
}

impl AgentAssembler {
    /// Assembler probing the configured endpoint
    pub fn new(config: Config) -> Result<Self> {
        let client = Arc::new(RemoteToolClient::new(&config)?);
        let gate = Arc::new(AvailabilityGate::new(client.clone(), config.probe_timeout));

        Ok(Self {
            config,
            client,
            gate,
        })
    }

    /// Assembler sharing an existing gate
    pub fn with_gate(config: Config, gate: Arc<AvailabilityGate>) -> Result<Self> {
        let client = Arc::new(RemoteToolClient::new(&config)?);

        Ok(Self {
            config,
            client,
            gate,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn client(&self) -> &Arc<RemoteToolClient> {
        &self.client
    }

    pub fn gate(&self) -> &Arc<AvailabilityGate> {
        &self.gate
    }

    /// Build an agent bound to the remote tools when the server is reachable,
    /// to the fallback tools otherwise
    pub async fn build(&self) -> Result<Arc<dyn Agent>> {
        self.config.validate()?;

        let agent: Arc<dyn Agent> = if self.gate.is_available().await {
            let tools = non_empty(remote_tools(self.client.clone()))?;
            info!(tools = tools.len(), url = %self.client.endpoint(), "Assembled remote Firebase agent");
            Arc::new(RemoteBackedAgent::new(self.config.profile.clone(), tools))
        } else {
            let tools = non_empty(fallback_tools())?;
            info!(tools = tools.len(), "Assembled fallback Firebase agent");
            Arc::new(FallbackAgent::new(self.config.profile.clone(), tools))
        };

        Ok(agent)
    }
}

fn non_empty(tools: ToolRegistry) -> Result<ToolRegistry> {
    if tools.is_empty() {
        return Err(BridgeError::Config(ConfigError::InvalidConfig {
            message: "no Firebase tools registered".to_string(),
        }));
    }
    Ok(tools)
}
