//! Configuration management for the Firebase MCP agent
//!
//! Handles the MCP endpoint, timeouts and the agent profile. Read once at startup.

use std::time::Duration;

use reqwest::Url;
use validator::Validate;

use crate::error::{BridgeError, ConfigError, Result};

/// Configuration for the Firebase MCP bridge
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Firebase MCP server (discovery and tool calls)
    pub endpoint: Url,

    /// Timeout applied to every tool call
    pub request_timeout: Duration,

    /// Timeout applied to the availability probe
    pub probe_timeout: Duration,

    /// Agent profile (name, model settings, system prompt)
    pub profile: AgentProfile,
}

impl Config {
    /// Create a configuration for the given endpoint with default timeouts and profile
    pub fn new(endpoint: &str) -> Result<Self> {
        Ok(Self {
            endpoint: parse_endpoint(endpoint)?,
            request_timeout: Duration::from_secs(defaults::REQUEST_TIMEOUT_SECS),
            probe_timeout: Duration::from_secs(defaults::PROBE_TIMEOUT_SECS),
            profile: AgentProfile::default(),
        })
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = lookup(env::MCP_URL).unwrap_or_else(|| defaults::MCP_URL.to_string());
        let mut config = Self::new(&endpoint)?;

        if let Some(secs) = parse_var::<u64>(&lookup, env::TIMEOUT_SECS)? {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_var::<u64>(&lookup, env::PROBE_TIMEOUT_SECS)? {
            config.probe_timeout = Duration::from_secs(secs);
        }

        if let Some(model) = lookup(env::AGENT_MODEL) {
            config.profile.model = model;
        }
        if let Some(temperature) = parse_var::<f64>(&lookup, env::AGENT_TEMPERATURE)? {
            config.profile.temperature = temperature;
        }
        if let Some(max_tokens) = parse_var::<u32>(&lookup, env::AGENT_MAX_TOKENS)? {
            config.profile.max_tokens = max_tokens;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check timeouts and the agent profile
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout.is_zero() || self.probe_timeout.is_zero() {
            return Err(invalid("timeouts must be greater than zero"));
        }
        self.profile.check()
    }
}

/// Settings describing the Firebase agent
#[derive(Debug, Clone, Validate)]
pub struct AgentProfile {
    /// Display name
    #[validate(length(min = 1))]
    pub name: String,

    /// Model identifier handed to the hosting framework
    #[validate(length(min = 1))]
    pub model: String,

    /// Sampling temperature
    #[validate(range(min = 0.0, max = 2.0))]
    pub temperature: f64,

    /// Response token limit
    #[validate(range(min = 1))]
    pub max_tokens: u32,

    /// System prompt placed at the head of every conversation
    pub system_prompt: String,
}

impl AgentProfile {
    /// Validate the profile, reporting failures as configuration errors
    pub fn check(&self) -> Result<()> {
        self.validate()
            .map_err(|e| invalid(format!("invalid agent profile: {}", e)))
    }
}

impl Default for AgentProfile {
    fn default() -> Self {
        Self {
            name: defaults::AGENT_NAME.to_string(),
            model: defaults::AGENT_MODEL.to_string(),
            temperature: defaults::AGENT_TEMPERATURE,
            max_tokens: defaults::AGENT_MAX_TOKENS,
            system_prompt: defaults::SYSTEM_PROMPT.to_string(),
        }
    }
}

fn parse_endpoint(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| {
        BridgeError::Config(ConfigError::InvalidEndpoint {
            url: raw.to_string(),
            message: e.to_string(),
        })
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(BridgeError::Config(ConfigError::InvalidEndpoint {
            url: raw.to_string(),
            message: format!("unsupported scheme '{}'", scheme),
        })),
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, var: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| invalid(format!("{}={:?}: {}", var, raw, e))),
    }
}

fn invalid(message: impl Into<String>) -> BridgeError {
    BridgeError::Config(ConfigError::InvalidConfig {
        message: message.into(),
    })
}

/// Environment variable names
pub mod env {
    pub const MCP_URL: &str = "FIREBASE_MCP_URL";
    pub const TIMEOUT_SECS: &str = "FIREBASE_MCP_TIMEOUT_SECS";
    pub const PROBE_TIMEOUT_SECS: &str = "FIREBASE_MCP_PROBE_TIMEOUT_SECS";
    pub const AGENT_MODEL: &str = "FIREBASE_AGENT_MODEL";
    pub const AGENT_TEMPERATURE: &str = "FIREBASE_AGENT_TEMPERATURE";
    pub const AGENT_MAX_TOKENS: &str = "FIREBASE_AGENT_MAX_TOKENS";
}

/// Default values
pub mod defaults {
    /// Local Firebase MCP server on port 8001
    pub const MCP_URL: &str = "http://127.0.0.1:8001/mcp/";

    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
    pub const PROBE_TIMEOUT_SECS: u64 = 5;

    pub const AGENT_NAME: &str = "Firebase Agent";
    pub const AGENT_MODEL: &str = "gpt-4o-mini";
    pub const AGENT_TEMPERATURE: f64 = 0.0;
    pub const AGENT_MAX_TOKENS: u32 = 1000;

    pub const SYSTEM_PROMPT: &str = "You are the Firebase Agent. You manage Firebase \
        Authentication, Firestore and Cloud Storage through the tools you are given. \
        Report tool errors to the user as they are returned.";
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.endpoint.as_str(), defaults::MCP_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.probe_timeout, Duration::from_secs(5));
        assert_eq!(config.profile.name, "Firebase Agent");
        assert!(config.profile.system_prompt.contains("Firebase Agent"));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            (env::MCP_URL, "https://mcp.example.com/mcp/"),
            (env::TIMEOUT_SECS, "12"),
            (env::PROBE_TIMEOUT_SECS, "2"),
            (env::AGENT_MODEL, "gpt-4o"),
            (env::AGENT_TEMPERATURE, "0.7"),
            (env::AGENT_MAX_TOKENS, "2048"),
        ]))
        .unwrap();

        assert_eq!(config.endpoint.host_str(), Some("mcp.example.com"));
        assert_eq!(config.request_timeout, Duration::from_secs(12));
        assert_eq!(config.probe_timeout, Duration::from_secs(2));
        assert_eq!(config.profile.model, "gpt-4o");
        assert_eq!(config.profile.max_tokens, 2048);
    }

    #[test]
    fn test_invalid_endpoint() {
        let err = Config::new("not a url").unwrap_err();
        assert!(matches!(
            err,
            BridgeError::Config(ConfigError::InvalidEndpoint { .. })
        ));

        let err = Config::new("ftp://127.0.0.1/mcp/").unwrap_err();
        assert!(err.to_string().contains("ftp"));
    }

    #[test]
    fn test_invalid_numbers() {
        let err = Config::from_lookup(lookup_from(&[(env::TIMEOUT_SECS, "soon")])).unwrap_err();
        assert!(err.to_string().contains(env::TIMEOUT_SECS));

        let err = Config::from_lookup(lookup_from(&[(env::PROBE_TIMEOUT_SECS, "0")])).unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn test_profile_validation() {
        let mut profile = AgentProfile::default();
        assert!(profile.check().is_ok());

        profile.temperature = 3.5;
        assert!(profile.check().is_err());

        profile.temperature = 0.2;
        profile.name.clear();
        assert!(profile.check().is_err());
    }
}
