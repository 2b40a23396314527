//! Firebase MCP server availability
//!
//! The gate probes the server once and remembers the answer until
//! [`AvailabilityGate::refresh`] is called, which works through a shared
//! handle as well.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{OnceCell, RwLock};
use tracing::info;

use crate::mcp::client::RemoteToolClient;

/// How the gate decides availability
#[derive(Debug, Clone)]
enum Prober {
    /// GET the server's base path
    Remote {
        client: Arc<RemoteToolClient>,
        timeout: Duration,
    },

    /// Pre-decided answer
    Fixed(bool),
}

/// Memoized reachability flag for the Firebase MCP server
#[derive(Debug)]
pub struct AvailabilityGate {
    prober: Prober,
    flag: RwLock<Arc<OnceCell<bool>>>,
}

impl AvailabilityGate {
    /// Gate that probes through `client` with the given timeout
    pub fn new(client: Arc<RemoteToolClient>, timeout: Duration) -> Self {
        Self {
            prober: Prober::Remote { client, timeout },
            flag: RwLock::new(Arc::new(OnceCell::new())),
        }
    }

    /// Gate with a pre-decided answer; never touches the network
    pub fn fixed(available: bool) -> Self {
        Self {
            prober: Prober::Fixed(available),
            flag: RwLock::new(Arc::new(OnceCell::new_with(Some(available)))),
        }
    }

    /// Whether the server is reachable; probes on the first call only
    pub async fn is_available(&self) -> bool {
        let cell = self.flag.read().await.clone();
        *cell.get_or_init(|| self.probe()).await
    }

    /// The memoized answer, if the first probe has completed
    pub async fn cached(&self) -> Option<bool> {
        self.flag.read().await.get().copied()
    }

    /// Forget the memoized answer and probe again
    pub async fn refresh(&self) -> bool {
        *self.flag.write().await = Arc::new(OnceCell::new());
        self.is_available().await
    }

    async fn probe(&self) -> bool {
        let available = match &self.prober {
            Prober::Remote { client, timeout } => client.probe(*timeout).await,
            Prober::Fixed(available) => *available,
        };
        info!(available, "Firebase MCP availability resolved");
        available
    }
}
