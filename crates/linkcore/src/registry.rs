use std::sync::Arc;

use tokio::sync::RwLock;

use crate::endpoint::Endpoint;
use crate::entry::{ConnState, ConnectionEntry};

/// The total, fixed-membership mapping from endpoint to
/// [`ConnectionEntry`], one entry per configured endpoint. The "live set"
/// — what the routing strategy sees — is the subset with `state == Open`,
/// recomputed lazily on each call rather than cached.
pub struct Registry<C> {
    entries: Vec<Arc<RwLock<ConnectionEntry<C>>>>,
}

impl<C> Registry<C> {
    pub fn new(endpoints: impl IntoIterator<Item = Endpoint>) -> Self {
        let entries = endpoints
            .into_iter()
            .map(|endpoint| Arc::new(RwLock::new(ConnectionEntry::new(endpoint))))
            .collect();
        Self { entries }
    }

    /// All entries, in configuration order, one per configured endpoint
    /// (including duplicate endpoints, each with its own driver).
    pub fn entries(&self) -> &[Arc<RwLock<ConnectionEntry<C>>>] {
        &self.entries
    }

    /// The connections whose entry is currently `Open`.
    pub async fn live_set(&self) -> Vec<Arc<C>> {
        let mut live = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            let guard = entry.read().await;
            if guard.state == ConnState::Open {
                if let Some(connection) = &guard.connection {
                    live.push(Arc::clone(connection));
                }
            }
        }
        live
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
