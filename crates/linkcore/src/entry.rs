use std::sync::Arc;

use crate::endpoint::Endpoint;

/// Where a [`ConnectionEntry`] sits in its lifecycle.
///
/// ```text
/// idle ──start──▶ connecting ──success──▶ open
///                     │                     │
///                     │ failure             │ close fires
///                     ▼                     ▼
///                  waiting ◀──timer────── closed
///                     │                     │
///                  (elapses)                │ clean close
///                     ▼                     ▼
///                 connecting            terminated
///                     │
///              (reactor stopped)
///                     ▼
///                 terminated
/// ```
///
/// Once `Terminated`, the entry never transitions again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnState {
    Idle,
    Connecting,
    Waiting,
    Open,
    Closed,
    Terminated,
}

/// Owned one-to-one by the client for the lifetime of the client.
///
/// Invariant: at most one `connection` per entry; `state == Open` iff
/// `connection` is present and its close listener hasn't fired yet.
pub struct ConnectionEntry<C> {
    pub endpoint: Endpoint,
    pub state: ConnState,
    /// Reset to 0 on each successful open; incremented on each connect or
    /// handshake failure while reconnecting.
    pub attempt_count: u32,
    pub connection: Option<Arc<C>>,
}

impl<C> ConnectionEntry<C> {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            state: ConnState::Idle,
            attempt_count: 0,
            connection: None,
        }
    }
}
