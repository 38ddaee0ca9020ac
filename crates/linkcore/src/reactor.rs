use std::time::Duration;

use async_trait::async_trait;

use crate::error::{ConnectError, ConnectionError};

/// The outcome of awaiting [`IoReactor::schedule_timer`].
///
/// A reactor stop must resolve any outstanding timer rather than leave it
/// pending forever; `Cancelled` is how the driver tells a stop-induced wake
/// apart from a natural elapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerOutcome {
    Elapsed,
    Cancelled,
}

/// The external I/O reactor contract this crate consumes.
///
/// This is supplied from outside: socket polling, timer firing, and DNS
/// are the reactor's business, not this crate's. Every operation is a
/// deferred completion (an `async fn` here); a real implementation would
/// sit on top of an actual event loop (tokio's, an embedded one, whatever
/// the embedding application already runs).
#[async_trait]
pub trait IoReactor: Send + Sync + 'static {
    /// The raw, byte-level connection type this reactor produces from
    /// `connect`. Opaque to this crate — it's handed straight to
    /// [`ClientHooks::create_connection`](crate::hooks::ClientHooks::create_connection).
    type RawConnection: Send + 'static;

    /// Whether the reactor is currently running.
    async fn is_running(&self) -> bool;

    /// Start the reactor. Idempotent; resolves once running.
    async fn start(&self) -> Result<(), ConnectionError>;

    /// Stop the reactor. Idempotent; resolves once not running.
    async fn stop(&self) -> Result<(), ConnectionError>;

    /// Open a raw connection to `host:port`, bounded by `timeout`.
    async fn connect(
        &self,
        host: &str,
        port: u16,
        timeout: Duration,
    ) -> Result<Self::RawConnection, ConnectError>;

    /// Resolve after `delay`, or immediately with [`TimerOutcome::Cancelled`]
    /// if the reactor stops while the timer is outstanding.
    async fn schedule_timer(&self, delay: Duration) -> TimerOutcome;
}
