use thiserror::Error;

/// Errors surfaced by the client facade itself.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// `send_request` was called while the client wasn't started, or
    /// `start`/`stop` was called out of turn.
    #[error("client is not started")]
    NotStarted,

    /// `send_request` was called with no live connections, or the routing
    /// strategy returned `None`.
    #[error("no live connection available")]
    NoLiveConnection,

    /// The reactor stopped before `start` could bring up every endpoint.
    #[error("IO reactor stopped while connecting")]
    ReactorStoppedWhileConnecting,
}

/// A single connection attempt (the reactor's `connect`, or the
/// `initialize_connection` hook) failed. Absorbed by the reconnection
/// driver and never surfaced to a caller of `start` unless the reactor
/// itself stopped.
#[derive(Debug, Error)]
#[error("connect failed: {0}")]
pub struct ConnectError(#[from] pub anyhow::Error);

/// The distinguishable error kinds a [`ProtocolConnection::send_message`](crate::connection::ProtocolConnection::send_message)
/// can fail with.
#[derive(Debug, Error)]
pub enum SendError {
    /// The connection closed out from under this in-flight request.
    /// Triggers a transparent retry against the (possibly different)
    /// live set; never surfaced directly from the first attempt.
    #[error("connection closed")]
    ConnectionClosed,

    /// Any other failure. Logged and propagated to the caller unchanged.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Error returned from [`Client::send_request`](crate::client::Client::send_request).
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error("request failed: {0}")]
    Request(#[source] anyhow::Error),
}
