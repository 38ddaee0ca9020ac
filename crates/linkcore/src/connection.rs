use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::error::SendError;

/// Why a [`ProtocolConnection`]'s close listener fired.
#[derive(Debug, Clone)]
pub enum CloseReason {
    /// The connection closed without error (e.g. a graceful shutdown
    /// handshake). No reconnection follows.
    Clean,
    /// The connection closed unexpectedly, carrying the cause. The owning
    /// driver restarts its backoff schedule from the top.
    Unexpected(String),
}

/// The wrapped, message-framed connection a subclass hook produces from a
/// raw reactor connection. Opaque to the registry and driver beyond this
/// surface — the wire codec and handshake live entirely on the other side
/// of this trait.
#[async_trait]
pub trait ProtocolConnection: Send + Sync + 'static {
    /// The request payload type this connection accepts.
    type Request: Send + 'static;
    /// The response type a successful `send_message` resolves to.
    type Response: Send + 'static;

    fn host(&self) -> &str;
    fn port(&self) -> u16;

    /// Send one request. May fail with [`SendError::ConnectionClosed`]
    /// (triggers a transparent retry against the live set) or any other
    /// error (propagated to the caller unchanged).
    ///
    /// Per-connection, calls are dispatched in the order they're handed to
    /// the underlying connection; this crate never reorders them. No
    /// ordering is promised across connections.
    async fn send_message(&self, request: Self::Request) -> Result<Self::Response, SendError>;

    /// Register a listener that fires exactly once, when this connection
    /// closes — with [`CloseReason::Clean`] for a graceful close or
    /// [`CloseReason::Unexpected`] otherwise. Implementations that drop the
    /// sender without firing it (e.g. on panic unwind) are treated by the
    /// driver identically to an unexpected close.
    fn on_closed(&self, listener: oneshot::Sender<CloseReason>);
}
