use async_trait::async_trait;

use crate::connection::ProtocolConnection;
use crate::error::ConnectError;
use crate::reactor::IoReactor;

/// The client's only extension points, as a single capability interface
/// supplied at construction rather than a pair of subclass overrides.
///
/// `create_connection` is mandatory (there's no default — a raw connection
/// is useless until something wraps it). `initialize_connection` is an
/// optional handshake that runs after wrapping and before the entry enters
/// `open`; its default is a no-op.
#[async_trait]
pub trait ClientHooks<R: IoReactor>: Send + Sync + 'static {
    type Connection: ProtocolConnection;

    /// Wrap a raw connection produced by the reactor.
    async fn create_connection(
        &self,
        raw: R::RawConnection,
    ) -> Result<Self::Connection, ConnectError>;

    /// Run an optional handshake over the wrapped connection. A failure
    /// here is treated identically to a connect failure: the attempt is
    /// absorbed by the driver and backoff proceeds.
    async fn initialize_connection(&self, _connection: &Self::Connection) -> Result<(), ConnectError> {
        Ok(())
    }
}
