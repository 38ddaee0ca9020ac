use std::sync::Arc;

use rand::Rng;

use crate::connection::ProtocolConnection;

/// Pluggable selector that picks one live connection per outbound request.
///
/// A pure function of the live set and the request: `(live connections,
/// request) -> connection | None`. Stateless by default; if a caller's
/// strategy is stateful, that's the caller's problem to synchronize.
pub trait RoutingStrategy<C: ProtocolConnection>: Send + Sync {
    /// Choose a connection from `live` for `request`, or `None` if no
    /// connection should be used (treated by the caller as "no connection
    /// available", failing the request).
    fn choose(&self, live: &[Arc<C>], request: &C::Request) -> Option<Arc<C>>;
}

/// The default strategy: uniform random among the currently-live
/// connections.
#[derive(Debug, Default)]
pub struct UniformRandom;

impl<C: ProtocolConnection> RoutingStrategy<C> for UniformRandom {
    fn choose(&self, live: &[Arc<C>], _request: &C::Request) -> Option<Arc<C>> {
        if live.is_empty() {
            return None;
        }
        let index = rand::thread_rng().gen_range(0..live.len());
        Some(Arc::clone(&live[index]))
    }
}
