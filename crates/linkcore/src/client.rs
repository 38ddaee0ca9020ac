use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{oneshot, watch, Mutex, RwLock};
use tokio::task::JoinHandle;

use crate::connection::ProtocolConnection;
use crate::driver::run_driver;
use crate::endpoint::Endpoint;
use crate::error::{ClientError, ConnectionError, SendError};
use crate::hooks::ClientHooks;
use crate::reactor::IoReactor;
use crate::registry::Registry;
use crate::routing::{RoutingStrategy, UniformRandom};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClientLifecycle {
    Unstarted,
    Starting,
    Started,
    Stopping,
    Stopped,
}

/// A routed, self-reconnecting client over a fixed set of endpoints.
///
/// Generic over the reactor that does the actual I/O (`R`) and the hooks
/// that turn a raw connection into a usable one (`H`) — the same shape as
/// handing an HTTP client a connector and a body type: this crate owns the
/// reconnection and routing policy, nothing about bytes on the wire.
pub struct Client<R: IoReactor, H: ClientHooks<R>> {
    reactor: Arc<R>,
    hooks: Arc<H>,
    registry: Arc<Registry<H::Connection>>,
    routing: Arc<dyn RoutingStrategy<H::Connection>>,
    connection_timeout: Duration,
    lifecycle: RwLock<ClientLifecycle>,
    stop_tx: watch::Sender<bool>,
    stop_rx: watch::Receiver<bool>,
    driver_handles: Mutex<Vec<JoinHandle<()>>>,
}

impl<R: IoReactor, H: ClientHooks<R>> Client<R, H> {
    /// Build a client from loaded [`linkconf::ClientSettings`], parsing
    /// each `"host:port"` entry into an [`Endpoint`]. The reactor, hooks,
    /// and routing strategy are code-level capabilities settings can't
    /// carry, so they're still supplied directly.
    pub fn from_settings(
        settings: &linkconf::ClientSettings,
        reactor: R,
        hooks: H,
    ) -> anyhow::Result<Self> {
        let endpoints = settings
            .hosts
            .iter()
            .map(|host| host.parse::<Endpoint>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(
            endpoints,
            reactor,
            hooks,
            Duration::from_secs(settings.connection_timeout_secs),
        ))
    }

    /// Build a client with the default [`UniformRandom`] routing strategy.
    pub fn new(
        endpoints: impl IntoIterator<Item = Endpoint>,
        reactor: R,
        hooks: H,
        connection_timeout: Duration,
    ) -> Self {
        Self::with_routing(endpoints, reactor, hooks, connection_timeout, UniformRandom)
    }

    pub fn with_routing(
        endpoints: impl IntoIterator<Item = Endpoint>,
        reactor: R,
        hooks: H,
        connection_timeout: Duration,
        routing: impl RoutingStrategy<H::Connection> + 'static,
    ) -> Self {
        let (stop_tx, stop_rx) = watch::channel(false);
        Self {
            reactor: Arc::new(reactor),
            hooks: Arc::new(hooks),
            registry: Arc::new(Registry::new(endpoints)),
            routing: Arc::new(routing),
            connection_timeout,
            lifecycle: RwLock::new(ClientLifecycle::Unstarted),
            stop_tx,
            stop_rx,
            driver_handles: Mutex::new(Vec::new()),
        }
    }

    /// Start the reactor and spawn one reconnection driver per configured
    /// endpoint, then wait for every endpoint's first connect attempt to
    /// resolve one way or another.
    ///
    /// An endpoint whose first attempt fails keeps retrying in the
    /// background rather than failing `start` — only the reactor stopping
    /// out from under an in-flight connect does that.
    pub async fn start(&self) -> Result<(), ConnectionError> {
        {
            let mut lifecycle = self.lifecycle.write().await;
            if *lifecycle != ClientLifecycle::Unstarted {
                return Err(ConnectionError::NotStarted);
            }
            *lifecycle = ClientLifecycle::Starting;
        }

        if self.registry.is_empty() {
            tracing::warn!("starting with no configured endpoints");
        }

        self.reactor.start().await?;

        let mut first_successes = Vec::with_capacity(self.registry.entries().len());
        let mut handles = Vec::with_capacity(self.registry.entries().len());

        for entry in self.registry.entries() {
            let endpoint = entry.read().await.endpoint.clone();
            let (tx, rx) = oneshot::channel();
            first_successes.push(rx);

            handles.push(tokio::spawn(run_driver(
                endpoint,
                Arc::clone(&self.reactor),
                Arc::clone(&self.hooks),
                Arc::clone(entry),
                self.connection_timeout,
                Some(tx),
                self.stop_rx.clone(),
            )));
        }

        *self.driver_handles.lock().await = handles;

        for first_success in first_successes {
            match first_success.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    *self.lifecycle.write().await = ClientLifecycle::Stopped;
                    return Err(e);
                }
                Err(_) => {
                    *self.lifecycle.write().await = ClientLifecycle::Stopped;
                    return Err(ConnectionError::ReactorStoppedWhileConnecting);
                }
            }
        }

        *self.lifecycle.write().await = ClientLifecycle::Started;
        Ok(())
    }

    /// Stop every driver and the reactor. Idempotent: calling `stop` more
    /// than once, or before `start`, just resolves `Ok(())`.
    pub async fn stop(&self) -> Result<(), ConnectionError> {
        {
            let mut lifecycle = self.lifecycle.write().await;
            match *lifecycle {
                ClientLifecycle::Stopped => return Ok(()),
                ClientLifecycle::Unstarted => {
                    *lifecycle = ClientLifecycle::Stopped;
                    return Ok(());
                }
                _ => *lifecycle = ClientLifecycle::Stopping,
            }
        }

        let _ = self.stop_tx.send(true);
        self.reactor.stop().await?;

        let handles = std::mem::take(&mut *self.driver_handles.lock().await);
        for handle in handles {
            let _ = handle.await;
        }

        *self.lifecycle.write().await = ClientLifecycle::Stopped;
        Ok(())
    }

    /// `true` iff the client is started and at least one endpoint is
    /// currently live.
    pub async fn connected(&self) -> bool {
        if *self.lifecycle.read().await != ClientLifecycle::Started {
            return false;
        }
        !self.registry.live_set().await.is_empty()
    }

    /// Route and send one request, retrying transparently against a
    /// (possibly different) live connection if the chosen one reports its
    /// close mid-send.
    pub async fn send_request(
        &self,
        request: <H::Connection as ProtocolConnection>::Request,
    ) -> Result<<H::Connection as ProtocolConnection>::Response, ClientError>
    where
        <H::Connection as ProtocolConnection>::Request: Clone,
    {
        if *self.lifecycle.read().await != ClientLifecycle::Started {
            return Err(ConnectionError::NotStarted.into());
        }

        loop {
            let live = self.registry.live_set().await;
            let connection = self
                .routing
                .choose(&live, &request)
                .ok_or(ConnectionError::NoLiveConnection)?;

            match connection.send_message(request.clone()).await {
                Ok(response) => return Ok(response),
                Err(SendError::ConnectionClosed) => {
                    tracing::warn!("request failed because the connection closed, retrying");
                    continue;
                }
                Err(SendError::Other(e)) => {
                    tracing::warn!("request failed: {e}");
                    return Err(ClientError::Request(e));
                }
            }
        }
    }
}
