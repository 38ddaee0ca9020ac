use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{oneshot, watch, RwLock};

use crate::backoff::backoff_for_attempt;
use crate::connection::CloseReason;
use crate::endpoint::Endpoint;
use crate::entry::{ConnState, ConnectionEntry};
use crate::error::ConnectionError;
use crate::hooks::ClientHooks;
use crate::reactor::{IoReactor, TimerOutcome};

/// The per-endpoint reconnection state machine. Owns one entry for its
/// whole life; see [`ConnState`] for the transition diagram.
///
/// Spawned once per configured endpoint by [`Client::start`](crate::client::Client::start)
/// and run to completion (which only happens at `Terminated`) on its own
/// task, so that one endpoint backing off never blocks another from
/// reconnecting.
pub(crate) async fn run_driver<R, H>(
    endpoint: Endpoint,
    reactor: Arc<R>,
    hooks: Arc<H>,
    entry: Arc<RwLock<ConnectionEntry<H::Connection>>>,
    timeout: Duration,
    mut first_success: Option<oneshot::Sender<Result<(), ConnectionError>>>,
    mut stop_rx: watch::Receiver<bool>,
) where
    R: IoReactor,
    H: ClientHooks<R>,
{
    let mut attempt_count: u32 = 1;

    loop {
        if *stop_rx.borrow() {
            terminate(&entry, &mut first_success, attempt_count).await;
            return;
        }

        set_state(&entry, ConnState::Connecting, None, attempt_count).await;
        tracing::debug!("connecting to {endpoint}");

        let connect_result = tokio::select! {
            biased;
            _ = wait_for_stop(&mut stop_rx) => {
                terminate(&entry, &mut first_success, attempt_count).await;
                return;
            }
            result = reactor.connect(&endpoint.host, endpoint.port, timeout) => result,
        };

        let raw = match connect_result {
            Ok(raw) => raw,
            Err(e) => {
                match back_off_after_failure(
                    &*reactor,
                    &endpoint,
                    &entry,
                    &mut attempt_count,
                    timeout,
                    e,
                )
                .await
                {
                    ControlFlow::Continue(()) => continue,
                    ControlFlow::Break(()) => {
                        terminate(&entry, &mut first_success, attempt_count).await;
                        return;
                    }
                }
            }
        };

        let connection = match hooks.create_connection(raw).await {
            Ok(connection) => Arc::new(connection),
            Err(e) => {
                match back_off_after_failure(
                    &*reactor,
                    &endpoint,
                    &entry,
                    &mut attempt_count,
                    timeout,
                    e,
                )
                .await
                {
                    ControlFlow::Continue(()) => continue,
                    ControlFlow::Break(()) => {
                        terminate(&entry, &mut first_success, attempt_count).await;
                        return;
                    }
                }
            }
        };

        let (close_tx, close_rx) = oneshot::channel();
        connection.on_closed(close_tx);

        if let Err(e) = hooks.initialize_connection(&connection).await {
            match back_off_after_failure(&*reactor, &endpoint, &entry, &mut attempt_count, timeout, e)
                .await
            {
                ControlFlow::Continue(()) => continue,
                ControlFlow::Break(()) => {
                    terminate(&entry, &mut first_success, attempt_count).await;
                    return;
                }
            }
        }

        attempt_count = 0;
        set_state(
            &entry,
            ConnState::Open,
            Some(Arc::clone(&connection)),
            attempt_count,
        )
        .await;
        tracing::info!("connected to {endpoint}");
        if let Some(tx) = first_success.take() {
            let _ = tx.send(Ok(()));
        }

        let closed = tokio::select! {
            biased;
            _ = wait_for_stop(&mut stop_rx) => None,
            reason = close_rx => Some(reason),
        };

        match closed {
            None => {
                terminate(&entry, &mut first_success, attempt_count).await;
                return;
            }
            Some(Ok(CloseReason::Clean)) => {
                tracing::info!("connection to {endpoint} closed");
                set_state(&entry, ConnState::Terminated, None, attempt_count).await;
                return;
            }
            Some(Ok(CloseReason::Unexpected(cause))) => {
                tracing::warn!("connection to {endpoint} closed unexpectedly: {cause}");
                attempt_count = 1;
                set_state(&entry, ConnState::Closed, None, attempt_count).await;
                continue;
            }
            Some(Err(_)) => {
                tracing::warn!(
                    "connection to {endpoint} closed unexpectedly: close listener dropped"
                );
                attempt_count = 1;
                set_state(&entry, ConnState::Closed, None, attempt_count).await;
                continue;
            }
        }
    }
}

/// Log, mark the entry `Waiting`, and await backoff. Returns whether the
/// driver should retry (`Continue`) or the reactor stopped mid-backoff and
/// the driver should terminate (`Break`).
async fn back_off_after_failure<R, C>(
    reactor: &R,
    endpoint: &Endpoint,
    entry: &Arc<RwLock<ConnectionEntry<C>>>,
    attempt_count: &mut u32,
    timeout: Duration,
    cause: impl std::fmt::Display,
) -> ControlFlow<(), ()>
where
    R: IoReactor,
{
    *attempt_count += 1;
    let delay = backoff_for_attempt(timeout, *attempt_count);
    tracing::warn!(
        "failed connecting to {endpoint}, will try again in {}s: {cause}",
        delay.as_secs()
    );
    set_state(entry, ConnState::Waiting, None, *attempt_count).await;

    match reactor.schedule_timer(delay).await {
        TimerOutcome::Elapsed => ControlFlow::Continue(()),
        TimerOutcome::Cancelled => ControlFlow::Break(()),
    }
}

async fn terminate<C>(
    entry: &Arc<RwLock<ConnectionEntry<C>>>,
    first_success: &mut Option<oneshot::Sender<Result<(), ConnectionError>>>,
    attempt_count: u32,
) {
    set_state(entry, ConnState::Terminated, None, attempt_count).await;
    if let Some(tx) = first_success.take() {
        let _ = tx.send(Err(ConnectionError::ReactorStoppedWhileConnecting));
    }
}

async fn set_state<C>(
    entry: &Arc<RwLock<ConnectionEntry<C>>>,
    state: ConnState,
    connection: Option<Arc<C>>,
    attempt_count: u32,
) {
    let mut guard = entry.write().await;
    guard.state = state;
    guard.connection = connection;
    guard.attempt_count = attempt_count;
}

async fn wait_for_stop(stop_rx: &mut watch::Receiver<bool>) {
    loop {
        if *stop_rx.borrow() {
            return;
        }
        if stop_rx.changed().await.is_err() {
            return;
        }
    }
}
