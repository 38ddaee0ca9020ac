//! Routed, self-reconnecting client over a fixed set of RPC endpoints.
//!
//! This crate owns connection lifecycle, retry/backoff, and routing
//! policy; it has no opinion on wire format, transport, or protocol. Those
//! are supplied by the embedder through two traits:
//!
//! - [`IoReactor`] does the actual I/O: opening connections and running
//!   timers.
//! - [`ClientHooks`] turns a raw connection into a [`ProtocolConnection`]
//!   (and optionally runs a handshake before it's considered live).
//!
//! [`Client`] ties the two together with a [`RoutingStrategy`] (uniform
//! random by default) and a fixed [`Endpoint`] list, spawning one
//! reconnection driver per endpoint.
//!
//! Configuration loading (host lists, timeouts, log filters) lives in the
//! sibling `linkconf` crate and is deliberately not re-exported here —
//! this crate only needs the values, not how they were sourced.

mod backoff;
mod client;
mod connection;
mod driver;
mod endpoint;
mod entry;
mod error;
mod hooks;
mod reactor;
mod registry;
mod routing;

pub use client::Client;
pub use connection::{CloseReason, ProtocolConnection};
pub use endpoint::{Endpoint, ParseEndpointError};
pub use entry::{ConnState, ConnectionEntry};
pub use error::{ClientError, ConnectError, ConnectionError, SendError};
pub use hooks::ClientHooks;
pub use reactor::{IoReactor, TimerOutcome};
pub use registry::Registry;
pub use routing::{RoutingStrategy, UniformRandom};
