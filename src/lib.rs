//! In-memory broadcast hub for raw TCP byte streams.
//!
//! The hub accepts any number of concurrent TCP connections, treats each
//! successful read from a client as one discrete message, and fans that
//! message out verbatim to every *other* connected client. The sender gets
//! a short acknowledgment instead of its own bytes. There is no framing:
//! whatever one read call returns is one broadcast unit.
//!
//! # Architecture
//!
//! All membership state lives in a registry owned exclusively by a single
//! dispatcher task. Readers and writers never touch the registry; they
//! report what happened through bounded channels and the dispatcher is the
//! only place where membership changes or fan-out decisions are made.
//!
//! ```text
//!   TcpListener ──accept──► joins ─────┐
//!                                      ▼
//!                              ┌──────────────┐
//!   [reader #1] ──publishes──► │  Dispatcher  │  registry: id → handle
//!   [reader #2] ──publishes──► │  (one task,  │
//!       ...                    │   one event  │
//!   [reader #n] ───deaths────► │   at a time) │
//!   [writer #n] ───deaths────► └──────┬───────┘
//!                                     │ enqueue per target
//!                 ┌───────────────────┼───────────────────┐
//!                 ▼                   ▼                   ▼
//!            [writer #1]        [writer #2]          [writer #n]
//!            write_all ► TCP    write_all ► TCP      write_all ► TCP
//! ```
//!
//! Each connection gets one long-lived reader task and one long-lived
//! writer task. The writer drains a bounded per-connection queue, so two
//! broadcasts racing toward the same peer can never interleave their
//! partial writes.
//!
//! # Example
//!
//! ```no_run
//! use tcphub::{HubConfig, HubServer};
//!
//! #[tokio::main]
//! async fn main() -> tcphub::Result<()> {
//!     let config = HubConfig::default().bind("127.0.0.1:8080".parse().unwrap());
//!     let server = HubServer::bind(config).await?;
//!     server.run().await
//! }
//! ```

pub mod error;
pub mod hub;
pub mod server;
pub mod session;

pub use error::{HubError, Result};
pub use hub::stats::HubStats;
pub use server::config::HubConfig;
pub use server::listener::HubServer;
pub use session::handle::SessionId;

/// Acknowledgment sent back to a session for each message it publishes.
///
/// The publisher never receives its own bytes, only this confirmation.
pub const ACK_PAYLOAD: &[u8] = b"Thanks for publishing!\n";
