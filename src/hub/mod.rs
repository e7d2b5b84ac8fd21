//! Broadcast hub core
//!
//! The dispatcher is the single serialization point for the whole hub: it
//! owns the registry outright and processes exactly one event at a time
//! from three bounded sources (joins, publishes, deaths). No lock guards
//! the registry because no other task can reach it.
//!
//! # Event flow
//!
//! ```text
//!   joins      accepted sockets from the listener
//!   publishes  {id, bytes} from reader tasks, one per successful read
//!   deaths     session ids from readers (read failed) and writers
//!              (write failed); duplicates are no-ops
//! ```
//!
//! Fan-out for a publish uses the registry contents at the instant the
//! event is handled: a session that joins or dies concurrently either
//! fully receives the broadcast or fully misses it, never partially.

pub(crate) mod dispatcher;
pub(crate) mod event;
pub(crate) mod registry;
pub mod stats;

pub use stats::HubStats;
