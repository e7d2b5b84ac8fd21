//! Per-connection sessions
//!
//! A session is one accepted connection plus its assigned identity. Each
//! session runs a reader task (inbound bytes → publish events) and a writer
//! task (outbound queue → socket). Neither task ever touches the registry;
//! they report failures as death events and let the dispatcher clean up.

pub mod handle;
pub(crate) mod reader;
pub(crate) mod writer;

pub use handle::SessionId;
