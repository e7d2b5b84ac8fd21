//! Hub membership statistics
//!
//! Informational only: the dispatcher publishes a fresh snapshot through a
//! `tokio::sync::watch` channel on every membership change, mirroring the
//! membership counts it logs on connect and disconnect.

/// Point-in-time membership snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HubStats {
    /// Sessions currently in the registry
    pub active_sessions: usize,
    /// Sessions ever admitted since the hub started
    pub total_sessions: u64,
}
