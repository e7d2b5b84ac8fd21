//! Hub error types
//!
//! Listener failures are the only fatal errors. Per-session read and write
//! failures are routine and handled internally as death events; they never
//! surface here.

use std::net::SocketAddr;

/// Result alias for hub operations
pub type Result<T> = std::result::Result<T, HubError>;

/// Error type for fatal hub failures
#[derive(Debug)]
pub enum HubError {
    /// Failed to bind the listen address
    Bind {
        /// Address we tried to bind
        addr: SocketAddr,
        /// Underlying I/O error
        source: std::io::Error,
    },
    /// The accept loop failed; the hub does not attempt a restart
    Accept(std::io::Error),
}

impl std::fmt::Display for HubError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HubError::Bind { addr, source } => {
                write!(f, "failed to bind {}: {}", addr, source)
            }
            HubError::Accept(e) => write!(f, "accept failed: {}", e),
        }
    }
}

impl std::error::Error for HubError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HubError::Bind { source, .. } => Some(source),
            HubError::Accept(e) => Some(e),
        }
    }
}
