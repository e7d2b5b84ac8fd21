//! Hub configuration

use std::net::SocketAddr;

/// Hub configuration options
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Address to bind to
    pub bind_addr: SocketAddr,

    /// Per-read buffer size; each successful read of up to this many bytes
    /// becomes one broadcast unit
    pub read_buffer_size: usize,

    /// Capacity of each dispatcher inbound queue (joins, publishes, deaths)
    pub event_queue_capacity: usize,

    /// Capacity of each session's outbound queue
    pub outbound_queue_capacity: usize,

    /// Enable TCP_NODELAY on accepted sockets
    pub tcp_nodelay: bool,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".parse().unwrap(),
            read_buffer_size: 1024,
            event_queue_capacity: 128,
            outbound_queue_capacity: 32,
            tcp_nodelay: true,
        }
    }
}

impl HubConfig {
    /// Create a new config with custom bind address
    pub fn with_addr(addr: SocketAddr) -> Self {
        Self {
            bind_addr: addr,
            ..Default::default()
        }
    }

    /// Set the bind address
    pub fn bind(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Set the per-read buffer size (floored at 1)
    pub fn read_buffer_size(mut self, size: usize) -> Self {
        self.read_buffer_size = size.max(1);
        self
    }

    /// Set the dispatcher inbound queue capacity (floored at 1)
    pub fn event_queue_capacity(mut self, capacity: usize) -> Self {
        self.event_queue_capacity = capacity.max(1);
        self
    }

    /// Set the per-session outbound queue capacity (floored at 1)
    pub fn outbound_queue_capacity(mut self, capacity: usize) -> Self {
        self.outbound_queue_capacity = capacity.max(1);
        self
    }

    /// Enable or disable TCP_NODELAY
    pub fn tcp_nodelay(mut self, enabled: bool) -> Self {
        self.tcp_nodelay = enabled;
        self
    }
}
