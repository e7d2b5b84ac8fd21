//! Hub server listener
//!
//! Binds the listen address and feeds accepted connections into the
//! dispatcher's join queue. An accept error is fatal: `run` returns `Err`
//! and the hub does not attempt a supervised restart. This is a known
//! limitation of the design, not silent recovery.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, watch};

use crate::error::{HubError, Result};
use crate::hub::dispatcher::Dispatcher;
use crate::hub::stats::HubStats;
use crate::server::config::HubConfig;

/// Broadcast hub server
pub struct HubServer {
    listener: TcpListener,
    local_addr: SocketAddr,
    config: HubConfig,
    stats: Arc<watch::Sender<HubStats>>,
}

impl HubServer {
    /// Bind the configured address.
    ///
    /// Binding eagerly (rather than inside `run`) lets callers bind port 0
    /// and discover the assigned port via [`local_addr`](Self::local_addr).
    pub async fn bind(config: HubConfig) -> Result<Self> {
        let listener = TcpListener::bind(config.bind_addr)
            .await
            .map_err(|e| HubError::Bind {
                addr: config.bind_addr,
                source: e,
            })?;
        let local_addr = listener.local_addr().map_err(|e| HubError::Bind {
            addr: config.bind_addr,
            source: e,
        })?;

        let (stats, _) = watch::channel(HubStats::default());

        Ok(Self {
            listener,
            local_addr,
            config,
            stats: Arc::new(stats),
        })
    }

    /// The bound address
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Subscribe to membership statistics, updated on every join and death
    pub fn stats(&self) -> watch::Receiver<HubStats> {
        self.stats.subscribe()
    }

    /// Run the hub.
    ///
    /// This method blocks until the accept loop fails.
    pub async fn run(&self) -> Result<()> {
        let (dispatcher, joins) = Dispatcher::new(self.config.clone(), Arc::clone(&self.stats));
        let dispatcher_task = tokio::spawn(dispatcher.run());
        tracing::info!(addr = %self.local_addr, "hub listening");

        let result = self.accept_loop(&joins).await;

        dispatcher_task.abort();
        result
    }

    /// Run the hub until the given future completes (graceful shutdown)
    pub async fn run_until<F>(&self, shutdown: F) -> Result<()>
    where
        F: std::future::Future<Output = ()>,
    {
        let (dispatcher, joins) = Dispatcher::new(self.config.clone(), Arc::clone(&self.stats));
        let dispatcher_task = tokio::spawn(dispatcher.run());
        tracing::info!(addr = %self.local_addr, "hub listening");

        let result = tokio::select! {
            _ = shutdown => {
                tracing::info!("shutdown signal received");
                Ok(())
            }
            result = self.accept_loop(&joins) => result,
        };

        dispatcher_task.abort();
        result
    }

    async fn accept_loop(&self, joins: &mpsc::Sender<TcpStream>) -> Result<()> {
        loop {
            let (socket, peer_addr) = self.listener.accept().await.map_err(HubError::Accept)?;
            tracing::debug!(peer = %peer_addr, "inbound connection");

            if self.config.tcp_nodelay {
                if let Err(e) = socket.set_nodelay(true) {
                    tracing::warn!(peer = %peer_addr, error = %e, "failed to set TCP_NODELAY");
                }
            }

            if joins.send(socket).await.is_err() {
                // Dispatcher gone; nothing left to hand connections to.
                return Ok(());
            }
        }
    }
}
