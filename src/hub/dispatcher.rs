//! Broadcast dispatcher
//!
//! Single task that serializes every registry mutation and every fan-out
//! decision. Each loop iteration handles exactly one event from whichever
//! source is ready; there is no priority between sources.

use std::sync::Arc;

use bytes::Bytes;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, watch};

use crate::hub::event::{DeathTx, Publish, PublishTx};
use crate::hub::registry::Registry;
use crate::hub::stats::HubStats;
use crate::server::config::HubConfig;
use crate::session::handle::{SessionHandle, SessionId};
use crate::session::reader::run_reader;
use crate::session::writer::run_writer;
use crate::ACK_PAYLOAD;

/// The hub's serialized coordination point
pub(crate) struct Dispatcher {
    config: HubConfig,
    registry: Registry,
    next_id: u64,
    total_joined: u64,

    joins: mpsc::Receiver<TcpStream>,
    publishes_rx: mpsc::Receiver<Publish>,
    deaths_rx: mpsc::Receiver<SessionId>,

    // Cloned into each spawned reader/writer.
    publishes_tx: PublishTx,
    deaths_tx: DeathTx,

    stats: Arc<watch::Sender<HubStats>>,
}

impl Dispatcher {
    /// Create a dispatcher and the join-queue sender the listener feeds.
    pub(crate) fn new(
        config: HubConfig,
        stats: Arc<watch::Sender<HubStats>>,
    ) -> (Self, mpsc::Sender<TcpStream>) {
        let capacity = config.event_queue_capacity;
        let (joins_tx, joins_rx) = mpsc::channel(capacity);
        let (publishes_tx, publishes_rx) = mpsc::channel(capacity);
        let (deaths_tx, deaths_rx) = mpsc::channel(capacity);

        let dispatcher = Self {
            config,
            registry: Registry::new(),
            next_id: 1,
            total_joined: 0,
            joins: joins_rx,
            publishes_rx,
            deaths_rx,
            publishes_tx,
            deaths_tx,
            stats,
        };

        (dispatcher, joins_tx)
    }

    /// Event loop. Runs until aborted by the server.
    pub(crate) async fn run(mut self) {
        loop {
            tokio::select! {
                Some(socket) = self.joins.recv() => self.handle_join(socket),
                Some(event) = self.publishes_rx.recv() => self.handle_publish(event).await,
                Some(id) = self.deaths_rx.recv() => self.handle_death(id),
                else => break,
            }
        }
    }

    /// Admit an accepted connection: assign the next id, spawn its reader
    /// and writer tasks, and record it in the registry.
    fn handle_join(&mut self, socket: TcpStream) {
        let id = self.allocate_id();
        let (read_half, write_half) = socket.into_split();

        let (outbound_tx, outbound_rx) = mpsc::channel(self.config.outbound_queue_capacity);
        tokio::spawn(run_writer(id, write_half, outbound_rx, self.deaths_tx.clone()));

        let reader = tokio::spawn(run_reader(
            id,
            read_half,
            self.config.read_buffer_size,
            self.publishes_tx.clone(),
            self.deaths_tx.clone(),
        ));

        self.insert(id, SessionHandle::new(outbound_tx, reader));
    }

    /// Remove a dead session. Dropping the handle closes its outbound
    /// queue (the writer exits and the socket is closed best-effort) and
    /// aborts its reader. Absent ids are duplicate reports and ignored.
    fn handle_death(&mut self, id: SessionId) {
        if self.registry.remove(id) {
            self.publish_stats();
            tracing::info!(
                session_id = %id,
                active = self.registry.len(),
                "session closed"
            );
        } else {
            tracing::trace!(session_id = %id, "duplicate death report ignored");
        }
    }

    /// Fan a published message out to the current membership: every other
    /// session gets the payload verbatim, the originator gets the fixed
    /// acknowledgment. The target set is fixed for the whole step, so a
    /// concurrent join or death never sees a partial broadcast.
    async fn handle_publish(&mut self, event: Publish) {
        for (id, handle) in self.registry.iter() {
            let payload = if *id == event.id {
                Bytes::from_static(ACK_PAYLOAD)
            } else {
                event.payload.clone()
            };

            if handle.enqueue(payload).await.is_err() {
                // Writer already exited; its death event will clean up.
                tracing::trace!(session_id = %id, "outbound queue closed");
            }
        }
    }

    fn allocate_id(&mut self) -> SessionId {
        let id = SessionId::new(self.next_id);
        self.next_id += 1;
        id
    }

    fn insert(&mut self, id: SessionId, handle: SessionHandle) {
        self.registry.insert(id, handle);
        self.total_joined += 1;
        self.publish_stats();
        tracing::info!(
            session_id = %id,
            active = self.registry.len(),
            "session joined"
        );
    }

    fn publish_stats(&self) {
        self.stats.send_replace(HubStats {
            active_sessions: self.registry.len(),
            total_sessions: self.total_joined,
        });
    }
}
