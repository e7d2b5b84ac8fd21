//! Events flowing into the dispatcher
//!
//! Three bounded channels feed the dispatcher: accepted sockets from the
//! listener, publish events from readers, and death reports from readers
//! and writers. Bounded capacity is the hub's only backpressure: a producer
//! facing a full queue waits for space.

use bytes::Bytes;
use tokio::sync::mpsc;

use crate::session::handle::SessionId;

/// One message published by a session, consumed exactly once by the
/// dispatcher. The payload is the verbatim bytes of one read call.
#[derive(Debug, Clone)]
pub(crate) struct Publish {
    /// Originating session
    pub id: SessionId,
    /// Message bytes (reference-counted, cheap to clone for fan-out)
    pub payload: Bytes,
}

/// Sender half for reader publish events
pub(crate) type PublishTx = mpsc::Sender<Publish>;

/// Sender half for death reports
pub(crate) type DeathTx = mpsc::Sender<SessionId>;
