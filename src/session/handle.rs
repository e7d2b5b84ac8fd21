//! Session identity and the dispatcher-side connection handle

use bytes::Bytes;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::SendError;
use tokio::task::JoinHandle;

/// Unique identity of one accepted connection.
///
/// Ids are assigned from a process-lifetime monotonic counter and never
/// reused, so a stale death report can never name a newer session. A `u64`
/// does not run out within any bounded process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric value of this id
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Dispatcher-owned record for one live session.
///
/// Holds the sending side of the session's outbound queue and the reader
/// task handle. Dropping the handle tears the session down: the writer task
/// exits once the queue closes (dropping the write half of the socket), and
/// the reader task is aborted so a session blocked in `read` does not
/// linger after its write side died.
#[derive(Debug)]
pub(crate) struct SessionHandle {
    outbound: mpsc::Sender<Bytes>,
    reader: JoinHandle<()>,
}

impl SessionHandle {
    pub(crate) fn new(outbound: mpsc::Sender<Bytes>, reader: JoinHandle<()>) -> Self {
        Self { outbound, reader }
    }

    /// Queue a payload for delivery to this session.
    ///
    /// Waits for queue space when the session is backlogged; fails only
    /// when the writer task has already exited.
    pub(crate) async fn enqueue(&self, payload: Bytes) -> std::result::Result<(), SendError<Bytes>> {
        self.outbound.send(payload).await
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        self.reader.abort();
    }
}
