//! Per-session writer task
//!
//! Drains the session's bounded outbound queue in order and writes each
//! payload completely to the socket (`write_all` loops over partial writes).
//! Because one task owns the write half, partial writes for two payloads to
//! the same peer can never interleave. A write error produces exactly one
//! death event for this session; the remaining payload and queue contents
//! are abandoned.

use bytes::Bytes;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

use crate::session::handle::SessionId;

/// Write loop for one session.
///
/// Exits when the outbound queue closes (the session was removed from the
/// registry) or on the first write error.
pub(crate) async fn run_writer<W>(
    id: SessionId,
    mut stream: W,
    mut outbound: mpsc::Receiver<Bytes>,
    deaths: mpsc::Sender<SessionId>,
) where
    W: AsyncWrite + Unpin,
{
    while let Some(payload) = outbound.recv().await {
        if let Err(e) = stream.write_all(&payload).await {
            tracing::debug!(session_id = %id, error = %e, "write failed");
            outbound.close();
            let _ = deaths.send(id).await;
            return;
        }
    }

    // Queue closed: the dispatcher removed this session. Close best-effort.
    let _ = stream.shutdown().await;
}
