//! Per-session reader task
//!
//! Turns inbound bytes into publish events tagged with the owning session's
//! id. Each successful read becomes exactly one event: the bytes of one
//! read call are never split across events and never merged with another
//! read's bytes. Any read error, including an orderly peer close, produces
//! exactly one death event and ends the task; reads are never retried.

use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::mpsc;

use crate::hub::event::Publish;
use crate::session::handle::SessionId;

/// Read loop for one session.
///
/// Runs until the stream errors, the peer closes, or the hub shuts down
/// (publish channel closed).
pub(crate) async fn run_reader<R>(
    id: SessionId,
    mut stream: R,
    buffer_size: usize,
    publishes: mpsc::Sender<Publish>,
    deaths: mpsc::Sender<SessionId>,
) where
    R: AsyncRead + Unpin,
{
    let mut buf = vec![0u8; buffer_size];

    loop {
        match stream.read(&mut buf).await {
            Ok(0) => {
                tracing::debug!(session_id = %id, "peer closed connection");
                let _ = deaths.send(id).await;
                return;
            }
            Ok(n) => {
                let payload = Bytes::copy_from_slice(&buf[..n]);
                if publishes.send(Publish { id, payload }).await.is_err() {
                    // Hub shut down; no one left to report to.
                    return;
                }
            }
            Err(e) => {
                tracing::debug!(session_id = %id, error = %e, "read failed");
                let _ = deaths.send(id).await;
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::io::Builder;

    #[tokio::test]
    async fn test_each_read_becomes_one_publish() {
        let stream = Builder::new().read(b"hello").read(b"world").build();
        let (publish_tx, mut publish_rx) = mpsc::channel(8);
        let (death_tx, mut death_rx) = mpsc::channel(8);

        run_reader(SessionId::new(7), stream, 1024, publish_tx, death_tx).await;

        let first = publish_rx.recv().await.unwrap();
        assert_eq!(first.id, SessionId::new(7));
        assert_eq!(&first.payload[..], b"hello");

        let second = publish_rx.recv().await.unwrap();
        assert_eq!(&second.payload[..], b"world");

        // Mock is exhausted after the scripted reads, which reads as EOF.
        assert_eq!(death_rx.recv().await, Some(SessionId::new(7)));
        assert_eq!(death_rx.recv().await, None);
        assert!(publish_rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_read_error_reports_one_death() {
        let stream = Builder::new()
            .read_error(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "reset",
            ))
            .build();
        let (publish_tx, mut publish_rx) = mpsc::channel(8);
        let (death_tx, mut death_rx) = mpsc::channel(8);

        run_reader(SessionId::new(3), stream, 1024, publish_tx, death_tx).await;

        assert_eq!(death_rx.recv().await, Some(SessionId::new(3)));
        assert_eq!(death_rx.recv().await, None);
        assert!(publish_rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_error_after_data_still_forwards_earlier_reads() {
        let stream = Builder::new()
            .read(b"partial")
            .read_error(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "gone",
            ))
            .build();
        let (publish_tx, mut publish_rx) = mpsc::channel(8);
        let (death_tx, mut death_rx) = mpsc::channel(8);

        run_reader(SessionId::new(1), stream, 1024, publish_tx, death_tx).await;

        let event = publish_rx.recv().await.unwrap();
        assert_eq!(&event.payload[..], b"partial");
        assert_eq!(death_rx.recv().await, Some(SessionId::new(1)));
    }
}
