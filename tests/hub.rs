//! End-to-end hub tests over real TCP sockets.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio::time::timeout;

use tcphub::{HubConfig, HubServer, HubStats, ACK_PAYLOAD};

const WAIT: Duration = Duration::from_secs(5);
const QUIET: Duration = Duration::from_millis(200);

/// Start a hub on an ephemeral port, returning its address and the
/// membership stats receiver.
async fn start_hub() -> (SocketAddr, watch::Receiver<HubStats>) {
    let config = HubConfig::default().bind("127.0.0.1:0".parse().unwrap());
    let server = HubServer::bind(config).await.unwrap();
    let addr = server.local_addr();
    let stats = server.stats();

    tokio::spawn(async move {
        let _ = server.run().await;
    });

    (addr, stats)
}

async fn wait_for_members(stats: &mut watch::Receiver<HubStats>, active: usize) {
    timeout(WAIT, stats.wait_for(|s| s.active_sessions == active))
        .await
        .expect("membership change timed out")
        .unwrap();
}

async fn read_exactly(stream: &mut TcpStream, len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    timeout(WAIT, stream.read_exact(&mut buf))
        .await
        .expect("read timed out")
        .unwrap();
    buf
}

/// Assert that nothing arrives on the stream within a short window.
async fn assert_quiet(stream: &mut TcpStream) {
    let mut buf = [0u8; 1];
    let result = timeout(QUIET, stream.read(&mut buf)).await;
    assert!(result.is_err(), "unexpected bytes: {:?}", &buf);
}

#[tokio::test]
async fn message_fans_out_to_all_other_sessions() {
    let (addr, mut stats) = start_hub().await;

    let mut a = TcpStream::connect(addr).await.unwrap();
    let mut b = TcpStream::connect(addr).await.unwrap();
    let mut c = TcpStream::connect(addr).await.unwrap();
    wait_for_members(&mut stats, 3).await;

    a.write_all(b"hi").await.unwrap();

    assert_eq!(read_exactly(&mut b, 2).await, b"hi");
    assert_eq!(read_exactly(&mut c, 2).await, b"hi");
    assert_eq!(read_exactly(&mut a, ACK_PAYLOAD.len()).await, ACK_PAYLOAD);
}

#[tokio::test]
async fn sender_never_sees_its_own_bytes() {
    let (addr, mut stats) = start_hub().await;

    let mut a = TcpStream::connect(addr).await.unwrap();
    wait_for_members(&mut stats, 1).await;

    a.write_all(b"talking to myself").await.unwrap();

    // Only the acknowledgment comes back, exactly once.
    assert_eq!(read_exactly(&mut a, ACK_PAYLOAD.len()).await, ACK_PAYLOAD);
    assert_quiet(&mut a).await;
}

#[tokio::test]
async fn binary_payload_is_delivered_verbatim() {
    let (addr, mut stats) = start_hub().await;

    let mut a = TcpStream::connect(addr).await.unwrap();
    let mut b = TcpStream::connect(addr).await.unwrap();
    wait_for_members(&mut stats, 2).await;

    let payload: Vec<u8> = vec![0x00, 0xFF, 0x7F, 0x00, 0x0A, 0x00];
    a.write_all(&payload).await.unwrap();

    assert_eq!(read_exactly(&mut b, payload.len()).await, payload);
}

#[tokio::test]
async fn late_joiner_misses_earlier_messages() {
    let (addr, mut stats) = start_hub().await;

    let mut a = TcpStream::connect(addr).await.unwrap();
    let mut b = TcpStream::connect(addr).await.unwrap();
    wait_for_members(&mut stats, 2).await;

    a.write_all(b"first").await.unwrap();
    assert_eq!(read_exactly(&mut b, 5).await, b"first");

    // c joins strictly after "first" was dispatched.
    let mut c = TcpStream::connect(addr).await.unwrap();
    wait_for_members(&mut stats, 3).await;
    assert_quiet(&mut c).await;

    a.write_all(b"second").await.unwrap();
    assert_eq!(read_exactly(&mut c, 6).await, b"second");
    assert_eq!(read_exactly(&mut b, 6).await, b"second");
}

#[tokio::test]
async fn disconnect_prunes_membership_and_fanout() {
    let (addr, mut stats) = start_hub().await;

    let mut a = TcpStream::connect(addr).await.unwrap();
    let b = TcpStream::connect(addr).await.unwrap();
    let mut c = TcpStream::connect(addr).await.unwrap();
    wait_for_members(&mut stats, 3).await;

    drop(b);
    wait_for_members(&mut stats, 2).await;

    a.write_all(b"again").await.unwrap();
    assert_eq!(read_exactly(&mut c, 5).await, b"again");
    assert_eq!(read_exactly(&mut a, ACK_PAYLOAD.len()).await, ACK_PAYLOAD);

    let snapshot = *stats.borrow();
    assert_eq!(snapshot.active_sessions, 2);
    assert_eq!(snapshot.total_sessions, 3);
}

#[tokio::test]
async fn consecutive_messages_arrive_in_order() {
    let (addr, mut stats) = start_hub().await;

    let mut a = TcpStream::connect(addr).await.unwrap();
    let mut b = TcpStream::connect(addr).await.unwrap();
    wait_for_members(&mut stats, 2).await;

    a.write_all(b"one").await.unwrap();
    assert_eq!(read_exactly(&mut b, 3).await, b"one");
    a.write_all(b"two").await.unwrap();
    assert_eq!(read_exactly(&mut b, 3).await, b"two");
    a.write_all(b"three").await.unwrap();
    assert_eq!(read_exactly(&mut b, 5).await, b"three");
}

#[tokio::test]
async fn hub_survives_a_burst_of_joins_and_leaves() {
    let (addr, mut stats) = start_hub().await;

    let mut keepers = Vec::new();
    for i in 0..10 {
        let conn = TcpStream::connect(addr).await.unwrap();
        if i % 2 == 0 {
            keepers.push(conn);
        }
        // Odd connections drop immediately.
    }

    timeout(WAIT, stats.wait_for(|s| s.total_sessions == 10 && s.active_sessions == 5))
        .await
        .expect("membership change timed out")
        .unwrap();

    let snapshot = *stats.borrow();
    assert_eq!(snapshot.active_sessions, 5);
    assert_eq!(snapshot.total_sessions, 10);

    // The survivors still form a working hub.
    let mut a = keepers.remove(0);
    a.write_all(b"ping").await.unwrap();
    for conn in keepers.iter_mut() {
        assert_eq!(read_exactly(conn, 4).await, b"ping");
    }
    assert_eq!(read_exactly(&mut a, ACK_PAYLOAD.len()).await, ACK_PAYLOAD);
}
