use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::time::timeout;

use swarm::sink::{Sink, MAX_CAPTURE};

#[tokio::test]
async fn records_bytes_until_eof() {
    let _ = swarm::logging::builder("debug").is_test(true).try_init();
    let sink = Sink::bind("127.0.0.1:0").await.expect("Failed to bind sink");
    let addr = sink.local_addr().expect("sink has no local addr");
    let (tx, mut rx) = mpsc::unbounded_channel();
    tokio::spawn(sink.run(tx));

    let mut stream = TcpStream::connect(addr).await.expect("Cannot connect");
    let local = stream.local_addr().expect("no local addr");
    stream.write_all(b"GET / HTTP/1.1\r\n").await.expect("write failed");
    stream.write_all(b"Host: localhost\r\n\r\n").await.expect("write failed");
    stream.shutdown().await.expect("shutdown failed");

    let capture = timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("no capture recorded")
        .expect("sink channel closed");
    assert_eq!(capture.peer, local);
    assert_eq!(capture.payload, b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n");
}

#[tokio::test]
async fn oversized_payload_is_truncated() {
    let _ = swarm::logging::builder("debug").is_test(true).try_init();
    let sink = Sink::bind("127.0.0.1:0").await.expect("Failed to bind sink");
    let addr = sink.local_addr().expect("sink has no local addr");
    let (tx, mut rx) = mpsc::unbounded_channel();
    tokio::spawn(sink.run(tx));

    let mut stream = TcpStream::connect(addr).await.expect("Cannot connect");
    // the sink may close early, so a failed write is fine here
    let _ = stream.write_all(&vec![b'x'; MAX_CAPTURE * 2]).await;
    let _ = stream.shutdown().await;

    let capture = timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("no capture recorded")
        .expect("sink channel closed");
    assert_eq!(capture.payload.len(), MAX_CAPTURE);
}

#[tokio::test]
async fn empty_connection_records_nothing_sent() {
    let sink = Sink::bind("127.0.0.1:0").await.expect("Failed to bind sink");
    let addr = sink.local_addr().expect("sink has no local addr");
    let (tx, mut rx) = mpsc::unbounded_channel();
    tokio::spawn(sink.run(tx));

    drop(TcpStream::connect(addr).await.expect("Cannot connect"));

    let capture = timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("no capture recorded")
        .expect("sink channel closed");
    assert!(capture.payload.is_empty());
}
