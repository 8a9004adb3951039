use std::io;
use std::net::SocketAddr;

use tokio::io::AsyncReadExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc::UnboundedSender;

// bytes kept per connection, same bound as a request header block
pub const MAX_CAPTURE: usize = 8192;

/// What one accepted connection delivered before EOF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    pub peer: SocketAddr,
    pub payload: Vec<u8>,
}

/// Accept-only listener. Never writes back.
pub struct Sink {
    listener: TcpListener,
}

impl Sink {
    pub async fn bind(address: &str) -> io::Result<Sink> {
        let listener = TcpListener::bind(address).await?;
        log::debug!("sink listening socket: {}", listener.local_addr()?);
        Ok(Sink { listener })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    // Runs until the receiving side of `tx` is dropped.
    pub async fn run(self, tx: UnboundedSender<Capture>) -> io::Result<()> {
        loop {
            let (stream, peer) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(err) => {
                    // EMFILE and friends, keep accepting
                    log::warn!("accept failed: {}", err);
                    continue;
                }
            };
            log::debug!("=> accepted new connection | peer: {}", peer);
            if tx.is_closed() {
                return Ok(());
            }

            let tx = tx.clone();
            tokio::spawn(async move {
                match drain(stream).await {
                    Ok(payload) => {
                        log::debug!("=> shutdown connection | peer: {}, {} bytes", peer, payload.len());
                        let _ = tx.send(Capture { peer, payload });
                    }
                    Err(err) => log::warn!("recv from {} failed: {}", peer, err),
                }
            });
        }
    }
}

// Read until the peer sends FIN or the capture limit is hit.
async fn drain(mut stream: TcpStream) -> io::Result<Vec<u8>> {
    let mut payload = Vec::new();
    let mut buf = [0u8; 2048];
    loop {
        let n = stream.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        let room = MAX_CAPTURE - payload.len();
        payload.extend_from_slice(&buf[..n.min(room)]);
        if payload.len() == MAX_CAPTURE {
            log::debug!("capture limit reached, closing");
            break;
        }
    }
    Ok(payload)
}
