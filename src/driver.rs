use std::io;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Minimal HTTP/1.1 request written on every connection.
pub const REQUEST: &[u8] = b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 9090;
pub const DEFAULT_CONCURRENCY: usize = 100;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub concurrency: usize,
    pub payload: Vec<u8>,
    // None waits on connect forever
    pub connect_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            concurrency: DEFAULT_CONCURRENCY,
            payload: REQUEST.to_vec(),
            connect_timeout: None,
        }
    }
}

impl Config {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Outcome of one driver run. `launched` always equals the configured
/// concurrency, `succeeded + failed == launched`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Report {
    pub launched: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl Report {
    /// The completion line. Counts launched clients, not successful ones.
    pub fn summary(&self) -> String {
        format!("{} clients sent requests", self.launched)
    }
}

/// Connect, write the payload, close. No response is read.
pub async fn send_one(
    index: usize,
    addr: &str,
    payload: &[u8],
    connect_timeout: Option<Duration>,
) -> io::Result<()> {
    let mut stream = match connect_timeout {
        Some(limit) => timeout(limit, TcpStream::connect(addr))
            .await
            .map_err(|_| io::Error::new(io::ErrorKind::TimedOut, "connect timed out"))??,
        None => TcpStream::connect(addr).await?,
    };
    log::debug!(
        "client {} connected | local: {:?}",
        index,
        stream.local_addr().ok()
    );

    stream.write_all(payload).await?;
    // FIN after the payload; the stream is closed when dropped
    stream.shutdown().await?;
    log::debug!("client {} sent {} bytes", index, payload.len());
    Ok(())
}

/// Spawn one task per client, wait for all of them and count outcomes.
pub async fn run(config: &Config) -> Report {
    let addr = config.addr();
    log::info!("launching {} clients against {}", config.concurrency, addr);

    let mut handles = Vec::with_capacity(config.concurrency);
    for index in 0..config.concurrency {
        let addr = addr.clone();
        let payload = config.payload.clone();
        let connect_timeout = config.connect_timeout;
        handles.push(tokio::spawn(async move {
            send_one(index, &addr, &payload, connect_timeout).await
        }));
    }

    let mut report = Report {
        launched: handles.len(),
        ..Report::default()
    };
    for (index, handle) in handles.into_iter().enumerate() {
        match handle.await {
            Ok(Ok(())) => report.succeeded += 1,
            Ok(Err(err)) => {
                log::warn!("client {} failed: {}", index, err);
                report.failed += 1;
            }
            Err(err) => {
                log::warn!("client {} aborted: {}", index, err);
                report.failed += 1;
            }
        }
    }

    if report.failed > 0 {
        log::warn!(
            "{} of {} clients failed against {}",
            report.failed,
            report.launched,
            addr
        );
    }
    log::info!(
        "done | succeeded: {}, failed: {}",
        report.succeeded,
        report.failed
    );
    report
}
