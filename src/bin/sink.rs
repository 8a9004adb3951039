use clap::Parser;
use tokio::sync::mpsc;

use swarm::driver;
use swarm::sink::Sink;

/// Accept connections and log what each one sent.
#[derive(Parser, Debug)]
#[command(name = "sink", about = "Accept-only listener for the load driver")]
struct Cli {
    /// Address to bind.
    #[arg(long, default_value = driver::DEFAULT_HOST)]
    host: String,

    /// Port to bind.
    #[arg(long, default_value_t = driver::DEFAULT_PORT)]
    port: u16,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    swarm::logging::init("info");
    let cli = Cli::parse();

    let sink = Sink::bind(&format!("{}:{}", cli.host, cli.port)).await?;
    log::info!("listening on {}", sink.local_addr()?);

    let (tx, mut rx) = mpsc::unbounded_channel();
    let server = tokio::spawn(sink.run(tx));

    let mut count: u64 = 0;
    while let Some(capture) = rx.recv().await {
        count += 1;
        log::info!(
            "#{} from {} | {} bytes | {:?}",
            count,
            capture.peer,
            capture.payload.len(),
            String::from_utf8_lossy(&capture.payload)
        );
    }

    match server.await {
        Ok(result) => result,
        Err(err) => Err(std::io::Error::new(std::io::ErrorKind::Other, err)),
    }
}
