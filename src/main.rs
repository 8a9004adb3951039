use clap::Parser;
use std::time::Duration;

use swarm::driver::{self, Config};

/// Open concurrent clients that each send one GET request.
#[derive(Parser, Debug)]
#[command(name = "swarm", about = "Concurrent connection load driver")]
struct Cli {
    /// Target host.
    #[arg(long, default_value = driver::DEFAULT_HOST)]
    host: String,

    /// Target port.
    #[arg(long, default_value_t = driver::DEFAULT_PORT)]
    port: u16,

    /// Number of simultaneous clients.
    #[arg(short, long, default_value_t = driver::DEFAULT_CONCURRENCY)]
    concurrency: usize,

    /// Give up on a connect after this many milliseconds.
    #[arg(long)]
    connect_timeout_ms: Option<u64>,
}

#[tokio::main]
async fn main() {
    swarm::logging::init("info");
    let cli = Cli::parse();

    let config = Config {
        host: cli.host,
        port: cli.port,
        concurrency: cli.concurrency,
        connect_timeout: cli.connect_timeout_ms.map(Duration::from_millis),
        ..Config::default()
    };

    let report = swarm::run(&config).await;
    println!("{}", report.summary());
}
