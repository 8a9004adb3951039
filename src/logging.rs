use env_logger::{Builder, Env};
use std::io::Write;

// env var holding the filter, e.g. LOG_LEVEL=debug
pub const LOG_ENV: &str = "LOG_LEVEL";

/// Logger builder with the project line format:
/// `LEVEL | file:line | timestamp | message`.
pub fn builder(default_filter: &str) -> Builder {
    let mut builder = Builder::from_env(Env::default().filter_or(LOG_ENV, default_filter));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{:5} | {:>15}:{:<4} | {} | {}",
            record.level(),
            record.file().unwrap_or("unknown file"),
            record.line().unwrap_or(0),
            buf.timestamp(),
            record.args()
        )
    });
    builder
}

pub fn init(default_filter: &str) {
    builder(default_filter).init();
}
