pub mod config;
pub mod draw;
pub mod feed;
pub mod map;

pub use config::Config;
pub use map::{TimeDisplay, TrafficMap, TrafficView};

/// Log to stderr, filtered by `RUST_LOG` and `info` when that isn't set
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
