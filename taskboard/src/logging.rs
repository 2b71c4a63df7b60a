//! Tracing subscriber setup for hosts embedding the board

use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

/// Install a stderr subscriber filtered at `level`.
///
/// `RUST_LOG` takes precedence when set. Returns false if a global
/// subscriber was already installed.
pub fn init_logging(level: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("hyper=warn,reqwest=warn,{level}")));

    registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .is_ok()
}
