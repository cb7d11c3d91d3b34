//! Logging infrastructure for Lunara.
//!
//! Centralized tracing setup shared by the CLI (and any future frontends).

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize logging with sensible defaults
///
/// Compact format, filtered by `RUST_LOG` when set, INFO otherwise.
pub fn init() {
    init_with_level("info")
}

/// Initialize logging with a specific default level
///
/// `RUST_LOG` still takes precedence when present.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}
