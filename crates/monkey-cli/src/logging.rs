//! Tracing setup
//!
//! Logging stays off unless `MONKEY_LOG` (or `RUST_LOG`) holds a filter.
//! Events go to stderr so program output on stdout is unaffected.

use std::env;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter directive from `MONKEY_LOG`, falling back to `RUST_LOG`
fn filter_from_env() -> Option<String> {
    env::var("MONKEY_LOG")
        .or_else(|_| env::var("RUST_LOG"))
        .ok()
        .filter(|value| !value.trim().is_empty())
}

/// Install the global subscriber if a filter is configured
pub fn init() {
    let Some(directives) = filter_from_env() else {
        return;
    };

    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("warn"));

    // A subscriber may already be installed (tests); keep the existing one
    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .with(filter)
        .try_init();
}
