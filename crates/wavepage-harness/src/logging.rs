#![forbid(unsafe_code)]

//! Tracing subscriber setup for the harness binary.
//!
//! Logs go to stderr so stdout carries only the JSONL trace. `RUST_LOG`
//! overrides the default filter.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub const DEFAULT_FILTER: &str = "wavepage=info";
pub const VERBOSE_FILTER: &str = "wavepage=debug";

/// Install the global subscriber. A second call is a no-op.
pub fn init_tracing(json: bool, default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let registry = tracing_subscriber::registry().with(filter);
    let result = if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };
    if result.is_err() {
        tracing::debug!(target: "wavepage.harness", "tracing subscriber already installed");
    }
}
