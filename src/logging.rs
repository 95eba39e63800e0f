//! Logging System
//!
//! Structured diagnostics via `tracing`. Everything goes to stderr because
//! stdout may carry the generated source.

use std::io::IsTerminal;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding an `EnvFilter` directive, e.g. `pack_assets=trace`
pub const LOG_ENV: &str = "PACK_ASSETS_LOG";

/// Initialize the global subscriber.
///
/// Priority order (highest to lowest):
/// 1. `PACK_ASSETS_LOG`
/// 2. `--verbose` (debug)
/// 3. warn
pub fn init_logging(verbose: bool) {
    let filter = build_env_filter(verbose);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_ansi(std::io::stderr().is_terminal())
                .with_writer(std::io::stderr),
        )
        .try_init();
}

fn build_env_filter(verbose: bool) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        return filter;
    }
    EnvFilter::new(default_level(verbose))
}

fn default_level(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}
