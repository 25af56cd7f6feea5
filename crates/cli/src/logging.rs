//! Tracing subscriber setup for the `reap` binary.
//!
//! Log filtering is resolved in priority order:
//! 1. `REAP_LOG`
//! 2. `RUST_LOG`
//! 3. the `-v` count on the command line
//!
//! Everything goes to stderr so stdout stays a clean report (and valid JSON
//! under `--output json`).

use std::io::{self, IsTerminal};

use tracing::Level;

/// Environment variable checked before `RUST_LOG`.
const LOG_ENV: &str = "REAP_LOG";

/// Install the global subscriber.
///
/// - `0`: WARN and ERROR only, bare message format
/// - `1`: INFO, with target
/// - `2`: DEBUG, with target
/// - `3+`: TRACE, with target
///
/// Must be called at most once per process.
pub(crate) fn init(verbose: u8) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_ascii_lowercase()));

    let use_ansi = io::stderr().is_terminal();
    let simple = verbose == 0;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(!simple)
                .with_level(true)
                .with_ansi(use_ansi)
                .without_time(),
        )
        .init();
}
