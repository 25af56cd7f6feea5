//! Invocation-prefix detection.
//!
//! Raw process tokens begin with whatever launched the program: a runtime
//! and script (`node script.js`), a runner subcommand (`bun run script.ts`),
//! or just an executable path. The detector picks how many leading tokens
//! belong to that invocation so the rest can be treated as arguments.

use crate::token::is_flag;

/// Number of leading tokens that make up the invocation.
///
/// - `tokens[0]` is one of `runtimes`: 2 (runtime and script)
/// - `tokens[1]` equals `run_marker`: 3 (runtime, marker, script)
/// - `tokens[0]` is flag-like: 0 (the sequence is all arguments)
/// - otherwise: 1 (an executable path)
///
/// The result never exceeds `tokens.len()`. Only the first two tokens are
/// inspected.
pub fn detect_prefix_len<S: AsRef<str>>(tokens: &[S], runtimes: &[String], run_marker: &str) -> usize {
    let first = tokens.first().map(AsRef::as_ref);
    let second = tokens.get(1).map(AsRef::as_ref);

    let len = if first.is_some_and(|t| runtimes.iter().any(|r| r == t)) {
        2
    } else if second == Some(run_marker) {
        3
    } else if first.is_some_and(is_flag) {
        0
    } else {
        1
    };
    len.min(tokens.len())
}
