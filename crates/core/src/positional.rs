//! Positional extraction over the remaining tokens.
//!
//! Both scans are read-only. They report what is left after claims; they
//! never claim anything themselves.

use crate::token::{is_flag, is_terminator};

/// Collect the positional tokens from `tokens`.
///
/// Empty tokens are skipped, flag-like tokens are skipped, and every token
/// after the first `--` is positional no matter its shape.
pub fn positionals<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    let mut out = Vec::new();
    for (i, token) in tokens.iter().map(AsRef::as_ref).enumerate() {
        if token.is_empty() {
            continue;
        }
        if is_terminator(token) {
            out.extend(tokens[i + 1..].iter().map(|t| t.as_ref().to_owned()));
            return out;
        }
        if !is_flag(token) {
            out.push(token.to_owned());
        }
    }
    out
}

/// Like [`positionals`], but a bare flag (no `=`) also hides the plain value
/// that follows it.
///
/// Useful before the caller has claimed anything: `--out file.txt in.txt`
/// yields `["in.txt"]` rather than `["file.txt", "in.txt"]`.
pub fn positionals_greedy<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_ref();
        i += 1;
        if token.is_empty() {
            continue;
        }
        if is_terminator(token) {
            out.extend(tokens[i..].iter().map(|t| t.as_ref().to_owned()));
            return out;
        }
        if is_flag(token) {
            let takes_next = !token.contains('=')
                && tokens
                    .get(i)
                    .map(AsRef::as_ref)
                    .is_some_and(|next| !is_terminator(next) && !is_flag(next));
            if takes_next {
                i += 1;
            }
            continue;
        }
        out.push(token.to_owned());
    }
    out
}
