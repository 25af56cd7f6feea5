//! Shared test helpers for `cli_reap_core` integration tests.

#![allow(unreachable_pub)]

use cli_reap_core::{Environment, Reaper};

/// Strict reaper with an empty environment.
#[allow(dead_code)]
pub fn strict(tokens: &[&str]) -> Reaper {
    Reaper::strict(tokens.iter().copied(), Environment::new())
}

/// Loose reaper with an empty environment.
#[allow(dead_code)]
pub fn loose(tokens: &[&str]) -> Reaper {
    Reaper::loose(tokens.iter().copied(), Environment::new())
}

/// `node script.js` followed by `args`.
#[allow(dead_code)]
pub fn node(args: &[&str]) -> Vec<String> {
    ["node", "script.js"]
        .iter()
        .chain(args)
        .map(|s| (*s).to_owned())
        .collect()
}

/// Strict reaper over `node script.js` followed by `args`.
#[allow(dead_code)]
pub fn strict_node(args: &[&str]) -> Reaper {
    Reaper::strict(node(args), Environment::new())
}

/// Loose reaper over `node script.js` followed by `args`.
#[allow(dead_code)]
pub fn loose_node(args: &[&str]) -> Reaper {
    Reaper::loose(node(args), Environment::new())
}
