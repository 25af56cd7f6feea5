//! Key requests and token matching.
//!
//! A caller asks for one key or a list of alternatives (`["o", "out"]`).
//! [`MatchMode`] expands that request into the candidate spellings to try,
//! and [`MatchMode::match_token`] tests one candidate against one flag-like
//! token.

use serde::{Deserialize, Serialize};

use crate::token::is_flag;

/// One key or an ordered list of alternative keys.
///
/// Built from the usual string shapes, so every claim operation accepts
/// `"out"`, `["o", "out"]`, `&["o", "out"][..]` or a `Vec<String>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keys(Vec<String>);

impl Keys {
    /// The requested keys, in order.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Returns `true` if no usable key was requested.
    pub fn is_degenerate(&self) -> bool {
        self.0.iter().all(|k| is_degenerate_key(k))
    }
}

impl From<&str> for Keys {
    fn from(key: &str) -> Self {
        Keys(vec![key.to_owned()])
    }
}

impl From<String> for Keys {
    fn from(key: String) -> Self {
        Keys(vec![key])
    }
}

impl From<&String> for Keys {
    fn from(key: &String) -> Self {
        Keys(vec![key.clone()])
    }
}

impl From<&[&str]> for Keys {
    fn from(keys: &[&str]) -> Self {
        Keys(keys.iter().map(|k| (*k).to_owned()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Keys {
    fn from(keys: [&str; N]) -> Self {
        Keys(keys.iter().map(|k| (*k).to_owned()).collect())
    }
}

impl From<Vec<&str>> for Keys {
    fn from(keys: Vec<&str>) -> Self {
        Keys(keys.into_iter().map(str::to_owned).collect())
    }
}

impl From<Vec<String>> for Keys {
    fn from(keys: Vec<String>) -> Self {
        Keys(keys)
    }
}

impl From<&[String]> for Keys {
    fn from(keys: &[String]) -> Self {
        Keys(keys.to_vec())
    }
}

impl From<&Keys> for Keys {
    fn from(keys: &Keys) -> Self {
        keys.clone()
    }
}

/// How requested keys are compared with tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Case-sensitive, exact spelling.
    #[default]
    Strict,
    /// Case-insensitive; `-` and `_` in a key are interchangeable.
    Loose,
}

/// How a flag-like token matched a candidate key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenMatch<'t> {
    /// `--key`: any value has to come from the next token.
    Bare,
    /// `--key=value`: the raw text after the first `=`.
    Inline(&'t str),
}

impl MatchMode {
    /// Expand `keys` into the candidate spellings to test, in request order.
    ///
    /// Degenerate keys (empty, whitespace-only, dashes only) are dropped. In
    /// loose mode each key is followed by its separator-swapped form: `_`
    /// becomes `-` when the key contains `_`, otherwise `-` becomes `_`. A
    /// literal key's leading dash run is kept as is.
    pub fn candidates(self, keys: &Keys) -> Vec<String> {
        let mut out: Vec<String> = Vec::with_capacity(keys.0.len() * 2);
        for key in keys.0.iter().filter(|k| !is_degenerate_key(k)) {
            push_unique(&mut out, key.clone());
            if self == MatchMode::Loose {
                push_unique(&mut out, swap_separators(key));
            }
        }
        out
    }

    /// Test `candidate` against a flag-like `token`.
    ///
    /// The token's key portion is everything before its first `=`. Unless
    /// the candidate is itself flag-like (`-key`, `--key`), the token's
    /// leading dash run is stripped first. The key portion must equal the
    /// candidate exactly; prefixes and substrings never match.
    pub fn match_token<'t>(self, token: &'t str, candidate: &str) -> Option<TokenMatch<'t>> {
        if is_degenerate_key(candidate) {
            return None;
        }
        let body = if is_flag(candidate) {
            token
        } else {
            token.trim_start().trim_start_matches('-')
        };
        let (name, found) = match body.split_once('=') {
            Some((name, value)) => (name, TokenMatch::Inline(value)),
            None => (body, TokenMatch::Bare),
        };
        self.key_eq(name, candidate).then_some(found)
    }

    fn key_eq(self, name: &str, candidate: &str) -> bool {
        match self {
            MatchMode::Strict => name == candidate,
            MatchMode::Loose => name == candidate || name.to_lowercase() == candidate.to_lowercase(),
        }
    }
}

fn is_degenerate_key(key: &str) -> bool {
    key.trim().trim_matches('-').is_empty()
}

fn swap_separators(key: &str) -> String {
    let body = key.trim_start_matches('-');
    let dashes = &key[..key.len() - body.len()];
    let swapped = if body.contains('_') {
        body.replace('_', "-")
    } else {
        body.replace('-', "_")
    };
    format!("{dashes}{swapped}")
}

fn push_unique(out: &mut Vec<String>, key: String) {
    if !out.contains(&key) {
        out.push(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_candidates_are_the_request() {
        let keys = Keys::from(["o", "out-file"]);
        assert_eq!(MatchMode::Strict.candidates(&keys), vec!["o", "out-file"]);
    }

    #[test]
    fn loose_candidates_swap_separators() {
        assert_eq!(
            MatchMode::Loose.candidates(&Keys::from("i-test")),
            vec!["i-test", "i_test"]
        );
        assert_eq!(
            MatchMode::Loose.candidates(&Keys::from("i_test")),
            vec!["i_test", "i-test"]
        );
        assert_eq!(MatchMode::Loose.candidates(&Keys::from("plain")), vec!["plain"]);
        assert_eq!(
            MatchMode::Loose.candidates(&Keys::from("--dry-run")),
            vec!["--dry-run", "--dry_run"]
        );
    }

    #[test]
    fn degenerate_keys_are_dropped() {
        for key in ["", " ", "\t", "-", "--", " - "] {
            assert!(MatchMode::Strict.candidates(&Keys::from(key)).is_empty(), "{key:?}");
            assert!(Keys::from(key).is_degenerate());
        }
        assert!(!Keys::from(["", "ok"]).is_degenerate());
    }

    #[test]
    fn bare_and_inline_shapes() {
        let m = MatchMode::Strict;
        assert_eq!(m.match_token("--out", "out"), Some(TokenMatch::Bare));
        assert_eq!(m.match_token("-out", "out"), Some(TokenMatch::Bare));
        assert_eq!(m.match_token("---out", "out"), Some(TokenMatch::Bare));
        assert_eq!(m.match_token("--out=a.txt", "out"), Some(TokenMatch::Inline("a.txt")));
        assert_eq!(m.match_token("--out=", "out"), Some(TokenMatch::Inline("")));
        assert_eq!(
            m.match_token("-key===<this/works>", "key"),
            Some(TokenMatch::Inline("==<this/works>"))
        );
    }

    #[test]
    fn no_prefix_or_substring_matches() {
        let m = MatchMode::Strict;
        assert_eq!(m.match_token("--flag-o", "flag"), None);
        assert_eq!(m.match_token("--flag", "f"), None);
        assert_eq!(m.match_token("--flag-o=x", "flag"), None);
        assert_eq!(m.match_token("--other-flag", "flag"), None);
    }

    #[test]
    fn literal_dashed_keys_compare_verbatim() {
        let m = MatchMode::Strict;
        assert_eq!(m.match_token("--key", "--key"), Some(TokenMatch::Bare));
        assert_eq!(m.match_token("--key", "-key"), None);
        assert_eq!(m.match_token("--key", "---key"), None);
        assert_eq!(m.match_token("-key", "-key"), Some(TokenMatch::Bare));
        assert_eq!(m.match_token("-key=v", "-key"), Some(TokenMatch::Inline("v")));
    }

    #[test]
    fn case_rules_follow_mode() {
        assert_eq!(MatchMode::Strict.match_token("--I", "i"), None);
        assert_eq!(MatchMode::Strict.match_token("--I", "I"), Some(TokenMatch::Bare));
        assert_eq!(MatchMode::Loose.match_token("--I", "i"), Some(TokenMatch::Bare));
        assert_eq!(MatchMode::Loose.match_token("-i=x", "I"), Some(TokenMatch::Inline("x")));
    }
}
