//! The consumption engine.
//!
//! A [`Reaper`] owns the tokens that have not been claimed yet. Every
//! successful claim removes the matched token (and, for options, its value)
//! so later claims and positional scans never see it again.

use std::ops::Range;

use tracing::{debug, trace};

use crate::env::{Environment, Provider};
use crate::keys::{Keys, MatchMode, TokenMatch};
use crate::options::{BareOption, ReapOptions};
use crate::positional::{positionals, positionals_greedy};
use crate::prefix::detect_prefix_len;
use crate::quote::normalize_quotes;
use crate::reaped::Reaped;
use crate::token::{is_flag, is_terminator};

/// What a claim is looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Claim {
    /// A presence-only switch. Never takes the next token.
    Flag,
    /// An option value, inline (`--key=v`) or from the next token.
    Value,
}

/// Stateful argument consumer over one token sequence.
///
/// ```
/// use cli_reap_core::{Environment, Reaper};
///
/// let mut args = Reaper::strict(["node", "app.js", "-v", "--out", "a.txt", "in.txt"], Environment::new());
/// assert!(args.flag(["v", "verbose"]));
/// assert_eq!(args.opt("out").as_deref(), Some("a.txt"));
/// assert_eq!(args.pos(), vec!["in.txt"]);
/// ```
#[derive(Debug, Clone)]
pub struct Reaper {
    cmd: Vec<String>,
    cur: Vec<String>,
    end: bool,
    env: Environment,
    options: ReapOptions,
}

impl Reaper {
    /// Strict matching over `tokens` with `env` as the fallback.
    pub fn strict<I, S>(tokens: I, env: Environment) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_options(tokens, env, ReapOptions::strict())
    }

    /// Loose matching over `tokens` with `env` as the fallback.
    pub fn loose<I, S>(tokens: I, env: Environment) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_options(tokens, env, ReapOptions::loose())
    }

    /// Full control over matching and prefix detection.
    pub fn with_options<I, S>(tokens: I, env: Environment, options: ReapOptions) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cur: Vec<String> = tokens.into_iter().map(Into::into).collect();
        let end = cur.iter().any(|t| is_terminator(t));
        let prefix_len = options
            .fixed_prefix
            .map(|len| len.min(cur.len()))
            .unwrap_or_else(|| detect_prefix_len(cur.as_slice(), &options.runtimes, &options.run_marker));
        let cmd: Vec<String> = cur.drain(..prefix_len).collect();
        debug!(?cmd, args = cur.len(), end, "split invocation prefix");

        Self {
            cmd,
            cur,
            end,
            env,
            options,
        }
    }

    /// Tokens and environment from `provider`.
    pub fn from_provider<P: Provider + ?Sized>(provider: &P, options: ReapOptions) -> Self {
        Self::with_options(provider.tokens(), provider.environment(), options)
    }

    /// The detected invocation prefix.
    pub fn cmd(&self) -> &[String] {
        &self.cmd
    }

    /// Tokens not claimed so far.
    pub fn cur(&self) -> &[String] {
        &self.cur
    }

    /// Whether `--` appeared anywhere in the tokens as given, prefix included.
    pub fn end(&self) -> bool {
        self.end
    }

    /// The options this instance was built with.
    pub fn options(&self) -> &ReapOptions {
        &self.options
    }

    /// Matching mode in effect.
    pub fn mode(&self) -> MatchMode {
        self.options.mode
    }

    /// Claim a flag. Returns `true` and removes it if present.
    pub fn flag<K: Into<Keys>>(&mut self, keys: K) -> bool {
        self.claim(keys, Claim::Flag).is_present()
    }

    /// Claim an option value, removing the option and its value.
    ///
    /// The value may be empty (`--name=""`). Never reports a bare flag as a
    /// value.
    pub fn opt<K: Into<Keys>>(&mut self, keys: K) -> Option<String> {
        self.claim(keys, Claim::Value).into_value()
    }

    /// Option value, then flag, then environment.
    pub fn any<K: Into<Keys>>(&mut self, keys: K) -> Reaped {
        self.any_impl(&keys.into(), None)
    }

    /// Option value, then flag, then environment, then `default`.
    pub fn any_or<K: Into<Keys>, D: Into<String>>(&mut self, keys: K, default: D) -> Reaped {
        self.any_impl(&keys.into(), Some(default.into()))
    }

    fn any_impl(&mut self, keys: &Keys, default: Option<String>) -> Reaped {
        let found = self.claim_keys(keys, Claim::Value);
        if found.is_present() {
            return found;
        }
        let found = self.claim_keys(keys, Claim::Flag);
        if found.is_present() {
            return found;
        }
        if let Some(value) = self.env.resolve(keys, self.options.mode) {
            return Reaped::Env(value);
        }
        default.map_or(Reaped::NotFound, Reaped::Default)
    }

    /// Environment fallback only. Never touches the tokens.
    pub fn env<K: Into<Keys>>(&self, keys: K) -> Option<String> {
        self.env.resolve(&keys.into(), self.options.mode)
    }

    /// Whether a matching flag or option is still unclaimed, without
    /// claiming it.
    pub fn has<K: Into<Keys>>(&self, keys: K) -> bool {
        let candidates = self.options.mode.candidates(&keys.into());
        self.cur
            .iter()
            .take_while(|t| !is_terminator(t))
            .filter(|t| is_flag(t))
            .any(|t| candidates.iter().any(|c| self.options.mode.match_token(t, c).is_some()))
    }

    /// Positionals among the remaining tokens.
    pub fn pos(&self) -> Vec<String> {
        positionals(self.cur.as_slice())
    }

    /// Positionals, treating every unclaimed bare flag as an option that
    /// takes the following plain value.
    pub fn pos_greedy(&self) -> Vec<String> {
        positionals_greedy(self.cur.as_slice())
    }

    /// Claim at most one occurrence of `keys`.
    ///
    /// Returns [`Reaped::Found`] for a value, [`Reaped::Flag`] for a
    /// presence-only match, or [`Reaped::NotFound`] with the tokens left
    /// untouched.
    pub fn claim<K: Into<Keys>>(&mut self, keys: K, claim: Claim) -> Reaped {
        self.claim_keys(&keys.into(), claim)
    }

    fn claim_keys(&mut self, keys: &Keys, claim: Claim) -> Reaped {
        let candidates = self.options.mode.candidates(keys);
        match self.locate(&candidates, claim) {
            Some((span, reaped)) => {
                let removed: Vec<String> = self.cur.drain(span).collect();
                debug!(keys = ?keys.as_slice(), ?removed, ?claim, "claimed");
                reaped
            }
            None => {
                trace!(keys = ?keys.as_slice(), ?claim, "no match");
                Reaped::NotFound
            }
        }
    }

    /// Find the first claimable occurrence and the span it occupies.
    fn locate(&self, candidates: &[String], claim: Claim) -> Option<(Range<usize>, Reaped)> {
        if candidates.is_empty() {
            return None;
        }
        let mode = self.options.mode;

        for (i, token) in self.cur.iter().enumerate() {
            if is_terminator(token) {
                break;
            }
            if token.is_empty() || !is_flag(token) {
                continue;
            }
            let Some(hit) = candidates.iter().find_map(|c| mode.match_token(token, c)) else {
                continue;
            };

            match (claim, hit) {
                (Claim::Flag, _) => return Some((i..i + 1, Reaped::Flag)),
                (Claim::Value, TokenMatch::Inline(value)) => {
                    return Some((i..i + 1, Reaped::Found(normalize_quotes(value).to_owned())));
                }
                (Claim::Value, TokenMatch::Bare) => {
                    if let Some(next) = self.cur.get(i + 1).filter(|n| !is_terminator(n) && !is_flag(n)) {
                        return Some((i..i + 2, Reaped::Found(normalize_quotes(next).to_owned())));
                    }
                    if self.options.bare_option == BareOption::Presence {
                        return Some((i..i + 1, Reaped::Flag));
                    }
                }
            }
        }
        None
    }
}

/// Strict reaper over `tokens`.
pub fn cli_reap<I, S>(tokens: I, env: Environment) -> Reaper
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Reaper::strict(tokens, env)
}

/// Loose reaper over `tokens`: case-insensitive, `-` and `_` interchangeable.
pub fn cli_reap_loose<I, S>(tokens: I, env: Environment) -> Reaper
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Reaper::loose(tokens, env)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reap(tokens: &[&str]) -> Reaper {
        Reaper::strict(tokens.iter().copied(), Environment::new())
    }

    #[test]
    fn flag_is_claimed_once() {
        let mut r = reap(&["node", "script.js", "--flag"]);
        assert!(r.flag("flag"));
        assert!(!r.flag("flag"));
        assert!(r.cur().is_empty());
    }

    #[test]
    fn flag_never_takes_the_next_token() {
        let mut r = reap(&["./bin", "--flag", "value", "pos1"]);
        assert!(r.flag("flag"));
        assert_eq!(r.cur(), ["value", "pos1"]);
        assert_eq!(r.pos(), vec!["value", "pos1"]);
    }

    #[test]
    fn flag_claims_inline_shape() {
        let mut r = reap(&["./bin", "--flag=value"]);
        assert!(r.flag("flag"));
        assert!(r.cur().is_empty());
    }

    #[test]
    fn repeated_options_are_fifo() {
        let mut r = reap(&["--out", "one", "--out", "two"]);
        assert_eq!(r.opt("out").as_deref(), Some("one"));
        assert_eq!(r.opt("out").as_deref(), Some("two"));
        assert_eq!(r.opt("out"), None);
    }

    #[test]
    fn option_shapes_normalize_alike() {
        for tokens in [
            ["./bin", "--key=\"X\""],
            ["./bin", "--key='X'"],
            ["./bin", "--key=X"],
        ] {
            assert_eq!(reap(&tokens).opt("key").as_deref(), Some("X"), "{tokens:?}");
        }
        assert_eq!(reap(&["./bin", "--key", "X"]).opt("key").as_deref(), Some("X"));
        assert_eq!(reap(&["./bin", "--key", "'X'"]).opt("key").as_deref(), Some("X"));
    }

    #[test]
    fn bare_option_is_skipped_by_default() {
        let mut r = reap(&["./bin", "--out", "--verbose", "--out", "b.txt"]);
        assert_eq!(r.opt("out").as_deref(), Some("b.txt"));
        assert_eq!(r.cur(), ["--out", "--verbose"]);
        assert_eq!(r.opt("out"), None);
        assert_eq!(r.cur(), ["--out", "--verbose"]);
    }

    #[test]
    fn bare_option_presence_policy() {
        let opts = ReapOptions::strict().with_bare_option(BareOption::Presence);
        let mut r = Reaper::with_options(["./bin", "--out", "--", "x"], Environment::new(), opts);
        assert_eq!(r.claim("out", Claim::Value), Reaped::Flag);
        assert_eq!(r.cur(), ["--", "x"]);
        assert_eq!(r.opt("out"), None);
    }

    #[test]
    fn option_value_may_be_negative_number() {
        let mut r = reap(&["./bin", "--offset", "-5", "rest"]);
        assert_eq!(r.opt("offset").as_deref(), Some("-5"));
        assert_eq!(r.pos(), vec!["rest"]);
    }

    #[test]
    fn terminator_stops_claims() {
        let mut r = reap(&["./bin", "--", "--flag", "--out", "x"]);
        assert!(!r.flag("flag"));
        assert_eq!(r.opt("out"), None);
        assert!(r.end());
        assert_eq!(r.pos(), vec!["--flag", "--out", "x"]);
    }

    #[test]
    fn value_stops_before_terminator() {
        let mut r = reap(&["./bin", "--out", "--", "x"]);
        assert_eq!(r.opt("out"), None);
        assert_eq!(r.cur(), ["--out", "--", "x"]);
    }

    #[test]
    fn any_priority() {
        let env = Environment::from_primary([("out", "env")]);
        let mut r = Reaper::strict(["./bin", "--out", "a", "--out"], env);
        assert_eq!(r.any("out"), Reaped::Found("a".into()));
        assert_eq!(r.any("out"), Reaped::Flag);
        assert_eq!(r.any("out"), Reaped::Env("env".into()));
        assert_eq!(r.any_or("missing", "dflt"), Reaped::Default("dflt".into()));
        assert_eq!(r.any("missing"), Reaped::NotFound);
    }

    #[test]
    fn has_does_not_consume() {
        let r = reap(&["./bin", "-v", "--", "--out"]);
        assert!(r.has("v"));
        assert!(r.has(["x", "v"]));
        assert!(!r.has("out"));
        assert_eq!(r.cur(), ["-v", "--", "--out"]);
    }

    #[test]
    fn fixed_prefix_overrides_detection() {
        let r = Reaper::with_options(
            ["node", "a", "b"],
            Environment::new(),
            ReapOptions::strict().with_fixed_prefix(1),
        );
        assert_eq!(r.cmd(), ["node"]);
        assert_eq!(r.cur(), ["a", "b"]);

        let r = Reaper::with_options(["x"], Environment::new(), ReapOptions::strict().with_fixed_prefix(5));
        assert_eq!(r.cmd(), ["x"]);
        assert!(r.cur().is_empty());
    }

    #[test]
    fn end_sees_the_whole_sequence() {
        assert!(reap(&["--", "a"]).end());
        assert!(!reap(&["./bin", "a"]).end());
    }
}
