//! Environment fallback and token providers.
//!
//! The engine never reads process state on its own. Tokens and the two
//! ranked key/value maps come from a [`Provider`] (or are passed in
//! directly), which keeps every lookup deterministic under test.

use std::collections::HashMap;

use crate::keys::{Keys, MatchMode};

/// Ranked key/value sources consulted when a key is not on the command line.
///
/// `primary` plays the role of the process environment and wins over
/// `secondary`, which holds runtime-set or application-wide fallbacks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    primary: HashMap<String, String>,
    secondary: HashMap<String, String>,
}

impl Environment {
    /// An environment with no entries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a primary map only.
    pub fn from_primary<I, K, V>(primary: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::new().with_primary(primary)
    }

    /// Replace the primary entries.
    #[must_use]
    pub fn with_primary<I, K, V>(mut self, primary: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.primary = collect_map(primary);
        self
    }

    /// Replace the secondary entries.
    #[must_use]
    pub fn with_secondary<I, K, V>(mut self, secondary: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.secondary = collect_map(secondary);
        self
    }

    /// Insert primary entries, overwriting existing keys.
    #[must_use]
    pub fn overlay_primary<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.primary.extend(collect_map(entries));
        self
    }

    /// The current process environment as the primary source.
    ///
    /// Entries that are not valid UTF-8 are converted lossily.
    pub fn from_process() -> Self {
        Self::new().with_primary(
            std::env::vars_os()
                .map(|(k, v)| (k.to_string_lossy().into_owned(), v.to_string_lossy().into_owned())),
        )
    }

    /// Look up one exact key: primary first, then secondary.
    ///
    /// A key present in the primary map decides the answer even when its
    /// value is empty; the secondary map is only consulted when the key is
    /// absent from the primary.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.primary
            .get(key)
            .or_else(|| self.secondary.get(key))
            .map(String::as_str)
    }

    /// Resolve `keys` to the first non-empty value.
    ///
    /// Candidates come from `mode` in request order; each is looked up with
    /// [`Environment::get`]. Empty values count as present (they shadow the
    /// secondary map) but are never returned.
    pub fn resolve(&self, keys: &Keys, mode: MatchMode) -> Option<String> {
        mode.candidates(keys)
            .iter()
            .filter_map(|key| self.get(key))
            .find(|value| !value.is_empty())
            .map(str::to_owned)
    }
}

fn collect_map<I, K, V>(entries: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    entries
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Source of the raw token sequence and its environment.
pub trait Provider {
    /// The full raw token sequence, invocation included.
    fn tokens(&self) -> Vec<String>;

    /// Ranked fallback values for the tokens.
    fn environment(&self) -> Environment;
}

/// Reads `std::env::args_os` and `std::env::vars_os`.
///
/// The secondary map starts empty; set it with
/// [`ProcessProvider::with_globals`].
#[derive(Debug, Clone, Default)]
pub struct ProcessProvider {
    globals: HashMap<String, String>,
}

impl ProcessProvider {
    /// A provider for the running process.
    pub fn new() -> Self {
        Self::default()
    }

    /// Application-wide fallbacks consulted after the process environment.
    #[must_use]
    pub fn with_globals<I, K, V>(mut self, globals: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.globals = collect_map(globals);
        self
    }
}

impl Provider for ProcessProvider {
    fn tokens(&self) -> Vec<String> {
        std::env::args_os()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    fn environment(&self) -> Environment {
        Environment::from_process().with_secondary(self.globals.clone())
    }
}

/// A provider with fixed tokens and environment.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    tokens: Vec<String>,
    environment: Environment,
}

impl StaticProvider {
    /// Fixed `tokens` with `environment`.
    pub fn new<I, S>(tokens: I, environment: Environment) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
            environment,
        }
    }
}

impl Provider for StaticProvider {
    fn tokens(&self) -> Vec<String> {
        self.tokens.clone()
    }

    fn environment(&self) -> Environment {
        self.environment.clone()
    }
}
