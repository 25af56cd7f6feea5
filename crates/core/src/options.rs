//! Engine configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::keys::MatchMode;
use crate::token::is_flag;

/// Errors that can occur when loading [`ReapOptions`].
#[derive(Debug, Error)]
pub enum OptionsError {
    /// JSON deserialization failed.
    #[error("invalid options JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A field holds a value the engine cannot use.
    #[error("invalid {field}: {reason}")]
    InvalidField {
        /// The name of the field that failed validation.
        field: String,
        /// A human-readable explanation of why the field value is invalid.
        reason: String,
    },
}

/// What a value claim does when the matched option has no value.
///
/// Applies to a bare `--key` whose next token is missing, is `--`, or is
/// itself flag-like.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BareOption {
    /// Leave the token in place and keep scanning for a later occurrence.
    #[default]
    Skip,
    /// Claim the token and report it as a flag.
    Presence,
}

/// Configuration for a [`Reaper`](crate::Reaper).
///
/// Every field has a default, so a JSON options file only needs the fields
/// it changes:
///
/// ```
/// let opts = cli_reap_core::load_options_from_str(r#"{ "mode": "loose" }"#).unwrap();
/// assert_eq!(opts.mode, cli_reap_core::MatchMode::Loose);
/// assert_eq!(opts.runtimes, vec!["node".to_string()]);
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReapOptions {
    /// Key comparison rules.
    pub mode: MatchMode,
    /// Value claims against options with no value.
    pub bare_option: BareOption,
    /// First tokens that mean "runtime followed by a script" (prefix of 2).
    pub runtimes: Vec<String>,
    /// Second token that means "runner subcommand" (prefix of 3).
    pub run_marker: String,
    /// Skip detection and strip exactly this many leading tokens.
    pub fixed_prefix: Option<usize>,
}

impl Default for ReapOptions {
    fn default() -> Self {
        Self {
            mode: MatchMode::Strict,
            bare_option: BareOption::Skip,
            runtimes: vec!["node".to_owned()],
            run_marker: "run".to_owned(),
            fixed_prefix: None,
        }
    }
}

impl ReapOptions {
    /// Defaults with strict matching.
    pub fn strict() -> Self {
        Self::default()
    }

    /// Defaults with loose matching.
    pub fn loose() -> Self {
        Self::default().with_mode(MatchMode::Loose)
    }

    /// Set the matching mode.
    #[must_use]
    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the bare-option policy.
    #[must_use]
    pub fn with_bare_option(mut self, bare_option: BareOption) -> Self {
        self.bare_option = bare_option;
        self
    }

    /// Replace the runtime names used by prefix detection.
    #[must_use]
    pub fn with_runtimes<I, S>(mut self, runtimes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.runtimes = runtimes.into_iter().map(Into::into).collect();
        self
    }

    /// Strip exactly `len` leading tokens instead of detecting the prefix.
    #[must_use]
    pub fn with_fixed_prefix(mut self, len: usize) -> Self {
        self.fixed_prefix = Some(len);
        self
    }
}

/// Load and validate [`ReapOptions`] from a JSON string.
///
/// Missing fields take their defaults. Unknown fields are rejected.
/// Validation after deserialization:
/// - every entry of `runtimes` must be non-empty and not flag-like
/// - `run_marker` must be non-empty and not flag-like
pub fn load_options_from_str(s: &str) -> Result<ReapOptions, OptionsError> {
    let options: ReapOptions = serde_json::from_str(s)?;

    if let Some(bad) = options.runtimes.iter().find(|r| r.trim().is_empty()) {
        return Err(OptionsError::InvalidField {
            field: "runtimes".into(),
            reason: format!("{bad:?} is empty"),
        });
    }
    if let Some(bad) = options.runtimes.iter().find(|r| is_flag(r)) {
        return Err(OptionsError::InvalidField {
            field: "runtimes".into(),
            reason: format!("{bad:?} looks like a flag"),
        });
    }
    if options.run_marker.trim().is_empty() {
        return Err(OptionsError::InvalidField {
            field: "run_marker".into(),
            reason: "must not be empty".into(),
        });
    }
    if is_flag(&options.run_marker) {
        return Err(OptionsError::InvalidField {
            field: "run_marker".into(),
            reason: format!("{:?} looks like a flag", options.run_marker),
        });
    }

    Ok(options)
}
