//! cli-reap core library.
//!
//! A stateful argument consumption engine. Build a [`Reaper`] over raw
//! process tokens, claim the flags and options you know about with
//! [`Reaper::flag`], [`Reaper::opt`] and [`Reaper::any`], and whatever is
//! left comes back from [`Reaper::pos`] as positionals.
//!
//! ```
//! use cli_reap_core::{Environment, Reaped, cli_reap};
//!
//! let env = Environment::from_primary([("LOG_LEVEL", "info")]);
//! let mut args = cli_reap(["node", "build.js", "--out=dist", "src", "--", "-x"], env);
//!
//! assert_eq!(args.cmd(), ["node", "build.js"]);
//! assert_eq!(args.opt("out").as_deref(), Some("dist"));
//! assert_eq!(args.any("LOG_LEVEL"), Reaped::Env("info".into()));
//! assert_eq!(args.pos(), vec!["src", "-x"]);
//! assert!(args.end());
//! ```

#![warn(missing_docs)]

/// Environment fallback and token providers.
pub mod env;
/// Key requests and matching modes.
pub mod keys;
/// Engine configuration and its JSON loader.
pub mod options;
/// Read-only positional scans.
pub mod positional;
/// Invocation-prefix detection.
pub mod prefix;
/// Surrounding-quote normalization.
pub mod quote;
/// Tagged claim results.
pub mod reaped;
/// The consumption engine.
pub mod reaper;
/// Token classification.
pub mod token;

// ── Convenience re-exports ──────────────────────────────────────────────────

// Engine
pub use reaper::{Claim, Reaper, cli_reap, cli_reap_loose};

// Results
pub use reaped::Reaped;

// Keys
pub use keys::{Keys, MatchMode, TokenMatch};

// Environment
pub use env::{Environment, ProcessProvider, Provider, StaticProvider};

// Options
pub use options::{BareOption, OptionsError, ReapOptions, load_options_from_str};

// Building blocks
pub use positional::{positionals, positionals_greedy};
pub use prefix::detect_prefix_len;
pub use quote::normalize_quotes;
pub use token::{is_flag, is_numeric, is_terminator};
