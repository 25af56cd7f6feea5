//! Tagged result of a claim or fallback lookup.

use std::fmt;

use serde::{Serialize, Serializer};

/// What a claim or [`any`](crate::Reaper::any) lookup produced, and where it
/// came from.
///
/// Serializes to the collapsed value: a string for the value-carrying
/// variants, `true` for [`Reaped::Flag`], and `null` for
/// [`Reaped::NotFound`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reaped {
    /// An option value claimed from the tokens (quotes normalized).
    Found(String),
    /// A flag claimed from the tokens, with no value.
    Flag,
    /// A value from the environment fallback.
    Env(String),
    /// The caller-supplied default.
    Default(String),
    /// Nothing matched.
    NotFound,
}

impl Reaped {
    /// The carried string, if any.
    pub fn value(&self) -> Option<&str> {
        match self {
            Reaped::Found(v) | Reaped::Env(v) | Reaped::Default(v) => Some(v),
            Reaped::Flag | Reaped::NotFound => None,
        }
    }

    /// Consume into the carried string, if any.
    pub fn into_value(self) -> Option<String> {
        match self {
            Reaped::Found(v) | Reaped::Env(v) | Reaped::Default(v) => Some(v),
            Reaped::Flag | Reaped::NotFound => None,
        }
    }

    /// Returns `true` for every variant except [`Reaped::NotFound`].
    pub fn is_present(&self) -> bool {
        !matches!(self, Reaped::NotFound)
    }

    /// Returns `true` for [`Reaped::Flag`].
    pub fn is_flag(&self) -> bool {
        matches!(self, Reaped::Flag)
    }

    /// Returns `true` if the result was claimed from the tokens.
    pub fn is_from_tokens(&self) -> bool {
        matches!(self, Reaped::Found(_) | Reaped::Flag)
    }
}

impl fmt::Display for Reaped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reaped::Found(v) | Reaped::Env(v) | Reaped::Default(v) => f.write_str(v),
            Reaped::Flag => f.write_str("true"),
            Reaped::NotFound => f.write_str("null"),
        }
    }
}

impl Serialize for Reaped {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Reaped::Found(v) | Reaped::Env(v) | Reaped::Default(v) => serializer.serialize_str(v),
            Reaped::Flag => serializer.serialize_bool(true),
            Reaped::NotFound => serializer.serialize_none(),
        }
    }
}
