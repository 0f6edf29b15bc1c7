//! Common error types used across the workspace.
//!
//! Two failure families exist, both fatal for code generation:
//! - [`ValidationError`]: the configuration mapping does not match the schema
//! - [`ResolutionError`]: a sibling reference cannot be resolved
//!
//! Each layer defines its own typed errors and converts into
//! [`LifeMatrixError`] via `#[from]`.

use std::fmt;

use crate::id::{ComponentId, ComponentKind, InvalidId};
use crate::time_period::TimePeriodError;

/// Base error for the LifeMatrix adapter.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LifeMatrixError {
    #[error("invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error("unresolved reference: {0}")]
    Resolution(#[from] ResolutionError),
}

/// Location of a value inside the configuration mapping, e.g.
/// `game_of_life -> update_interval`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigPath(Vec<String>);

impl ConfigPath {
    /// The root of the configuration mapping.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Path pointing at `key` directly under the root.
    #[must_use]
    pub fn key(key: impl Into<String>) -> Self {
        Self(vec![key.into()])
    }

    /// Path pointing at `key` under `self`.
    #[must_use]
    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(key.into());
        Self(segments)
    }
}

impl fmt::Display for ConfigPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        f.write_str(&self.0.join(" -> "))
    }
}

/// A schema violation at a specific path.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("[{path}] {kind}")]
pub struct ValidationError {
    pub path: ConfigPath,
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    #[must_use]
    pub fn new(path: ConfigPath, kind: ValidationErrorKind) -> Self {
        Self { path, kind }
    }
}

/// What went wrong with a single value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationErrorKind {
    #[error("required key not provided")]
    MissingRequired,

    #[error("extra keys not allowed")]
    UnknownKey,

    #[error("expected a dictionary, got {0}")]
    ExpectedMapping(String),

    #[error("expected boolean value, got {0}")]
    ExpectedBool(String),

    #[error("expected integer, got {0}")]
    ExpectedInt(String),

    #[error("this option only accepts integers with no fractional part, got {0}")]
    FractionalInt(f64),

    #[error("expected float, got {0}")]
    ExpectedFloat(String),

    #[error("value {value} is out of range [{min}, {max}]")]
    OutOfRange { value: i64, min: i64, max: i64 },

    #[error("string value cannot be dictionary or list")]
    ExpectedString,

    #[error("auto-converted this value to boolean, please wrap the value in quotes")]
    UnquotedBool,

    #[error("unknown value '{value}', valid options are {options}")]
    UnknownOption { value: String, options: String },

    #[error(transparent)]
    TimePeriod(#[from] TimePeriodError),

    #[error(transparent)]
    InvalidId(#[from] InvalidId),
}

/// A sibling reference that could not be turned into a handle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionError {
    #[error(
        "[{key}] couldn't find ID '{id}'. Please check you have defined an ID with that name in your configuration"
    )]
    NotFound { key: String, id: ComponentId },

    #[error("[{key}] ID '{id}' of type {actual} doesn't inherit from {expected}")]
    KindMismatch {
        key: String,
        id: ComponentId,
        expected: ComponentKind,
        actual: ComponentKind,
    },

    #[error("ID '{id}' redefined")]
    DuplicateId { id: ComponentId },
}
