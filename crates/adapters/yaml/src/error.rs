//! Document loading errors.

use std::path::PathBuf;

use lifematrix_domain::error::{LifeMatrixError, ResolutionError};

/// Errors raised while reading a device document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// The document could not be read from disk.
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The text is not valid YAML.
    #[error("failed to parse YAML document")]
    Parse(#[from] serde_yaml::Error),

    /// The top level of the document is not a mapping.
    #[error("device document must be a mapping, got {0}")]
    NotAMapping(&'static str),

    /// The component block is absent.
    #[error("component block '{0}' not found in device document")]
    MissingComponent(String),

    /// A sibling block declares an id that cannot be registered.
    #[error("[{block}] {reason}")]
    InvalidSibling { block: String, reason: String },

    /// A domain-level error (duplicate sibling id).
    #[error(transparent)]
    Domain(#[from] LifeMatrixError),
}

impl From<ResolutionError> for DocumentError {
    fn from(err: ResolutionError) -> Self {
        Self::Domain(err.into())
    }
}
