//! Rendering error types.

use lifematrix_domain::id::ComponentId;

/// Errors raised while rendering an instruction list.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// A call or registration targets an instance that was never constructed.
    #[error("instruction targets '{0}' before it is constructed")]
    UndeclaredTarget(ComponentId),

    /// Float arguments must be finite to be written as C++ literals.
    #[error("cannot render non-finite float {0}")]
    NonFiniteFloat(f64),

    /// Failed to serialize the instruction list.
    #[error("failed to serialize instructions")]
    Json(#[from] serde_json::Error),

    #[error("unknown output format '{0}', expected 'cpp' or 'json'")]
    UnknownFormat(String),
}
