//! # lifematrix-adapter-render
//!
//! Output adapter: turns an ordered list of
//! [`Instruction`](lifematrix_domain::instruction::Instruction)s into text.
//!
//! ## Responsibilities
//! - Render C++ in the host's generated-code style (global declarations + `setup()` statements)
//! - Render the instruction list as JSON for inspection and tooling
//! - Refuse instruction lists that call into an instance never constructed
//!
//! ## Dependency rule
//! Depends on `lifematrix-domain` (for instruction types) only.
//! The `app` and `domain` crates must never reference this adapter.

pub mod cpp;
pub mod error;
pub mod json;

use lifematrix_domain::instruction::Instruction;
use serde::Deserialize;

pub use error::RenderError;

/// Output format of the rendered wiring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Cpp,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cpp" | "c++" => Ok(Self::Cpp),
            "json" => Ok(Self::Json),
            other => Err(RenderError::UnknownFormat(other.to_string())),
        }
    }
}

/// Render `instructions` in `format`.
///
/// # Errors
///
/// Returns [`RenderError`] when the instruction list cannot be rendered.
pub fn render(format: OutputFormat, instructions: &[Instruction]) -> Result<String, RenderError> {
    match format {
        OutputFormat::Cpp => Ok(cpp::render(instructions)?.to_string()),
        OutputFormat::Json => json::render(instructions),
    }
}
