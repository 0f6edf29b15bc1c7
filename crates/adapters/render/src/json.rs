//! JSON rendering of the instruction list.

use lifematrix_domain::instruction::Instruction;

use crate::error::RenderError;

/// Render `instructions` as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns [`RenderError::Json`] if serialization fails.
pub fn render(instructions: &[Instruction]) -> Result<String, RenderError> {
    let mut text = serde_json::to_string_pretty(instructions)?;
    text.push('\n');
    Ok(text)
}
