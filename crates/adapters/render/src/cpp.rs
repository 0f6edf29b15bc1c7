//! C++ rendering.
//!
//! Each constructed instance gets a global pointer declaration; every other
//! instruction becomes one statement of the `setup()` body:
//!
//! ```text
//! life_matrix::LifeMatrix *life_matrix_lifematrix_id;
//!
//! void setup() {
//!   life_matrix_lifematrix_id = new life_matrix::LifeMatrix();
//!   App.register_component(life_matrix_lifematrix_id);
//!   life_matrix_lifematrix_id->set_time(sntp_time);
//! }
//! ```

use std::collections::HashSet;
use std::fmt;

use lifematrix_domain::id::ComponentId;
use lifematrix_domain::instruction::{Arg, Instruction};

use crate::error::RenderError;

/// A rendered translation unit fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CppUnit {
    /// Global declarations, one per line.
    pub globals: Vec<String>,
    /// Statements of the `setup()` body, in order.
    pub setup: Vec<String>,
}

impl fmt::Display for CppUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for global in &self.globals {
            writeln!(f, "{global}")?;
        }
        if !self.globals.is_empty() {
            writeln!(f)?;
        }
        writeln!(f, "void setup() {{")?;
        for statement in &self.setup {
            writeln!(f, "  {statement}")?;
        }
        writeln!(f, "}}")
    }
}

/// Render `instructions` as C++.
///
/// # Errors
///
/// Returns [`RenderError::UndeclaredTarget`] when an instruction refers to an
/// instance not constructed earlier in the list, or
/// [`RenderError::NonFiniteFloat`] for a float argument with no literal form.
pub fn render(instructions: &[Instruction]) -> Result<CppUnit, RenderError> {
    let mut unit = CppUnit::default();
    let mut declared: HashSet<&ComponentId> = HashSet::new();
    let check = |declared: &HashSet<&ComponentId>, id: &ComponentId| {
        if declared.contains(id) {
            Ok(())
        } else {
            Err(RenderError::UndeclaredTarget(id.clone()))
        }
    };

    for instruction in instructions {
        match instruction {
            Instruction::Construct { id, class } => {
                unit.globals.push(format!("{class} *{id};"));
                unit.setup.push(format!("{id} = new {class}();"));
                declared.insert(id);
            }
            Instruction::RegisterComponent { id } => {
                check(&declared, id)?;
                unit.setup.push(format!("App.register_component({id});"));
            }
            Instruction::Call {
                target,
                setter,
                args,
            } => {
                check(&declared, target)?;
                let args = args
                    .iter()
                    .map(render_arg)
                    .collect::<Result<Vec<_>, _>>()?
                    .join(", ");
                unit.setup.push(format!("{target}->{}({args});", setter.method()));
            }
        }
    }

    tracing::debug!(
        globals = unit.globals.len(),
        statements = unit.setup.len(),
        "rendered C++"
    );
    Ok(unit)
}

fn render_arg(arg: &Arg) -> Result<String, RenderError> {
    Ok(match arg {
        Arg::Int(value) => value.to_string(),
        Arg::Float(value) if value.is_finite() => format!("{value:?}f"),
        Arg::Float(value) => return Err(RenderError::NonFiniteFloat(*value)),
        Arg::Bool(value) => value.to_string(),
        Arg::Str(value) => escape_string(value),
        Arg::Ref(id) => id.to_string(),
    })
}

/// Quote `value` as a C++ string literal.
///
/// Quotes and backslashes are backslash-escaped; bytes outside printable
/// ASCII are written as three-digit octal escapes.
#[must_use]
pub fn escape_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for byte in value.bytes() {
        match byte {
            b'"' => out.push_str("\\\""),
            b'\\' => out.push_str("\\\\"),
            0x20..=0x7e => out.push(char::from(byte)),
            _ => out.push_str(&format!("\\{byte:03o}")),
        }
    }
    out.push('"');
    out
}
