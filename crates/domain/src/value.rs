//! Validated values and the scalar coercions that produce them.
//!
//! Coercions take raw [`serde_json::Value`] nodes and either return a typed
//! value or a [`ValidationErrorKind`]; the caller attaches the path.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::ValidationErrorKind;
use crate::id::ComponentId;
use crate::time_period::{Precision, TimePeriod, TimePeriodError};

/// A value that passed its field validator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Validated {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Enum option: the label that was written and the integer it maps to.
    Choice { label: String, code: i64 },
    Period(TimePeriod),
    /// Identifier declared by, or referenced from, this configuration.
    Id(ComponentId),
    Map(ValidatedMap),
}

/// A validated mapping: every schema key that has a value, defaults included.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidatedMap(BTreeMap<String, Validated>);

impl ValidatedMap {
    pub fn insert(&mut self, key: impl Into<String>, value: Validated) {
        self.0.insert(key.into(), value);
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Validated> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn bool(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            Validated::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn int(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            Validated::Int(i) => Some(*i),
            _ => None,
        }
    }

    #[must_use]
    pub fn float(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            Validated::Float(f) => Some(*f),
            _ => None,
        }
    }

    #[must_use]
    pub fn str(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            Validated::Str(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn choice(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            Validated::Choice { code, .. } => Some(*code),
            _ => None,
        }
    }

    #[must_use]
    pub fn period(&self, key: &str) -> Option<TimePeriod> {
        match self.get(key)? {
            Validated::Period(p) => Some(*p),
            _ => None,
        }
    }

    #[must_use]
    pub fn id(&self, key: &str) -> Option<&ComponentId> {
        match self.get(key)? {
            Validated::Id(id) => Some(id),
            _ => None,
        }
    }

    #[must_use]
    pub fn map(&self, key: &str) -> Option<&ValidatedMap> {
        match self.get(key)? {
            Validated::Map(m) => Some(m),
            _ => None,
        }
    }
}

/// Short description of a raw value for error messages.
#[must_use]
pub fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("'{s}'"),
        Value::Array(_) => "a list".to_string(),
        Value::Object(_) => "a dictionary".to_string(),
    }
}

/// Booleans, or the usual on/off words in any case.
///
/// # Errors
///
/// [`ValidationErrorKind::ExpectedBool`] for anything else.
pub fn boolean(value: &Value) -> Result<bool, ValidationErrorKind> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => match s.to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "enable" => Ok(true),
            "false" | "no" | "off" | "disable" => Ok(false),
            _ => Err(ValidationErrorKind::ExpectedBool(describe(value))),
        },
        _ => Err(ValidationErrorKind::ExpectedBool(describe(value))),
    }
}

/// Integers, floats without a fractional part, and numeric strings.
///
/// # Errors
///
/// [`ValidationErrorKind::ExpectedInt`] or [`ValidationErrorKind::FractionalInt`].
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
pub fn integer(value: &Value) -> Result<i64, ValidationErrorKind> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f.abs() < 9.0e18 => Ok(f as i64),
                Some(f) if f.is_finite() && f.fract() != 0.0 => {
                    Err(ValidationErrorKind::FractionalInt(f))
                }
                _ => Err(ValidationErrorKind::ExpectedInt(describe(value))),
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| ValidationErrorKind::ExpectedInt(describe(value))),
        _ => Err(ValidationErrorKind::ExpectedInt(describe(value))),
    }
}

/// [`integer`] constrained to the inclusive range `[min, max]`.
///
/// # Errors
///
/// Any [`integer`] error, or [`ValidationErrorKind::OutOfRange`].
pub fn int_range(value: &Value, min: i64, max: i64) -> Result<i64, ValidationErrorKind> {
    let value = integer(value)?;
    if value < min || value > max {
        return Err(ValidationErrorKind::OutOfRange { value, min, max });
    }
    Ok(value)
}

/// Numbers and numeric strings.
///
/// # Errors
///
/// [`ValidationErrorKind::ExpectedFloat`] for anything else.
pub fn float(value: &Value) -> Result<f64, ValidationErrorKind> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|f| f.is_finite())
        .ok_or_else(|| ValidationErrorKind::ExpectedFloat(describe(value)))
}

/// Any scalar except booleans, stringified.
///
/// # Errors
///
/// [`ValidationErrorKind::UnquotedBool`] for booleans (the user most likely
/// wrote `on`/`off` meaning the text), [`ValidationErrorKind::ExpectedString`]
/// for mappings, lists and null.
pub fn string(value: &Value) -> Result<String, ValidationErrorKind> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(_) => Err(ValidationErrorKind::UnquotedBool),
        Value::Null | Value::Array(_) | Value::Object(_) => Err(ValidationErrorKind::ExpectedString),
    }
}

fn quoted_options<'a>(options: impl Iterator<Item = &'a str>) -> String {
    options
        .map(|option| format!("'{option}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A string that must be exactly one of `options`.
///
/// # Errors
///
/// Any [`string`] error, or [`ValidationErrorKind::UnknownOption`].
pub fn one_of(value: &Value, options: &[&str]) -> Result<String, ValidationErrorKind> {
    let text = string(value)?;
    if options.contains(&text.as_str()) {
        Ok(text)
    } else {
        Err(ValidationErrorKind::UnknownOption {
            value: text,
            options: quoted_options(options.iter().copied()),
        })
    }
}

/// A string naming one entry of a label → integer table.
///
/// # Errors
///
/// Any [`string`] error, or [`ValidationErrorKind::UnknownOption`].
pub fn enumeration(
    value: &Value,
    options: &[(&str, i64)],
) -> Result<(String, i64), ValidationErrorKind> {
    let text = string(value)?;
    match options.iter().find(|(label, _)| *label == text) {
        Some((_, code)) => Ok((text, *code)),
        None => Err(ValidationErrorKind::UnknownOption {
            value: text,
            options: quoted_options(options.iter().map(|(label, _)| *label)),
        }),
    }
}

/// A time period string whose precision does not exceed `precision`.
///
/// # Errors
///
/// [`ValidationErrorKind::TimePeriod`] when the text is malformed, has no
/// unit (bare numbers included), or is finer than `precision`.
pub fn time_period(value: &Value, precision: Precision) -> Result<TimePeriod, ValidationErrorKind> {
    let period = match value {
        Value::String(s) => s.parse::<TimePeriod>()?,
        Value::Number(n) => return Err(TimePeriodError::MissingUnit(n.to_string()).into()),
        other => return Err(TimePeriodError::Malformed(describe(other)).into()),
    };
    Ok(period.check_precision(precision)?)
}

/// A string that is a valid component identifier.
///
/// # Errors
///
/// Any [`string`] error, or [`ValidationErrorKind::InvalidId`].
pub fn identifier(value: &Value) -> Result<ComponentId, ValidationErrorKind> {
    Ok(string(value)?.parse::<ComponentId>()?)
}
