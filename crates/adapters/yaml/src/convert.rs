//! YAML → JSON value conversion.
//!
//! The domain schema reads `serde_json::Value` trees. YAML is richer: it has
//! tags and non-string mapping keys. Tags are dropped (the tagged value is
//! kept as is) and scalar keys are stringified.

use serde_json::{Map, Number, Value};
use serde_yaml::Value as Yaml;

/// Convert a YAML value into a JSON value.
#[must_use]
pub fn to_json(yaml: &Yaml) -> Value {
    match yaml {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(*b),
        Yaml::Number(n) => number(n),
        Yaml::String(s) => Value::String(s.clone()),
        Yaml::Sequence(items) => Value::Array(items.iter().map(to_json).collect()),
        Yaml::Mapping(mapping) => Value::Object(
            mapping
                .iter()
                .map(|(key, value)| (key_string(key), to_json(value)))
                .collect::<Map<_, _>>(),
        ),
        Yaml::Tagged(tagged) => {
            tracing::trace!(tag = %tagged.tag, "ignoring YAML tag");
            to_json(&tagged.value)
        }
    }
}

fn number(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Number(i.into())
    } else if let Some(u) = n.as_u64() {
        Value::Number(u.into())
    } else {
        // `.inf` and `.nan` have no JSON form; keep their YAML spelling so
        // validation reports them as text.
        n.as_f64()
            .and_then(Number::from_f64)
            .map_or_else(|| Value::String(n.to_string()), Value::Number)
    }
}

/// Text form of a mapping key.
///
/// Sequence and mapping keys are written as compact JSON, so distinct keys
/// stay distinct.
#[must_use]
pub fn key_string(key: &Yaml) -> String {
    match key {
        Yaml::String(s) => s.clone(),
        Yaml::Null => "null".to_string(),
        Yaml::Bool(b) => b.to_string(),
        Yaml::Number(n) => n.to_string(),
        Yaml::Tagged(tagged) => key_string(&tagged.value),
        Yaml::Sequence(_) | Yaml::Mapping(_) => to_json(key).to_string(),
    }
}
