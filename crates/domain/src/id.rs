//! Component identifiers and the kinds of sibling components they name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Words that cannot be used as an identifier because the generated code
/// would not compile (C++ keywords) or would shadow the host application.
const RESERVED_IDS: &[&str] = &[
    "alignas", "alignof", "and", "and_eq", "asm", "auto", "bitand", "bitor", "bool", "break",
    "case", "catch", "char", "class", "compl", "const", "constexpr", "const_cast", "continue",
    "decltype", "default", "delete", "do", "double", "dynamic_cast", "else", "enum", "explicit",
    "export", "extern", "false", "float", "for", "friend", "goto", "if", "inline", "int", "long",
    "mutable", "namespace", "new", "noexcept", "not", "not_eq", "nullptr", "operator", "or",
    "or_eq", "private", "protected", "public", "register", "reinterpret_cast", "return", "short",
    "signed", "sizeof", "static", "static_assert", "static_cast", "struct", "switch", "template",
    "this", "thread_local", "throw", "true", "try", "typedef", "typeid", "typename", "union",
    "unsigned", "using", "virtual", "void", "volatile", "wchar_t", "while", "xor", "xor_eq", "App",
];

/// An identifier that does not name a valid generated variable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid ID '{id}': {reason}")]
pub struct InvalidId {
    pub id: String,
    pub reason: &'static str,
}

/// Identifier of a declared component, usable as a C++ variable name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ComponentId(String);

impl ComponentId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Same identifier with a numeric suffix, used to step around collisions
    /// when generating an identifier (`foo_id` → `foo_id_2`).
    #[must_use]
    pub fn with_suffix(&self, n: usize) -> Self {
        Self(format!("{}_{n}", self.0))
    }
}

impl FromStr for ComponentId {
    type Err = InvalidId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| InvalidId {
            id: s.to_string(),
            reason,
        };
        let Some(first) = s.chars().next() else {
            return Err(invalid("ID must not be empty"));
        };
        if first.is_ascii_digit() {
            return Err(invalid("first character must not be a digit"));
        }
        if !s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(invalid(
                "only ASCII letters, digits and underscores are allowed",
            ));
        }
        if RESERVED_IDS.contains(&s) {
            return Err(invalid("this name is reserved"));
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for ComponentId {
    type Error = InvalidId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ComponentId> for String {
    fn from(id: ComponentId) -> Self {
        id.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of a declared sibling component, as far as reference checking cares.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Display,
    RealTimeClock,
    LightState,
    Font,
    Sensor,
    /// Anything declared under a platform the adapter never references.
    Other(String),
}

impl ComponentKind {
    /// Kind of the components declared under a top-level platform block.
    #[must_use]
    pub fn from_platform(platform: &str) -> Self {
        match platform {
            "display" => Self::Display,
            "time" => Self::RealTimeClock,
            "light" => Self::LightState,
            "font" => Self::Font,
            "sensor" => Self::Sensor,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Display => f.write_str("display::Display"),
            Self::RealTimeClock => f.write_str("time::RealTimeClock"),
            Self::LightState => f.write_str("light::LightState"),
            Self::Font => f.write_str("font::Font"),
            Self::Sensor => f.write_str("sensor::Sensor"),
            Self::Other(platform) => write!(f, "{platform}"),
        }
    }
}

/// Handle to a resolved sibling component.
///
/// Ownership of the component stays with its declaring site; the handle only
/// names it so that it can be passed into a setter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ComponentRef {
    pub id: ComponentId,
    pub kind: ComponentKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_accept_snake_case_identifier() {
        let id: ComponentId = "sntp_time".parse().unwrap();
        assert_eq!(id.as_str(), "sntp_time");
    }

    #[test]
    fn should_reject_empty_identifier() {
        let err = "".parse::<ComponentId>().unwrap_err();
        assert_eq!(err.reason, "ID must not be empty");
    }

    #[test]
    fn should_reject_identifier_starting_with_digit() {
        assert!("1st_display".parse::<ComponentId>().is_err());
    }

    #[test]
    fn should_reject_identifier_with_dash() {
        assert!("my-display".parse::<ComponentId>().is_err());
    }

    #[test]
    fn should_reject_reserved_word() {
        let err = "class".parse::<ComponentId>().unwrap_err();
        assert_eq!(err.reason, "this name is reserved");
    }

    #[test]
    fn should_append_numeric_suffix() {
        let id: ComponentId = "life_matrix_lifematrix_id".parse().unwrap();
        assert_eq!(id.with_suffix(2).as_str(), "life_matrix_lifematrix_id_2");
    }

    #[test]
    fn should_reject_invalid_identifier_when_deserializing() {
        let result: Result<ComponentId, _> = serde_json::from_str("\"not valid\"");
        assert!(result.is_err());
    }

    #[test]
    fn should_map_platform_names_to_kinds() {
        assert_eq!(ComponentKind::from_platform("time"), ComponentKind::RealTimeClock);
        assert_eq!(ComponentKind::from_platform("light"), ComponentKind::LightState);
        assert_eq!(
            ComponentKind::from_platform("wifi"),
            ComponentKind::Other("wifi".to_string())
        );
    }
}
