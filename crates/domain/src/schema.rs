//! Configuration schema: a tree of field descriptors evaluated recursively.
//!
//! A [`Schema`] is an ordered list of [`Field`]s. Each field names a key, says
//! whether it is required or defaulted, and carries a [`FieldKind`] that knows
//! how to coerce a raw value. Nested mappings are just another kind
//! ([`FieldKind::Nested`]), so sub-schemas are validated by the same code path.
//!
//! Validation is fail-fast: the first violation is returned with its path.

use serde_json::{Map, Value};

use crate::config::{
    DEFAULT_AUTO_RESET_ON_STABLE, DEFAULT_BED_TIME_HOUR, DEFAULT_COMPLEX_PATTERNS,
    DEFAULT_DEMO_MODE, DEFAULT_GRADIENT_TYPE, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH,
    DEFAULT_SCREEN_CYCLE_TIME, DEFAULT_STABILITY_TIMEOUT, DEFAULT_UPDATE_INTERVAL,
    DEFAULT_WORK_END_HOUR, DEFAULT_WORK_START_HOUR, GRID_MAX, GRID_MIN, HOUR_MAX, HOUR_MIN,
};
use crate::error::{ConfigPath, ValidationError, ValidationErrorKind};
use crate::id::ComponentKind;
use crate::screen::ScreenSlot;
use crate::style::{
    DayFill, DisplayStyle, FillDirection, MarkerColor, MarkerStyle, TextAreaPosition,
    YearEventStyle,
};
use crate::time_period::Precision;
use crate::value::{self, Validated, ValidatedMap};

/// Configuration keys.
pub mod keys {
    pub const ID: &str = "id";
    pub const SETUP_PRIORITY: &str = "setup_priority";
    pub const DISPLAY: &str = "display";
    pub const TIME_ID: &str = "time_id";
    pub const STATUS_LED: &str = "status_led";
    pub const FONT_SMALL: &str = "font_small";
    pub const FONT_MEDIUM: &str = "font_medium";
    pub const GOL_FINAL_GENERATION_SENSOR: &str = "gol_final_generation_sensor";
    pub const GOL_FINAL_POPULATION_SENSOR: &str = "gol_final_population_sensor";
    pub const GRID_WIDTH: &str = "grid_width";
    pub const GRID_HEIGHT: &str = "grid_height";
    pub const SCREEN_CYCLE_TIME: &str = "screen_cycle_time";
    pub const SCREENS: &str = "screens";
    pub const ENABLED: &str = "enabled";
    pub const GAME_OF_LIFE: &str = "game_of_life";
    pub const UPDATE_INTERVAL: &str = "update_interval";
    pub const COMPLEX_PATTERNS: &str = "complex_patterns";
    pub const AUTO_RESET_ON_STABLE: &str = "auto_reset_on_stable";
    pub const STABILITY_TIMEOUT: &str = "stability_timeout";
    pub const DEMO_MODE: &str = "demo_mode";
    pub const TIME_SEGMENTS: &str = "time_segments";
    pub const BED_TIME_HOUR: &str = "bed_time_hour";
    pub const WORK_START_HOUR: &str = "work_start_hour";
    pub const WORK_END_HOUR: &str = "work_end_hour";
    pub const STYLE: &str = "style";
    pub const GRADIENT_TYPE: &str = "gradient_type";
    pub const TEXT_AREA_POSITION: &str = "text_area_position";
    pub const FILL_DIRECTION: &str = "fill_direction";
    pub const MARKER_STYLE: &str = "marker_style";
    pub const MARKER_COLOR: &str = "marker_color";
    pub const DAY_FILL: &str = "day_fill";
    pub const YEAR_EVENT_STYLE: &str = "year_event_style";
    pub const YEAR_EVENTS: &str = "year_events";
}

/// Whether a key must appear, and what it takes when it does not.
#[derive(Debug, Clone, PartialEq)]
pub enum Presence {
    Required,
    Optional,
    /// Absent keys take this raw value, which goes through the field's
    /// validator like any user-supplied value.
    Default(Value),
}

/// How a single value is checked and coerced.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Identifier declared by this configuration.
    DeclareId,
    /// Reference to a sibling component of the given kind.
    UseId(ComponentKind),
    Bool,
    IntRange { min: i64, max: i64 },
    Float,
    String,
    OneOf(&'static [&'static str]),
    Enum(&'static [(&'static str, i64)]),
    TimePeriod(Precision),
    Nested(Schema),
}

impl FieldKind {
    /// Coerce `raw` into a validated value.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] located at `path` (or deeper, for nested
    /// schemas) on the first violation.
    pub fn validate(&self, raw: &Value, path: &ConfigPath) -> Result<Validated, ValidationError> {
        let coerced = match self {
            Self::DeclareId | Self::UseId(_) => value::identifier(raw).map(Validated::Id),
            Self::Bool => value::boolean(raw).map(Validated::Bool),
            Self::IntRange { min, max } => value::int_range(raw, *min, *max).map(Validated::Int),
            Self::Float => value::float(raw).map(Validated::Float),
            Self::String => value::string(raw).map(Validated::Str),
            Self::OneOf(options) => value::one_of(raw, options).map(Validated::Str),
            Self::Enum(table) => {
                value::enumeration(raw, table).map(|(label, code)| Validated::Choice { label, code })
            }
            Self::TimePeriod(precision) => {
                value::time_period(raw, *precision).map(Validated::Period)
            }
            Self::Nested(schema) => return schema.validate_at(raw, path).map(Validated::Map),
        };
        coerced.map_err(|kind| ValidationError::new(path.clone(), kind))
    }
}

/// One key of a schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: &'static str,
    pub presence: Presence,
    pub kind: FieldKind,
}

impl Field {
    #[must_use]
    pub fn required(key: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            presence: Presence::Required,
            kind,
        }
    }

    #[must_use]
    pub fn optional(key: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            presence: Presence::Optional,
            kind,
        }
    }

    #[must_use]
    pub fn with_default(key: &'static str, kind: FieldKind, default: impl Into<Value>) -> Self {
        Self {
            key,
            presence: Presence::Default(default.into()),
            kind,
        }
    }
}

/// An ordered set of fields describing one mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    #[must_use]
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.key == key)
    }

    /// Validate a configuration mapping against this schema.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found. Required keys are checked
    /// first, then unknown keys, then each field in declaration order.
    pub fn validate(&self, value: &Value) -> Result<ValidatedMap, ValidationError> {
        self.validate_at(value, &ConfigPath::root())
    }

    fn validate_at(&self, raw: &Value, path: &ConfigPath) -> Result<ValidatedMap, ValidationError> {
        let empty = Map::new();
        // A key written with no body (`screens:`) means "all defaults".
        let mapping = match raw {
            Value::Object(mapping) => mapping,
            Value::Null => &empty,
            other => {
                return Err(ValidationError::new(
                    path.clone(),
                    ValidationErrorKind::ExpectedMapping(value::describe(other)),
                ));
            }
        };

        if let Some(missing) = self
            .fields
            .iter()
            .find(|field| field.presence == Presence::Required && !mapping.contains_key(field.key))
        {
            return Err(ValidationError::new(
                path.child(missing.key),
                ValidationErrorKind::MissingRequired,
            ));
        }

        if let Some(unknown) = mapping.keys().find(|key| self.field(key).is_none()) {
            return Err(ValidationError::new(
                path.child(unknown.as_str()),
                ValidationErrorKind::UnknownKey,
            ));
        }

        let mut validated = ValidatedMap::default();
        for field in &self.fields {
            let field_path = path.child(field.key);
            let raw = match mapping.get(field.key) {
                Some(raw) => raw,
                None => match &field.presence {
                    Presence::Default(default) => default,
                    Presence::Required | Presence::Optional => continue,
                },
            };
            validated.insert(field.key, field.kind.validate(raw, &field_path)?);
        }
        Ok(validated)
    }
}

/// Per-screen settings.
#[must_use]
pub fn screen_schema() -> Schema {
    Schema::new(vec![Field::with_default(keys::ENABLED, FieldKind::Bool, true)])
}

/// The `screens` block: one optional [`screen_schema`] per screen.
#[must_use]
pub fn screens_schema() -> Schema {
    Schema::new(
        ScreenSlot::ALL
            .iter()
            .map(|slot| Field::optional(slot.key(), FieldKind::Nested(screen_schema())))
            .collect(),
    )
}

/// The `game_of_life` block.
#[must_use]
pub fn game_of_life_schema() -> Schema {
    Schema::new(vec![
        Field::with_default(
            keys::UPDATE_INTERVAL,
            FieldKind::TimePeriod(Precision::Milliseconds),
            DEFAULT_UPDATE_INTERVAL.to_string(),
        ),
        Field::with_default(keys::COMPLEX_PATTERNS, FieldKind::Bool, DEFAULT_COMPLEX_PATTERNS),
        Field::with_default(
            keys::AUTO_RESET_ON_STABLE,
            FieldKind::Bool,
            DEFAULT_AUTO_RESET_ON_STABLE,
        ),
        Field::with_default(
            keys::STABILITY_TIMEOUT,
            FieldKind::TimePeriod(Precision::Milliseconds),
            DEFAULT_STABILITY_TIMEOUT.to_string(),
        ),
        Field::with_default(keys::DEMO_MODE, FieldKind::Bool, DEFAULT_DEMO_MODE),
    ])
}

/// The `time_segments` block.
#[must_use]
pub fn time_segments_schema() -> Schema {
    let hour = || FieldKind::IntRange {
        min: HOUR_MIN,
        max: HOUR_MAX,
    };
    Schema::new(vec![
        Field::with_default(keys::BED_TIME_HOUR, hour(), DEFAULT_BED_TIME_HOUR),
        Field::with_default(keys::WORK_START_HOUR, hour(), DEFAULT_WORK_START_HOUR),
        Field::with_default(keys::WORK_END_HOUR, hour(), DEFAULT_WORK_END_HOUR),
    ])
}

/// The full `life_matrix` component schema.
#[must_use]
pub fn life_matrix_schema() -> Schema {
    let grid = || FieldKind::IntRange {
        min: GRID_MIN,
        max: GRID_MAX,
    };
    Schema::new(vec![
        Field::optional(keys::ID, FieldKind::DeclareId),
        Field::optional(keys::SETUP_PRIORITY, FieldKind::Float),
        Field::optional(keys::DISPLAY, FieldKind::UseId(ComponentKind::Display)),
        Field::required(keys::TIME_ID, FieldKind::UseId(ComponentKind::RealTimeClock)),
        Field::optional(keys::STATUS_LED, FieldKind::UseId(ComponentKind::LightState)),
        Field::optional(keys::FONT_SMALL, FieldKind::UseId(ComponentKind::Font)),
        Field::optional(keys::FONT_MEDIUM, FieldKind::UseId(ComponentKind::Font)),
        Field::optional(
            keys::GOL_FINAL_GENERATION_SENSOR,
            FieldKind::UseId(ComponentKind::Sensor),
        ),
        Field::optional(
            keys::GOL_FINAL_POPULATION_SENSOR,
            FieldKind::UseId(ComponentKind::Sensor),
        ),
        Field::with_default(keys::GRID_WIDTH, grid(), DEFAULT_GRID_WIDTH),
        Field::with_default(keys::GRID_HEIGHT, grid(), DEFAULT_GRID_HEIGHT),
        Field::with_default(
            keys::SCREEN_CYCLE_TIME,
            FieldKind::TimePeriod(Precision::Seconds),
            DEFAULT_SCREEN_CYCLE_TIME.to_string(),
        ),
        Field::optional(keys::SCREENS, FieldKind::Nested(screens_schema())),
        Field::optional(keys::GAME_OF_LIFE, FieldKind::Nested(game_of_life_schema())),
        Field::optional(keys::TIME_SEGMENTS, FieldKind::Nested(time_segments_schema())),
        Field::with_default(
            keys::STYLE,
            FieldKind::Enum(DisplayStyle::CODES),
            DisplayStyle::SingleColor.label(),
        ),
        Field::with_default(keys::GRADIENT_TYPE, FieldKind::String, DEFAULT_GRADIENT_TYPE),
        Field::with_default(
            keys::TEXT_AREA_POSITION,
            FieldKind::OneOf(TextAreaPosition::OPTIONS),
            TextAreaPosition::Top.label(),
        ),
        Field::with_default(
            keys::FILL_DIRECTION,
            FieldKind::OneOf(FillDirection::OPTIONS),
            FillDirection::BottomToTop.label(),
        ),
        Field::optional(keys::MARKER_STYLE, FieldKind::OneOf(MarkerStyle::OPTIONS)),
        Field::optional(keys::MARKER_COLOR, FieldKind::OneOf(MarkerColor::OPTIONS)),
        Field::optional(keys::DAY_FILL, FieldKind::OneOf(DayFill::ACCEPTED)),
        Field::optional(
            keys::YEAR_EVENT_STYLE,
            FieldKind::OneOf(YearEventStyle::OPTIONS),
        ),
        Field::optional(keys::YEAR_EVENTS, FieldKind::String),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_period::TimePeriod;
    use serde_json::json;

    fn minimal() -> Value {
        json!({ "time_id": "sntp_time" })
    }

    #[test]
    fn should_fill_defaults_when_optional_keys_absent() {
        let map = life_matrix_schema().validate(&minimal()).unwrap();

        assert_eq!(map.int(keys::GRID_WIDTH), Some(32));
        assert_eq!(map.int(keys::GRID_HEIGHT), Some(120));
        assert_eq!(map.period(keys::SCREEN_CYCLE_TIME), Some(TimePeriod::from_secs(3)));
        assert_eq!(map.choice(keys::STYLE), Some(0));
        assert_eq!(map.str(keys::GRADIENT_TYPE), Some("Red-Blue"));
        assert_eq!(map.str(keys::TEXT_AREA_POSITION), Some("Top"));
        assert_eq!(map.str(keys::FILL_DIRECTION), Some("Bottom to Top"));
    }

    #[test]
    fn should_leave_optional_keys_without_default_absent() {
        let map = life_matrix_schema().validate(&minimal()).unwrap();

        assert!(!map.contains(keys::DISPLAY));
        assert!(!map.contains(keys::SCREENS));
        assert!(!map.contains(keys::GAME_OF_LIFE));
        assert!(!map.contains(keys::TIME_SEGMENTS));
        assert!(!map.contains(keys::MARKER_STYLE));
    }

    #[test]
    fn should_reject_missing_time_id_even_when_other_fields_invalid() {
        let err = life_matrix_schema()
            .validate(&json!({ "grid_width": 2, "style": "Plaid" }))
            .unwrap_err();
        assert_eq!(err.path, ConfigPath::key(keys::TIME_ID));
        assert_eq!(err.kind, ValidationErrorKind::MissingRequired);
    }

    #[test]
    fn should_reject_unknown_key() {
        let err = life_matrix_schema()
            .validate(&json!({ "time_id": "t", "grid_depth": 4 }))
            .unwrap_err();
        assert_eq!(err.path, ConfigPath::key("grid_depth"));
        assert_eq!(err.kind, ValidationErrorKind::UnknownKey);
    }

    #[test]
    fn should_reject_unknown_key_inside_nested_block() {
        let err = life_matrix_schema()
            .validate(&json!({ "time_id": "t", "screens": { "week": { "enabled": true } } }))
            .unwrap_err();
        assert_eq!(err.path, ConfigPath::key(keys::SCREENS).child("week"));
    }

    #[test]
    fn should_report_nested_path_for_invalid_value() {
        let err = life_matrix_schema()
            .validate(&json!({ "time_id": "t", "time_segments": { "work_end_hour": 24 } }))
            .unwrap_err();
        assert_eq!(
            err.path,
            ConfigPath::key(keys::TIME_SEGMENTS).child(keys::WORK_END_HOUR)
        );
        assert!(matches!(err.kind, ValidationErrorKind::OutOfRange { .. }));
    }

    #[test]
    fn should_default_nested_fields_when_block_present() {
        let map = life_matrix_schema()
            .validate(&json!({ "time_id": "t", "game_of_life": {} }))
            .unwrap();
        let gol = map.map(keys::GAME_OF_LIFE).unwrap();

        assert_eq!(gol.period(keys::UPDATE_INTERVAL), Some(TimePeriod::from_millis(200)));
        assert_eq!(gol.bool(keys::COMPLEX_PATTERNS), Some(false));
        assert_eq!(gol.bool(keys::AUTO_RESET_ON_STABLE), Some(true));
        assert_eq!(gol.period(keys::STABILITY_TIMEOUT), Some(TimePeriod::from_secs(60)));
        assert_eq!(gol.bool(keys::DEMO_MODE), Some(false));
    }

    #[test]
    fn should_treat_empty_block_as_all_defaults() {
        let map = life_matrix_schema()
            .validate(&json!({ "time_id": "t", "time_segments": null }))
            .unwrap();
        let segments = map.map(keys::TIME_SEGMENTS).unwrap();
        assert_eq!(segments.int(keys::BED_TIME_HOUR), Some(22));
    }

    #[test]
    fn should_reject_list_where_mapping_expected() {
        let err = life_matrix_schema()
            .validate(&json!({ "time_id": "t", "screens": [1, 2] }))
            .unwrap_err();
        assert_eq!(err.path, ConfigPath::key(keys::SCREENS));
        assert!(matches!(err.kind, ValidationErrorKind::ExpectedMapping(_)));
    }

    #[test]
    fn should_map_style_label_to_code() {
        let map = life_matrix_schema()
            .validate(&json!({ "time_id": "t", "style": "Rainbow" }))
            .unwrap();
        assert_eq!(map.choice(keys::STYLE), Some(3));
    }

    #[test]
    fn should_list_every_screen_in_screens_schema() {
        let schema = screens_schema();
        for slot in ScreenSlot::ALL {
            assert!(schema.field(slot.key()).is_some(), "missing {slot}");
        }
        assert_eq!(schema.fields().len(), 6);
    }
}
