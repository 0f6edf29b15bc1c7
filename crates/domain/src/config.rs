//! Validated LifeMatrix settings.
//!
//! [`LifeMatrixConfig`] is the typed view of a [`ValidatedMap`] produced by
//! [`life_matrix_schema`](crate::schema::life_matrix_schema). Every defaulted
//! key is populated; optional keys without a default stay `None`.

use serde::Serialize;

use crate::error::{ConfigPath, ValidationError, ValidationErrorKind};
use crate::id::ComponentId;
use crate::schema::keys;
use crate::screen::{ScreenSettings, ScreenSlot, Screens};
use crate::style::{
    DayFill, DisplayStyle, FillDirection, MarkerColor, MarkerStyle, TextAreaPosition,
    YearEventStyle,
};
use crate::time_period::TimePeriod;
use crate::value::ValidatedMap;

pub const GRID_MIN: i64 = 8;
pub const GRID_MAX: i64 = 256;
pub const HOUR_MIN: i64 = 0;
pub const HOUR_MAX: i64 = 23;

pub const DEFAULT_GRID_WIDTH: u16 = 32;
pub const DEFAULT_GRID_HEIGHT: u16 = 120;
pub const DEFAULT_SCREEN_CYCLE_TIME: TimePeriod = TimePeriod::from_secs(3);
pub const DEFAULT_GRADIENT_TYPE: &str = "Red-Blue";

pub const DEFAULT_UPDATE_INTERVAL: TimePeriod = TimePeriod::from_millis(200);
pub const DEFAULT_COMPLEX_PATTERNS: bool = false;
pub const DEFAULT_AUTO_RESET_ON_STABLE: bool = true;
pub const DEFAULT_STABILITY_TIMEOUT: TimePeriod = TimePeriod::from_secs(60);
pub const DEFAULT_DEMO_MODE: bool = false;

pub const DEFAULT_BED_TIME_HOUR: u8 = 22;
pub const DEFAULT_WORK_START_HOUR: u8 = 9;
pub const DEFAULT_WORK_END_HOUR: u8 = 17;

/// Game of Life tuning.
///
/// Only `update_interval` and `demo_mode` are wired into the component; the
/// other fields are validated and carried but have no setter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameOfLifeSettings {
    pub update_interval: TimePeriod,
    pub complex_patterns: bool,
    pub auto_reset_on_stable: bool,
    pub stability_timeout: TimePeriod,
    pub demo_mode: bool,
}

impl Default for GameOfLifeSettings {
    fn default() -> Self {
        Self {
            update_interval: DEFAULT_UPDATE_INTERVAL,
            complex_patterns: DEFAULT_COMPLEX_PATTERNS,
            auto_reset_on_stable: DEFAULT_AUTO_RESET_ON_STABLE,
            stability_timeout: DEFAULT_STABILITY_TIMEOUT,
            demo_mode: DEFAULT_DEMO_MODE,
        }
    }
}

/// Hour boundaries used by the "Time Segments" style. Validated, not wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeSegments {
    pub bed_time_hour: u8,
    pub work_start_hour: u8,
    pub work_end_hour: u8,
}

impl Default for TimeSegments {
    fn default() -> Self {
        Self {
            bed_time_hour: DEFAULT_BED_TIME_HOUR,
            work_start_hour: DEFAULT_WORK_START_HOUR,
            work_end_hour: DEFAULT_WORK_END_HOUR,
        }
    }
}

/// Fully validated component settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LifeMatrixConfig {
    pub id: Option<ComponentId>,
    pub setup_priority: Option<f64>,
    pub display: Option<ComponentId>,
    pub time_id: ComponentId,
    pub status_led: Option<ComponentId>,
    pub font_small: Option<ComponentId>,
    pub font_medium: Option<ComponentId>,
    pub gol_final_generation_sensor: Option<ComponentId>,
    pub gol_final_population_sensor: Option<ComponentId>,
    pub grid_width: u16,
    pub grid_height: u16,
    pub screen_cycle_time: TimePeriod,
    pub screens: Option<Screens>,
    pub game_of_life: Option<GameOfLifeSettings>,
    pub time_segments: Option<TimeSegments>,
    pub style: DisplayStyle,
    pub gradient_type: String,
    pub text_area_position: TextAreaPosition,
    pub fill_direction: FillDirection,
    pub marker_style: Option<MarkerStyle>,
    pub marker_color: Option<MarkerColor>,
    pub day_fill: Option<DayFill>,
    pub year_event_style: Option<YearEventStyle>,
    pub year_events: Option<String>,
}

fn missing(path: &ConfigPath, key: &str) -> ValidationError {
    ValidationError::new(path.child(key), ValidationErrorKind::MissingRequired)
}

fn require<T>(value: Option<T>, path: &ConfigPath, key: &str) -> Result<T, ValidationError> {
    value.ok_or_else(|| missing(path, key))
}

fn int_as<T: TryFrom<i64>>(map: &ValidatedMap, path: &ConfigPath, key: &str) -> Result<T, ValidationError> {
    let value = require(map.int(key), path, key)?;
    T::try_from(value).map_err(|_| {
        ValidationError::new(
            path.child(key),
            ValidationErrorKind::ExpectedInt(value.to_string()),
        )
    })
}

fn label_as<T>(
    map: &ValidatedMap,
    path: &ConfigPath,
    key: &str,
    lookup: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>, ValidationError> {
    let Some(label) = map.str(key) else {
        return Ok(None);
    };
    lookup(label).map(Some).ok_or_else(|| {
        ValidationError::new(
            path.child(key),
            ValidationErrorKind::UnknownOption {
                value: label.to_string(),
                options: String::new(),
            },
        )
    })
}

impl GameOfLifeSettings {
    fn from_validated(map: &ValidatedMap, path: &ConfigPath) -> Result<Self, ValidationError> {
        Ok(Self {
            update_interval: require(map.period(keys::UPDATE_INTERVAL), path, keys::UPDATE_INTERVAL)?,
            complex_patterns: require(map.bool(keys::COMPLEX_PATTERNS), path, keys::COMPLEX_PATTERNS)?,
            auto_reset_on_stable: require(
                map.bool(keys::AUTO_RESET_ON_STABLE),
                path,
                keys::AUTO_RESET_ON_STABLE,
            )?,
            stability_timeout: require(
                map.period(keys::STABILITY_TIMEOUT),
                path,
                keys::STABILITY_TIMEOUT,
            )?,
            demo_mode: require(map.bool(keys::DEMO_MODE), path, keys::DEMO_MODE)?,
        })
    }
}

impl TimeSegments {
    fn from_validated(map: &ValidatedMap, path: &ConfigPath) -> Result<Self, ValidationError> {
        Ok(Self {
            bed_time_hour: int_as(map, path, keys::BED_TIME_HOUR)?,
            work_start_hour: int_as(map, path, keys::WORK_START_HOUR)?,
            work_end_hour: int_as(map, path, keys::WORK_END_HOUR)?,
        })
    }
}

impl Screens {
    fn from_validated(map: &ValidatedMap, path: &ConfigPath) -> Result<Self, ValidationError> {
        let mut screens = Screens::default();
        for slot in ScreenSlot::ALL {
            let Some(entry) = map.map(slot.key()) else {
                continue;
            };
            let entry_path = path.child(slot.key());
            let enabled = require(entry.bool(keys::ENABLED), &entry_path, keys::ENABLED)?;
            screens.set(slot, ScreenSettings { enabled });
        }
        Ok(screens)
    }
}

impl LifeMatrixConfig {
    /// Build the typed settings from a schema pass.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when `map` does not have the shape
    /// [`life_matrix_schema`](crate::schema::life_matrix_schema) produces
    /// (a required or defaulted key is missing or has the wrong type).
    pub fn from_validated(map: &ValidatedMap) -> Result<Self, ValidationError> {
        let root = ConfigPath::root();
        let reference = |key: &str| map.id(key).cloned();

        let screens = map
            .map(keys::SCREENS)
            .map(|screens| Screens::from_validated(screens, &root.child(keys::SCREENS)))
            .transpose()?;
        let game_of_life = map
            .map(keys::GAME_OF_LIFE)
            .map(|gol| GameOfLifeSettings::from_validated(gol, &root.child(keys::GAME_OF_LIFE)))
            .transpose()?;
        let time_segments = map
            .map(keys::TIME_SEGMENTS)
            .map(|ts| TimeSegments::from_validated(ts, &root.child(keys::TIME_SEGMENTS)))
            .transpose()?;

        let style_code = require(map.choice(keys::STYLE), &root, keys::STYLE)?;
        let style = DisplayStyle::from_code(style_code).ok_or_else(|| {
            ValidationError::new(
                root.child(keys::STYLE),
                ValidationErrorKind::UnknownOption {
                    value: style_code.to_string(),
                    options: String::new(),
                },
            )
        })?;

        Ok(Self {
            id: reference(keys::ID),
            setup_priority: map.float(keys::SETUP_PRIORITY),
            display: reference(keys::DISPLAY),
            time_id: require(reference(keys::TIME_ID), &root, keys::TIME_ID)?,
            status_led: reference(keys::STATUS_LED),
            font_small: reference(keys::FONT_SMALL),
            font_medium: reference(keys::FONT_MEDIUM),
            gol_final_generation_sensor: reference(keys::GOL_FINAL_GENERATION_SENSOR),
            gol_final_population_sensor: reference(keys::GOL_FINAL_POPULATION_SENSOR),
            grid_width: int_as(map, &root, keys::GRID_WIDTH)?,
            grid_height: int_as(map, &root, keys::GRID_HEIGHT)?,
            screen_cycle_time: require(
                map.period(keys::SCREEN_CYCLE_TIME),
                &root,
                keys::SCREEN_CYCLE_TIME,
            )?,
            screens,
            game_of_life,
            time_segments,
            style,
            gradient_type: require(map.str(keys::GRADIENT_TYPE), &root, keys::GRADIENT_TYPE)?
                .to_string(),
            text_area_position: require(
                label_as(map, &root, keys::TEXT_AREA_POSITION, TextAreaPosition::from_label)?,
                &root,
                keys::TEXT_AREA_POSITION,
            )?,
            fill_direction: require(
                label_as(map, &root, keys::FILL_DIRECTION, FillDirection::from_label)?,
                &root,
                keys::FILL_DIRECTION,
            )?,
            marker_style: label_as(map, &root, keys::MARKER_STYLE, MarkerStyle::from_label)?,
            marker_color: label_as(map, &root, keys::MARKER_COLOR, MarkerColor::from_label)?,
            day_fill: label_as(map, &root, keys::DAY_FILL, DayFill::from_any_label)?,
            year_event_style: label_as(
                map,
                &root,
                keys::YEAR_EVENT_STYLE,
                YearEventStyle::from_label,
            )?,
            year_events: map.str(keys::YEAR_EVENTS).map(str::to_string),
        })
    }

    /// Whether the screen in `slot` gets registered as enabled.
    #[must_use]
    pub fn screen_enabled(&self, slot: ScreenSlot) -> bool {
        self.screens
            .as_ref()
            .is_none_or(|screens| screens.is_enabled(slot))
    }
}
