//! Wiring instructions emitted for the generated component instance.
//!
//! An instruction list is the complete, ordered description of how the
//! component is built at device startup. Renderers turn it into target code;
//! nothing else is produced.

use std::fmt;

use serde::Serialize;

use crate::id::ComponentId;

/// Namespace of the generated component class.
pub const COMPONENT_NAMESPACE: &str = "life_matrix";
/// Name of the generated component class.
pub const COMPONENT_CLASS: &str = "LifeMatrix";

/// Fully qualified class path, e.g. `life_matrix::LifeMatrix`.
#[must_use]
pub fn class_path() -> String {
    format!("{COMPONENT_NAMESPACE}::{COMPONENT_CLASS}")
}

/// A setter on the component instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Setter {
    SetSetupPriority,
    SetDisplay,
    SetTime,
    SetStatusLed,
    SetFontSmall,
    SetFontMedium,
    SetGolFinalGenerationSensor,
    SetGolFinalPopulationSensor,
    SetGridDimensions,
    SetScreenCycleTime,
    RegisterScreen,
    SetGameUpdateInterval,
    SetDemoMode,
    SetStyle,
    SetTextAreaPosition,
    SetFillDirection,
    SetGradientType,
    SetMarkerStyle,
    SetMarkerColor,
    SetDayFill,
    SetYearEventStyle,
    SetYearEvents,
}

impl Setter {
    /// Method name on the component class.
    #[must_use]
    pub const fn method(self) -> &'static str {
        match self {
            Self::SetSetupPriority => "set_setup_priority",
            Self::SetDisplay => "set_display",
            Self::SetTime => "set_time",
            Self::SetStatusLed => "set_status_led",
            Self::SetFontSmall => "set_font_small",
            Self::SetFontMedium => "set_font_medium",
            Self::SetGolFinalGenerationSensor => "set_gol_final_generation_sensor",
            Self::SetGolFinalPopulationSensor => "set_gol_final_population_sensor",
            Self::SetGridDimensions => "set_grid_dimensions",
            Self::SetScreenCycleTime => "set_screen_cycle_time",
            Self::RegisterScreen => "register_screen",
            Self::SetGameUpdateInterval => "set_game_update_interval",
            Self::SetDemoMode => "set_demo_mode",
            Self::SetStyle => "set_style",
            Self::SetTextAreaPosition => "set_text_area_position",
            Self::SetFillDirection => "set_fill_direction",
            Self::SetGradientType => "set_gradient_type",
            Self::SetMarkerStyle => "set_marker_style",
            Self::SetMarkerColor => "set_marker_color",
            Self::SetDayFill => "set_day_fill",
            Self::SetYearEventStyle => "set_year_event_style",
            Self::SetYearEvents => "set_year_events",
        }
    }
}

impl fmt::Display for Setter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method())
    }
}

/// A setter argument.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Arg {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    /// Pointer to a sibling component.
    Ref(ComponentId),
}

impl From<i64> for Arg {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for Arg {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<ComponentId> for Arg {
    fn from(value: ComponentId) -> Self {
        Self::Ref(value)
    }
}

/// One wiring step.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Instruction {
    /// Allocate the component instance.
    Construct { id: ComponentId, class: String },
    /// Hand the instance to the application's component manager.
    RegisterComponent { id: ComponentId },
    /// Invoke a setter on the instance.
    Call {
        target: ComponentId,
        setter: Setter,
        args: Vec<Arg>,
    },
}

impl Instruction {
    #[must_use]
    pub fn call(target: &ComponentId, setter: Setter, args: Vec<Arg>) -> Self {
        Self::Call {
            target: target.clone(),
            setter,
            args,
        }
    }

    /// The setter invoked, if this is a call.
    #[must_use]
    pub fn setter(&self) -> Option<Setter> {
        match self {
            Self::Call { setter, .. } => Some(*setter),
            Self::Construct { .. } | Self::RegisterComponent { .. } => None,
        }
    }

    /// The setter arguments, empty for non-calls.
    #[must_use]
    pub fn args(&self) -> &[Arg] {
        match self {
            Self::Call { args, .. } => args,
            Self::Construct { .. } | Self::RegisterComponent { .. } => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn id(value: &str) -> ComponentId {
        value.parse().unwrap()
    }

    #[test]
    fn should_build_class_path_from_namespace() {
        assert_eq!(class_path(), "life_matrix::LifeMatrix");
    }

    #[test]
    fn should_expose_setter_and_args_of_call() {
        let call = Instruction::call(
            &id("matrix"),
            Setter::RegisterScreen,
            vec![Arg::from(0), Arg::from(true)],
        );

        assert_eq!(call.setter(), Some(Setter::RegisterScreen));
        assert_eq!(call.args(), &[Arg::Int(0), Arg::Bool(true)]);
    }

    #[test]
    fn should_have_no_setter_when_constructing() {
        let construct = Instruction::Construct {
            id: id("matrix"),
            class: class_path(),
        };
        assert_eq!(construct.setter(), None);
        assert!(construct.args().is_empty());
    }

    #[test]
    fn should_serialize_with_op_tag() {
        let call = Instruction::call(&id("matrix"), Setter::SetTime, vec![Arg::from(id("sntp"))]);

        assert_eq!(
            serde_json::to_value(&call).unwrap(),
            json!({
                "op": "call",
                "target": "matrix",
                "setter": "set_time",
                "args": [{ "type": "ref", "value": "sntp" }],
            })
        );
    }

    #[test]
    fn should_display_method_name() {
        assert_eq!(Setter::SetGolFinalPopulationSensor.to_string(), "set_gol_final_population_sensor");
    }
}
