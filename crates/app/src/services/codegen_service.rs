//! Code generation service: resolves sibling references and emits the
//! ordered wiring for one component instance.

use lifematrix_domain::config::LifeMatrixConfig;
use lifematrix_domain::error::{
    ConfigPath, LifeMatrixError, ResolutionError, ValidationError, ValidationErrorKind,
};
use lifematrix_domain::id::{ComponentId, ComponentKind, ComponentRef};
use lifematrix_domain::instruction::{
    Arg, COMPONENT_CLASS, COMPONENT_NAMESPACE, Instruction, Setter, class_path,
};
use lifematrix_domain::schema::keys;
use lifematrix_domain::screen::ScreenSlot;
use lifematrix_domain::style::{DayFill, MarkerColor, MarkerStyle, YearEventStyle};

use crate::ports::ComponentRegistry;

/// Emits wiring instructions against a registry of declared siblings.
pub struct CodegenService<R> {
    registry: R,
}

impl<R: ComponentRegistry> CodegenService<R> {
    /// Create a new service resolving references through `registry`.
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    /// Identifier of the generated instance: the configured `id`, or one
    /// derived from the class path that does not collide with any sibling.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::DuplicateId`] when the configured `id` is
    /// already declared by a sibling.
    pub fn instance_id(&self, config: &LifeMatrixConfig) -> Result<ComponentId, LifeMatrixError> {
        if let Some(id) = &config.id {
            if self.registry.contains(id) {
                return Err(ResolutionError::DuplicateId { id: id.clone() }.into());
            }
            return Ok(id.clone());
        }

        let base: ComponentId = format!(
            "{COMPONENT_NAMESPACE}_{}_id",
            COMPONENT_CLASS.to_ascii_lowercase()
        )
        .parse()
        .map_err(|err| {
            ValidationError::new(ConfigPath::key(keys::ID), ValidationErrorKind::InvalidId(err))
        })?;

        let mut candidate = base.clone();
        let mut suffix = 2;
        while self.registry.contains(&candidate) {
            candidate = base.with_suffix(suffix);
            suffix += 1;
        }
        Ok(candidate)
    }

    /// Look up `id` and check it names a component of `expected` kind,
    /// returning a handle to it.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::NotFound`] or [`ResolutionError::KindMismatch`].
    pub fn resolve(
        &self,
        key: &str,
        id: &ComponentId,
        expected: &ComponentKind,
    ) -> Result<ComponentRef, ResolutionError> {
        match self.registry.kind_of(id) {
            None => Err(ResolutionError::NotFound {
                key: key.to_string(),
                id: id.clone(),
            }),
            Some(actual) if actual != expected => Err(ResolutionError::KindMismatch {
                key: key.to_string(),
                id: id.clone(),
                expected: expected.clone(),
                actual: actual.clone(),
            }),
            Some(kind) => Ok(ComponentRef {
                id: id.clone(),
                kind: kind.clone(),
            }),
        }
    }

    /// Emit the full wiring for `config`, in its fixed order.
    ///
    /// Every reference is resolved before anything is returned, so a failure
    /// never yields a partial instruction list.
    ///
    /// # Errors
    ///
    /// Returns [`LifeMatrixError::Resolution`] when a referenced sibling is
    /// missing or has the wrong kind, or the instance id is taken.
    #[tracing::instrument(skip_all, fields(time_id = %config.time_id))]
    pub fn emit(&self, config: &LifeMatrixConfig) -> Result<Vec<Instruction>, LifeMatrixError> {
        let id = self.instance_id(config)?;
        let mut out = Vec::new();

        out.push(Instruction::Construct {
            id: id.clone(),
            class: class_path(),
        });
        if let Some(priority) = config.setup_priority {
            out.push(Instruction::call(
                &id,
                Setter::SetSetupPriority,
                vec![Arg::Float(priority)],
            ));
        }
        out.push(Instruction::RegisterComponent { id: id.clone() });

        let references = [
            (
                keys::DISPLAY,
                config.display.as_ref(),
                Setter::SetDisplay,
                ComponentKind::Display,
            ),
            (
                keys::TIME_ID,
                Some(&config.time_id),
                Setter::SetTime,
                ComponentKind::RealTimeClock,
            ),
            (
                keys::STATUS_LED,
                config.status_led.as_ref(),
                Setter::SetStatusLed,
                ComponentKind::LightState,
            ),
            (
                keys::FONT_SMALL,
                config.font_small.as_ref(),
                Setter::SetFontSmall,
                ComponentKind::Font,
            ),
            (
                keys::FONT_MEDIUM,
                config.font_medium.as_ref(),
                Setter::SetFontMedium,
                ComponentKind::Font,
            ),
            (
                keys::GOL_FINAL_GENERATION_SENSOR,
                config.gol_final_generation_sensor.as_ref(),
                Setter::SetGolFinalGenerationSensor,
                ComponentKind::Sensor,
            ),
            (
                keys::GOL_FINAL_POPULATION_SENSOR,
                config.gol_final_population_sensor.as_ref(),
                Setter::SetGolFinalPopulationSensor,
                ComponentKind::Sensor,
            ),
        ];
        for (key, reference, setter, kind) in references {
            let Some(reference) = reference else {
                continue;
            };
            let handle = self.resolve(key, reference, &kind)?;
            tracing::debug!(%key, id = %handle.id, kind = %handle.kind, "resolved reference");
            out.push(Instruction::call(&id, setter, vec![Arg::Ref(handle.id)]));
        }

        out.push(Instruction::call(
            &id,
            Setter::SetGridDimensions,
            vec![
                Arg::Int(i64::from(config.grid_width)),
                Arg::Int(i64::from(config.grid_height)),
            ],
        ));
        out.push(Instruction::call(
            &id,
            Setter::SetScreenCycleTime,
            vec![Arg::Int(seconds(config))],
        ));

        for slot in ScreenSlot::ALL {
            out.push(Instruction::call(
                &id,
                Setter::RegisterScreen,
                vec![Arg::Int(slot.slot()), Arg::Bool(config.screen_enabled(slot))],
            ));
        }

        if let Some(gol) = &config.game_of_life {
            out.push(Instruction::call(
                &id,
                Setter::SetGameUpdateInterval,
                vec![Arg::Int(clamp_u64(gol.update_interval.as_millis()))],
            ));
            out.push(Instruction::call(
                &id,
                Setter::SetDemoMode,
                vec![Arg::Bool(gol.demo_mode)],
            ));
        }

        out.push(Instruction::call(
            &id,
            Setter::SetStyle,
            vec![Arg::Int(config.style.code())],
        ));
        out.push(Instruction::call(
            &id,
            Setter::SetTextAreaPosition,
            vec![Arg::from(config.text_area_position.label())],
        ));
        out.push(Instruction::call(
            &id,
            Setter::SetFillDirection,
            vec![Arg::from(config.fill_direction.label())],
        ));
        out.push(Instruction::call(
            &id,
            Setter::SetGradientType,
            vec![Arg::from(config.gradient_type.as_str())],
        ));

        let styling = [
            (Setter::SetMarkerStyle, config.marker_style.map(MarkerStyle::label)),
            (Setter::SetMarkerColor, config.marker_color.map(MarkerColor::label)),
            (Setter::SetDayFill, config.day_fill.map(DayFill::label)),
            (Setter::SetYearEventStyle, config.year_event_style.map(YearEventStyle::label)),
            (Setter::SetYearEvents, config.year_events.as_deref()),
        ];
        for (setter, value) in styling {
            if let Some(value) = value {
                out.push(Instruction::call(&id, setter, vec![Arg::from(value)]));
            }
        }

        tracing::info!(%id, instructions = out.len(), "emitted component wiring");
        Ok(out)
    }
}

fn seconds(config: &LifeMatrixConfig) -> i64 {
    clamp_u64(config.screen_cycle_time.as_secs())
}

fn clamp_u64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
