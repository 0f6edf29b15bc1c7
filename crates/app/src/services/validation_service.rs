//! Validation service: turns a raw configuration mapping into typed settings.

use serde_json::Value;

use lifematrix_domain::config::LifeMatrixConfig;
use lifematrix_domain::error::LifeMatrixError;
use lifematrix_domain::schema::{Schema, life_matrix_schema};
use lifematrix_domain::style::KNOWN_GRADIENT_TYPES;

/// Validates `life_matrix` configuration blocks.
#[derive(Debug, Clone)]
pub struct ConfigValidator {
    schema: Schema,
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigValidator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            schema: life_matrix_schema(),
        }
    }

    /// Validate a configuration mapping, filling defaults.
    ///
    /// # Errors
    ///
    /// Returns [`LifeMatrixError::Validation`] on the first violation, naming
    /// the offending key path.
    #[tracing::instrument(skip_all)]
    pub fn validate(&self, raw: &Value) -> Result<LifeMatrixConfig, LifeMatrixError> {
        let validated = self.schema.validate(raw)?;
        let config = LifeMatrixConfig::from_validated(&validated)?;

        if !KNOWN_GRADIENT_TYPES.contains(&config.gradient_type.as_str()) {
            tracing::warn!(
                gradient_type = %config.gradient_type,
                "gradient type is not one the component recognises; it will keep its current gradient"
            );
        }
        if config.time_segments.is_some() {
            tracing::warn!("time_segments is validated but not applied to the component");
        }

        tracing::debug!(
            time_id = %config.time_id,
            grid_width = config.grid_width,
            grid_height = config.grid_height,
            "configuration validated"
        );
        Ok(config)
    }
}
