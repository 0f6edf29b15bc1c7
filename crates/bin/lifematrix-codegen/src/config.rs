//! Configuration loading: TOML file with environment variable and
//! command-line overrides.
//!
//! Looks for `lifematrix.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values, and positional arguments `[input] [output]`
//! take precedence over both.

use std::path::PathBuf;

use lifematrix_adapter_render::OutputFormat;
use lifematrix_adapter_yaml::DEFAULT_COMPONENT_KEY;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Device document settings.
    pub input: InputConfig,
    /// Generated output settings.
    pub output: OutputConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Where the device document comes from.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Path of the device YAML document.
    pub path: PathBuf,
    /// Top-level key holding the component configuration.
    pub component_key: String,
}

/// Where the generated wiring goes.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output file; standard output when absent.
    pub path: Option<PathBuf>,
    /// Rendering format.
    pub format: OutputFormat,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `lifematrix.toml` (if present), apply
    /// environment-variable overrides, then positional arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or the
    /// resulting configuration is invalid.
    pub fn load(args: impl IntoIterator<Item = String>) -> Result<Self, ConfigError> {
        let mut config = Self::from_file("lifematrix.toml")?;
        config.apply_env_overrides()?;
        config.apply_args(args)?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("LIFEMATRIX_INPUT") {
            self.input.path = PathBuf::from(val);
        }
        if let Ok(val) = std::env::var("LIFEMATRIX_OUTPUT") {
            self.output.path = output_path(&val);
        }
        if let Ok(val) = std::env::var("LIFEMATRIX_FORMAT") {
            self.output.format = val
                .parse()
                .map_err(|_| ConfigError::Validation(format!("unknown output format '{val}'")))?;
        }
        if let Ok(val) = std::env::var("LIFEMATRIX_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
        Ok(())
    }

    fn apply_args(&mut self, args: impl IntoIterator<Item = String>) -> Result<(), ConfigError> {
        let mut args = args.into_iter();
        if let Some(input) = args.next() {
            self.input.path = PathBuf::from(input);
        }
        if let Some(output) = args.next() {
            self.output.path = output_path(&output);
        }
        if let Some(extra) = args.next() {
            return Err(ConfigError::Validation(format!(
                "unexpected argument '{extra}', usage: lifematrix-codegen [input] [output]"
            )));
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.input.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "input path must not be empty".to_string(),
            ));
        }
        if self.input.component_key.is_empty() {
            return Err(ConfigError::Validation(
                "component key must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// `-` stands for standard output.
fn output_path(value: &str) -> Option<PathBuf> {
    (value != "-").then(|| PathBuf::from(value))
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("lifematrix.yaml"),
            component_key: DEFAULT_COMPONENT_KEY.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "lifematrix=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.input.path, PathBuf::from("lifematrix.yaml"));
        assert_eq!(config.input.component_key, "life_matrix");
        assert_eq!(config.output.path, None);
        assert_eq!(config.output.format, OutputFormat::Cpp);
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.input.component_key, "life_matrix");
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [input]
            path = 'device.yaml'
            component_key = 'matrix'

            [output]
            path = 'out/life_matrix.cpp'
            format = 'json'

            [logging]
            filter = 'debug'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.input.path, PathBuf::from("device.yaml"));
        assert_eq!(config.input.component_key, "matrix");
        assert_eq!(config.output.path, Some(PathBuf::from("out/life_matrix.cpp")));
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn should_parse_partial_toml_with_defaults() {
        let toml = "
            [output]
            format = 'json'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.input.path, PathBuf::from("lifematrix.yaml"));
    }

    #[test]
    fn should_reject_unknown_format_in_toml() {
        let result: Result<Config, _> = toml::from_str("[output]\nformat = 'yaml'");
        assert!(result.is_err());
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.input.component_key, "life_matrix");
    }

    #[test]
    fn should_override_paths_from_positional_args() {
        let mut config = Config::default();
        config
            .apply_args(args(&["device.yaml", "generated.cpp"]))
            .unwrap();
        assert_eq!(config.input.path, PathBuf::from("device.yaml"));
        assert_eq!(config.output.path, Some(PathBuf::from("generated.cpp")));
    }

    #[test]
    fn should_write_to_stdout_when_output_is_dash() {
        let mut config = Config::default();
        config.output.path = Some(PathBuf::from("previous.cpp"));
        config.apply_args(args(&["device.yaml", "-"])).unwrap();
        assert_eq!(config.output.path, None);
    }

    #[test]
    fn should_reject_extra_arguments() {
        let mut config = Config::default();
        let result = config.apply_args(args(&["a.yaml", "b.cpp", "c"]));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_reject_empty_input_path() {
        let mut config = Config::default();
        config.input.path = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_accept_default_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
