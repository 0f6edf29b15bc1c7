//! # lifematrix-codegen: LifeMatrix wiring generator
//!
//! Composition root that wires the adapters together and runs one generation.
//!
//! ## Responsibilities
//! - Parse configuration (CLI args, env vars, config file)
//! - Initialise tracing (stderr, so stdout stays clean for generated code)
//! - Load the device document and build the sibling registry
//! - Validate the component block and emit its wiring
//! - Render and write the result to the output file or stdout
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod config;

use std::io::Write as _;

use anyhow::Context as _;
use lifematrix_adapter_yaml::load_path;
use lifematrix_app::services::codegen_service::CodegenService;
use lifematrix_app::services::validation_service::ConfigValidator;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{Config, LoggingConfig};

fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(&logging.filter)
        .with_context(|| format!("invalid log filter '{}'", logging.filter))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .try_init()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let config = Config::load(std::env::args().skip(1)).context("failed to load configuration")?;
    init_tracing(&config.logging)?;

    // Input
    let document = load_path(&config.input.path, &config.input.component_key)
        .with_context(|| format!("failed to load {}", config.input.path.display()))?;

    // Services
    let settings = ConfigValidator::new().validate(&document.component)?;
    let instructions = CodegenService::new(&document.registry).emit(&settings)?;

    // Output
    let text = lifematrix_adapter_render::render(config.output.format, &instructions)?;
    match &config.output.path {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote generated wiring");
        }
        None => std::io::stdout()
            .lock()
            .write_all(text.as_bytes())
            .context("failed to write to stdout")?,
    }

    Ok(())
}
