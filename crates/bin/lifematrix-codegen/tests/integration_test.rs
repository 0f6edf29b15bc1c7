//! End-to-end tests for the full generation pipeline.
//!
//! The first group wires the real adapters and services together in-process
//! (YAML document in, rendered code out). The second group runs the compiled
//! binary against fixture files in a scratch directory.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use lifematrix_adapter_render::{OutputFormat, render};
use lifematrix_adapter_yaml::{DEFAULT_COMPONENT_KEY, load_str};
use lifematrix_app::services::codegen_service::CodegenService;
use lifematrix_app::services::validation_service::ConfigValidator;
use lifematrix_domain::error::{LifeMatrixError, ResolutionError};

const SIBLINGS: &str = "
time:
  - platform: sntp
    id: sntp_time
display:
  - platform: hub75
    id: matrix_display
font:
  - file: small.ttf
    id: font_small
sensor:
  - platform: template
    id: gol_generations
";

/// Run the in-process pipeline on a device document.
fn generate(component: &str, format: OutputFormat) -> anyhow::Result<String> {
    let text = format!("{SIBLINGS}\nlife_matrix:\n{component}");
    let document = load_str(&text, DEFAULT_COMPONENT_KEY)?;
    let settings = ConfigValidator::new().validate(&document.component)?;
    let instructions = CodegenService::new(&document.registry).emit(&settings)?;
    Ok(render(format, &instructions)?)
}

fn setup_lines(cpp: &str) -> Vec<&str> {
    cpp.lines()
        .map(str::trim)
        .filter(|line| line.starts_with("life_matrix_lifematrix_id"))
        .collect()
}

// ---------------------------------------------------------------------------
// In-process pipeline
// ---------------------------------------------------------------------------

#[test]
fn should_generate_minimal_wiring() {
    let cpp = generate("  time_id: sntp_time\n", OutputFormat::Cpp).unwrap();

    assert!(cpp.starts_with("life_matrix::LifeMatrix *life_matrix_lifematrix_id;\n"));
    assert!(cpp.contains("App.register_component(life_matrix_lifematrix_id);"));
    assert_eq!(
        setup_lines(&cpp),
        vec![
            "life_matrix_lifematrix_id = new life_matrix::LifeMatrix();",
            "life_matrix_lifematrix_id->set_time(sntp_time);",
            "life_matrix_lifematrix_id->set_grid_dimensions(32, 120);",
            "life_matrix_lifematrix_id->set_screen_cycle_time(3);",
            "life_matrix_lifematrix_id->register_screen(0, true);",
            "life_matrix_lifematrix_id->register_screen(1, true);",
            "life_matrix_lifematrix_id->register_screen(2, true);",
            "life_matrix_lifematrix_id->register_screen(3, true);",
            "life_matrix_lifematrix_id->register_screen(4, true);",
            "life_matrix_lifematrix_id->register_screen(5, true);",
            "life_matrix_lifematrix_id->set_style(0);",
            "life_matrix_lifematrix_id->set_text_area_position(\"Top\");",
            "life_matrix_lifematrix_id->set_fill_direction(\"Bottom to Top\");",
            "life_matrix_lifematrix_id->set_gradient_type(\"Red-Blue\");",
        ]
    );
}

#[test]
fn should_generate_full_wiring_from_yaml() {
    let component = "
  display: matrix_display
  time_id: sntp_time
  font_small: font_small
  gol_final_generation_sensor: gol_generations
  grid_width: 64
  grid_height: 64
  screen_cycle_time: 1min
  screens:
    year:
      enabled: false
    habits:
  game_of_life:
    update_interval: 100ms
    demo_mode: yes
  style: Gradient
  gradient_type: Cyan-Magenta
  text_area_position: Bottom
";
    let cpp = generate(component, OutputFormat::Cpp).unwrap();
    let lines = setup_lines(&cpp);

    assert_eq!(lines[1], "life_matrix_lifematrix_id->set_display(matrix_display);");
    assert_eq!(lines[2], "life_matrix_lifematrix_id->set_time(sntp_time);");
    assert_eq!(lines[3], "life_matrix_lifematrix_id->set_font_small(font_small);");
    assert_eq!(
        lines[4],
        "life_matrix_lifematrix_id->set_gol_final_generation_sensor(gol_generations);"
    );
    assert!(lines.contains(&"life_matrix_lifematrix_id->set_grid_dimensions(64, 64);"));
    assert!(lines.contains(&"life_matrix_lifematrix_id->set_screen_cycle_time(60);"));
    assert!(lines.contains(&"life_matrix_lifematrix_id->register_screen(0, false);"));
    assert!(lines.contains(&"life_matrix_lifematrix_id->register_screen(4, true);"));
    assert!(lines.contains(&"life_matrix_lifematrix_id->set_game_update_interval(100);"));
    assert!(lines.contains(&"life_matrix_lifematrix_id->set_demo_mode(true);"));
    assert!(lines.contains(&"life_matrix_lifematrix_id->set_style(1);"));
    assert!(lines.contains(&"life_matrix_lifematrix_id->set_gradient_type(\"Cyan-Magenta\");"));
    assert!(lines.contains(&"life_matrix_lifematrix_id->set_text_area_position(\"Bottom\");"));
}

#[test]
fn should_reject_yaml_boolean_for_string_option() {
    let err = generate("  time_id: sntp_time\n  gradient_type: true\n", OutputFormat::Cpp)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid configuration: [gradient_type] auto-converted this value to boolean, please wrap the value in quotes"
    );
}

#[test]
fn should_fail_without_output_when_reference_unknown() {
    let err = generate("  time_id: sntp_time\n  font_medium: missing_font\n", OutputFormat::Cpp)
        .unwrap_err();
    let err = err.downcast::<LifeMatrixError>().unwrap();
    assert!(matches!(
        err,
        LifeMatrixError::Resolution(ResolutionError::NotFound { .. })
    ));
}

#[test]
fn should_fail_when_reference_has_wrong_platform() {
    let err = generate("  time_id: matrix_display\n", OutputFormat::Cpp).unwrap_err();
    assert_eq!(
        err.to_string(),
        "unresolved reference: [time_id] ID 'matrix_display' of type display::Display doesn't inherit from time::RealTimeClock"
    );
}

#[test]
fn should_generate_json_instruction_list() {
    let json = generate("  time_id: sntp_time\n  id: matrix\n", OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let steps = value.as_array().unwrap();

    assert_eq!(steps[0]["op"], "construct");
    assert_eq!(steps[0]["id"], "matrix");
    assert_eq!(steps[0]["class"], "life_matrix::LifeMatrix");
    assert_eq!(steps[1]["op"], "register_component");
    assert_eq!(steps[2]["setter"], "set_time");
}

// ---------------------------------------------------------------------------
// Binary
// ---------------------------------------------------------------------------

/// Fresh scratch directory for one test.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "lifematrix-codegen-{name}-{}",
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// The binary in `dir`, with none of its environment overrides inherited.
fn command(dir: &Path, args: &[&str]) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_lifematrix-codegen"));
    command
        .args(args)
        .current_dir(dir)
        .env_remove("LIFEMATRIX_INPUT")
        .env_remove("LIFEMATRIX_OUTPUT")
        .env_remove("LIFEMATRIX_FORMAT")
        .env_remove("LIFEMATRIX_LOG")
        .env_remove("RUST_LOG");
    command
}

fn run(dir: &Path, args: &[&str]) -> Output {
    command(dir, args).output().unwrap()
}

fn write_device(dir: &Path, name: &str) {
    std::fs::write(
        dir.join(name),
        format!("{SIBLINGS}\nlife_matrix:\n  time_id: sntp_time\n"),
    )
    .unwrap();
}

#[test]
fn should_write_cpp_to_stdout() {
    let dir = scratch_dir("stdout");
    std::fs::write(
        dir.join("device.yaml"),
        format!("{SIBLINGS}\nlife_matrix:\n  time_id: sntp_time\n"),
    )
    .unwrap();

    let output = run(&dir, &["device.yaml"]);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("life_matrix_lifematrix_id->set_time(sntp_time);"));
}

#[test]
fn should_write_output_file_using_tool_config() {
    let dir = scratch_dir("config");
    std::fs::write(
        dir.join("device.yaml"),
        format!("{SIBLINGS}\nlife_matrix:\n  time_id: sntp_time\n"),
    )
    .unwrap();
    std::fs::write(
        dir.join("lifematrix.toml"),
        "[input]\npath = 'device.yaml'\n\n[output]\npath = 'wiring.json'\nformat = 'json'\n",
    )
    .unwrap();

    let output = run(&dir, &[]);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(output.stdout.is_empty());
    let written = std::fs::read_to_string(dir.join("wiring.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value[0]["op"], "construct");
}

#[test]
fn should_exit_non_zero_with_diagnostic_when_time_id_missing() {
    let dir = scratch_dir("invalid");
    std::fs::write(
        dir.join("device.yaml"),
        format!("{SIBLINGS}\nlife_matrix:\n  grid_width: 64\n"),
    )
    .unwrap();

    let output = run(&dir, &["device.yaml", "out.cpp"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[time_id] required key not provided"), "{stderr}");
    assert!(!dir.join("out.cpp").exists());
}

#[test]
fn should_exit_non_zero_when_document_missing() {
    let dir = scratch_dir("missing");

    let output = run(&dir, &["nowhere.yaml"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("nowhere.yaml"));
}

#[test]
fn should_take_input_output_and_format_from_env() {
    let dir = scratch_dir("env");
    write_device(&dir, "device.yaml");
    std::fs::write(dir.join("lifematrix.toml"), "[output]\nformat = 'cpp'\n").unwrap();

    let output = command(&dir, &[])
        .env("LIFEMATRIX_INPUT", "device.yaml")
        .env("LIFEMATRIX_OUTPUT", "wiring.json")
        .env("LIFEMATRIX_FORMAT", "json")
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(output.stdout.is_empty());
    let written = std::fs::read_to_string(dir.join("wiring.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value[0]["op"], "construct");
}

#[test]
fn should_prefer_positional_args_over_env() {
    let dir = scratch_dir("args-over-env");
    write_device(&dir, "device.yaml");

    let output = command(&dir, &["device.yaml", "from_args.cpp"])
        .env("LIFEMATRIX_INPUT", "nowhere.yaml")
        .env("LIFEMATRIX_OUTPUT", "from_env.cpp")
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let written = std::fs::read_to_string(dir.join("from_args.cpp")).unwrap();
    assert!(written.contains("void setup() {"));
    assert!(!dir.join("from_env.cpp").exists());
}

#[test]
fn should_exit_non_zero_when_env_format_unknown() {
    let dir = scratch_dir("bad-format");
    write_device(&dir, "device.yaml");

    let output = command(&dir, &["device.yaml", "out.cpp"])
        .env("LIFEMATRIX_FORMAT", "yaml")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown output format 'yaml'"), "{stderr}");
    assert!(!dir.join("out.cpp").exists());
}

#[test]
fn should_log_at_level_from_env() {
    let dir = scratch_dir("log-env");
    write_device(&dir, "device.yaml");

    let output = command(&dir, &["device.yaml", "out.cpp"])
        .env("LIFEMATRIX_LOG", "debug")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("configuration validated"), "{stderr}");
}

#[test]
fn should_prefer_rust_log_over_lifematrix_log() {
    let dir = scratch_dir("rust-log");
    write_device(&dir, "device.yaml");

    let output = command(&dir, &["device.yaml", "out.cpp"])
        .env("LIFEMATRIX_LOG", "debug")
        .env("RUST_LOG", "error")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("configuration validated"), "{stderr}");
    assert!(!stderr.contains("wrote generated wiring"), "{stderr}");
}
