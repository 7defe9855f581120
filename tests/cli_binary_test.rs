//! Binary integration tests for CLI commands
//!
//! These tests run the actual intake binary to exercise the CLI code paths.

use std::process::Command;

fn intake_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_intake"))
}

#[test]
fn test_cli_help() -> Result<(), Box<dyn std::error::Error>> {
    let output = intake_bin().arg("--help").output()?;
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Modal application form"));
    Ok(())
}

#[test]
fn test_cli_version() -> Result<(), Box<dyn std::error::Error>> {
    let output = intake_bin().arg("--version").output()?;
    assert!(output.status.success());
    Ok(())
}

#[test]
fn test_cli_config_prints_effective_config() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempfile::TempDir::new()?;
    let path = temp_dir.path().join("config.json");
    std::fs::write(&path, r#"{"title": "Join us", "live_region_delay_ms": 250}"#)?;

    let output = intake_bin().arg("--config").arg(&path).arg("config").output()?;

    assert!(output.status.success());
    let config: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(config["title"], "Join us");
    assert_eq!(config["live_region_delay_ms"], 250);
    assert_eq!(config["poll_interval_ms"], 100);
    Ok(())
}

#[test]
fn test_cli_config_bad_file_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempfile::TempDir::new()?;
    let path = temp_dir.path().join("config.json");
    std::fs::write(&path, "{ not json")?;

    let output = intake_bin().arg("--config").arg(&path).arg("config").output()?;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to parse config"));
    Ok(())
}

#[test]
fn test_cli_unknown_command_fails() -> Result<(), Box<dyn std::error::Error>> {
    let output = intake_bin().arg("bogus").output()?;
    assert!(!output.status.success());
    Ok(())
}
