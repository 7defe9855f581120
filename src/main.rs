//! Intake - modal application form in the terminal

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use intake::App;
use intake::config::Config;
use std::path::PathBuf;

/// Modal application form in the terminal
#[derive(Parser)]
#[command(name = "intake")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the default location
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the effective configuration as JSON
    Config,
}

fn main() -> Result<()> {
    let log_path = intake::paths::log_path();

    // Clear the log file on startup
    if let Err(e) = std::fs::write(&log_path, "") {
        eprintln!("Warning: Failed to clear log file: {e}");
    }

    // Set DEBUG=0-3 to control verbosity (0=off, 1=warn, 2=info, 3=debug)
    let debug_level = std::env::var("DEBUG")
        .ok()
        .and_then(|v| v.parse::<u8>().ok())
        .unwrap_or(0);

    if debug_level > 0 {
        let level = match debug_level {
            1 => tracing::Level::WARN,
            2 => tracing::Level::INFO,
            _ => tracing::Level::DEBUG,
        };

        let log_dir = log_path
            .parent()
            .map_or_else(std::env::temp_dir, std::path::Path::to_path_buf);
        let file_appender = tracing_appender::rolling::never(log_dir, "intake.log");
        tracing_subscriber::fmt()
            .with_writer(file_appender)
            .with_max_level(level)
            .with_ansi(false)
            .init();
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Let --help and --version exit normally
            if e.kind() == clap::error::ErrorKind::DisplayHelp
                || e.kind() == clap::error::ErrorKind::DisplayVersion
            {
                e.exit();
            }
            eprintln!("error: {}\n", e.kind());
            Cli::command().print_help()?;
            std::process::exit(1);
        }
    };

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Config) => {
            let json =
                serde_json::to_string_pretty(&config).context("Failed to serialize config")?;
            println!("{json}");
            Ok(())
        }
        None => intake::tui::run(App::new(config)),
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    path.map_or_else(Config::load, Config::load_from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["intake"]);
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_config_command() -> Result<(), Box<dyn std::error::Error>> {
        let cli = Cli::parse_from(["intake", "config", "--config", "/tmp/intake.json"]);
        match cli.command {
            Some(Commands::Config) => {}
            None => return Err("Expected Config command".into()),
        }
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/intake.json")));
        Ok(())
    }

    #[test]
    fn test_load_config_from_explicit_path() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = tempfile::TempDir::new()?;
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{"poll_interval_ms": 40}"#)?;

        let config = load_config(Some(&path))?;

        assert_eq!(config.poll_interval_ms, 40);
        Ok(())
    }
}
