//! # Smart Builder CLI
//!
//! Interactive construction estimator. Asks for a construction type, its
//! area and attributes, and its rooms, prints the materials estimate and the
//! full cost report, then lets the user sign the plan or try another.
//!
//! ## Usage
//!
//! ```bash
//! smart-builder                     # interactive session
//! smart-builder --json              # also print reports as JSON
//! smart-builder --legacy-room-cap   # keep at most 100 rooms per construction
//! echo "Building 200 3 Grey Kitchen 0 N Y" | smart-builder
//! ```
//!
//! Exit status is 0 when the session ends (signed or declined) and 1 on an
//! invalid construction or room type, closed input, or a bad settings file.

mod console;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use builder_core::settings::{ReportFormat, Settings, LEGACY_ROOM_CAPACITY};
use builder_core::workflow::Workflow;

use console::{ConsolePrompter, ConsoleReporter};

#[derive(Parser)]
#[command(name = "smart-builder", version, about = "Interactive construction cost estimator")]
struct Cli {
    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Keep at most N rooms per construction (extra rooms are dropped)
    #[arg(long, value_name = "N", conflicts_with = "legacy_room_cap")]
    room_cap: Option<usize>,

    /// Keep at most 100 rooms per construction
    #[arg(long)]
    legacy_room_cap: bool,

    /// Print reports and the signed contract as JSON as well as text
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) -> Result<()> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // stdout carries prompts and reports; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing subscriber: {e}"))
}

/// CLI flag > settings file > default.
fn resolve_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::from_json_file(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };

    if cli.legacy_room_cap {
        settings.room_capacity = Some(LEGACY_ROOM_CAPACITY);
    } else if let Some(cap) = cli.room_cap {
        settings.room_capacity = Some(cap);
    }
    if cli.json {
        settings.report_format = ReportFormat::Json;
    }

    Ok(settings)
}

/// Resolve settings, run one session over `input`, and map the result to an
/// exit status. Prompts go to `prompts`, reports to `reports`.
fn run<I, P, R>(cli: &Cli, input: I, prompts: P, reports: R) -> ExitCode
where
    I: BufRead,
    P: Write,
    R: Write,
{
    let settings = match resolve_settings(cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(?settings, "settings resolved");

    let format = settings.report_format;
    let prompter = ConsolePrompter::new(input, prompts);
    let reporter = ConsoleReporter::new(reports, format);
    let mut workflow = Workflow::new(prompter, reporter, settings);

    match workflow.run() {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!();
            eprintln!("Error: {}", e);
            if format == ReportFormat::Json {
                if let Ok(json) = serde_json::to_string_pretty(&e) {
                    eprintln!();
                    eprintln!("Error JSON:");
                    eprintln!("{}", json);
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_tracing(cli.verbose) {
        eprintln!("Warning: {:#}", e);
    }

    run(&cli, io::stdin().lock(), io::stdout(), io::stdout())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from(["smart-builder", "--room-cap", "5", "--json"]);
        let settings = resolve_settings(&cli).unwrap();
        assert_eq!(settings.room_capacity, Some(5));
        assert_eq!(settings.report_format, ReportFormat::Json);
    }

    #[test]
    fn test_legacy_room_cap() {
        let cli = Cli::parse_from(["smart-builder", "--legacy-room-cap"]);
        let settings = resolve_settings(&cli).unwrap();
        assert_eq!(settings.room_capacity, Some(100));
        assert_eq!(settings.report_format, ReportFormat::Text);
    }

    #[test]
    fn test_room_cap_conflicts_with_legacy() {
        let result = Cli::try_parse_from(["smart-builder", "--room-cap", "5", "--legacy-room-cap"]);
        assert!(result.is_err());
    }

    fn session(args: &[&str], input: &str) -> (ExitCode, String) {
        let cli = Cli::parse_from(args);
        let mut reports = Vec::new();
        let code = run(&cli, Cursor::new(input.to_string()), io::sink(), &mut reports);
        (code, String::from_utf8(reports).unwrap())
    }

    #[test]
    fn test_signed_session_exits_zero() {
        let (code, out) = session(&["smart-builder"], "Building 200 3 Grey Kitchen 0 N Y\n");
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(out.contains("Contract signed. Construction begins!"));
        assert!(out.contains("Thank you for considering our services. Goodbye!"));
    }

    #[test]
    fn test_declined_session_exits_zero() {
        let (code, out) = session(&["smart-builder"], "House 100 Blue 2 1 1 Kitchen 0 N\nN\nN\n");
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(!out.contains("Contract signed"));
        assert!(out.contains("Goodbye!"));
    }

    #[test]
    fn test_unknown_construction_type_exits_one() {
        let (code, out) = session(&["smart-builder"], "Shed\n");
        assert_eq!(code, ExitCode::FAILURE);
        assert!(!out.contains("Goodbye!"));
    }

    #[test]
    fn test_unknown_room_type_exits_one() {
        let (code, out) = session(&["smart-builder"], "House 100 Blue 2 1 1 Attic 1\n");
        assert_eq!(code, ExitCode::FAILURE);
        assert!(!out.contains("Goodbye!"));
    }

    #[test]
    fn test_closed_input_exits_one() {
        let (code, _) = session(&["smart-builder"], "House 100 Blue");
        assert_eq!(code, ExitCode::FAILURE);
    }

    #[test]
    fn test_bad_settings_file_exits_one() {
        let (code, out) = session(
            &["smart-builder", "--config", "/nonexistent/smart-builder.json"],
            "Building 200 3 Grey Kitchen 0 N Y\n",
        );
        assert_eq!(code, ExitCode::FAILURE);
        assert!(out.is_empty());
    }

    #[test]
    fn test_json_flag_prints_contract_json() {
        let (code, out) = session(&["smart-builder", "--json"], "Building 200 3 Grey Kitchen 0 N Y\n");
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(out.contains("JSON Output:"));
    }

    #[test]
    fn test_second_tracing_init_is_reported() {
        let _ = init_tracing(0);
        let err = init_tracing(2).unwrap_err();
        assert!(err.to_string().contains("Failed to initialize tracing subscriber"));
    }

    #[test]
    fn test_missing_settings_file() {
        let cli = Cli::parse_from(["smart-builder", "--config", "/nonexistent/smart-builder.json"]);
        let err = resolve_settings(&cli).unwrap_err();
        assert!(format!("{:#}", err).contains("failed to load settings"));
    }
}
