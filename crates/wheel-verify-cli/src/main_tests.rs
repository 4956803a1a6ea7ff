// crates/wheel-verify-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Main Helpers Tests
// Description: Unit tests for argument parsing and exit code mapping.
// Purpose: Ensure the command surface parses as documented.
// Dependencies: clap, wheel-verify-core
// ============================================================================

//! ## Overview
//! Parses representative command lines and checks locale resolution and
//! report exit codes.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use clap::CommandFactory;
use clap::Parser;
use wheel_verify_cli::i18n::Locale;
use wheel_verify_core::CheckKind;
use wheel_verify_core::CheckReport;
use wheel_verify_core::SuiteReport;
use wheel_verify_core::VerifyError;

use super::Cli;
use super::Commands;
use super::ConfigCommand;
use super::OutputFormat;
use super::exit_status;
use super::resolve_locale;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("wheel-verify").chain(args.iter().copied())).unwrap()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn command_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn version_flag_is_global() {
    assert!(parse(&["--version"]).show_version);
    assert!(parse(&["check", "--version"]).show_version);
}

#[test]
fn check_collects_repeated_only_flags() {
    let cli = parse(&["check", "--only", "wheel_data", "--only", "entry_point", "--format", "json"]);
    let Some(Commands::Check(command)) = cli.command else {
        panic!("expected check command");
    };
    assert_eq!(command.only, vec!["wheel_data".to_string(), "entry_point".to_string()]);
    assert_eq!(command.report.format, OutputFormat::Json);
    assert!(!command.report.verbose);
    assert!(command.config.is_none());
}

#[test]
fn entry_point_defaults_to_version_flag() {
    let cli = parse(&["entry-point", "--env", "TOOL", "--expect", "tool 1.0"]);
    let Some(Commands::EntryPoint(command)) = cli.command else {
        panic!("expected entry-point command");
    };
    assert_eq!(command.flag, "--version");
    assert_eq!(command.workspace, None);
    assert_eq!(command.report.format, OutputFormat::Text);
}

#[test]
fn entry_point_accepts_hyphenated_flag_values() {
    let cli = parse(&["entry-point", "--env", "TOOL", "--expect", "v", "--flag", "-V"]);
    let Some(Commands::EntryPoint(command)) = cli.command else {
        panic!("expected entry-point command");
    };
    assert_eq!(command.flag, "-V");
}

#[test]
fn manifest_requires_expected_entries() {
    let result = Cli::try_parse_from(["wheel-verify", "manifest", "--env", "LIST"]);
    assert!(result.is_err());

    let cli = parse(&["manifest", "--env", "LIST", "--expect", "a", "b", "--verbose"]);
    let Some(Commands::Manifest(command)) = cli.command else {
        panic!("expected manifest command");
    };
    assert_eq!(command.expect, vec!["a".to_string(), "b".to_string()]);
    assert!(command.report.verbose);
}

#[test]
fn config_subcommands_parse() {
    let cli = parse(&["config", "validate", "--config", "/tmp/wheel-verify.toml"]);
    let Some(Commands::Config {
        command: ConfigCommand::Validate {
            config,
        },
    }) = cli.command
    else {
        panic!("expected config validate");
    };
    assert_eq!(config.as_deref(), Some(std::path::Path::new("/tmp/wheel-verify.toml")));
    assert!(matches!(
        parse(&["config", "example"]).command,
        Some(Commands::Config {
            command: ConfigCommand::Example
        })
    ));
}

#[test]
fn locale_resolution_accepts_english_only() {
    assert_eq!(resolve_locale(None).unwrap(), Locale::En);
    assert_eq!(resolve_locale(Some("")).unwrap(), Locale::En);
    assert_eq!(resolve_locale(Some("en_US.UTF-8")).unwrap(), Locale::En);
    let err = resolve_locale(Some("fr")).unwrap_err();
    assert!(err.to_string().contains("WHEEL_VERIFY_LANG"));
}

#[test]
fn exit_code_reflects_suite_outcome() {
    let pass = CheckReport::from_result::<()>("m", CheckKind::Manifest, "M", &Ok(()));
    let fail = CheckReport::from_result::<()>(
        "m",
        CheckKind::Manifest,
        "M",
        &Err(VerifyError::MissingEnvironmentVariable {
            name: "M".to_string(),
        }),
    );
    let passing = SuiteReport {
        suite: "s".to_string(),
        checks: vec![pass.clone()],
    };
    let failing = SuiteReport {
        suite: "s".to_string(),
        checks: vec![pass, fail],
    };
    assert_eq!(exit_status(passing.passed()), 0);
    assert_eq!(exit_status(failing.passed()), 1);
}
