// crates/wheel-verify-cli/src/main.rs
// ============================================================================
// Module: Wheel Verify CLI Entry Point
// Description: Command dispatcher for artifact verification workflows.
// Purpose: Run verification suites and ad-hoc checks from the command line.
// Dependencies: clap, wheel-verify-core, wheel-verify-config, serde, thiserror.
// ============================================================================

//! ## Overview
//! The Wheel Verify CLI runs configured verification suites, ad-hoc
//! entry-point and manifest checks, and runfiles lookups. All user-facing
//! strings are routed through the message catalog.
//!
//! Exit codes: `0` when every selected check passes, `1` when a check fails
//! or a lookup has no result, `2` for usage and configuration errors.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use serde::Serialize;
use thiserror::Error;
use wheel_verify_cli::i18n::Locale;
use wheel_verify_cli::i18n::set_locale;
use wheel_verify_cli::observer::StderrObserver;
use wheel_verify_cli::render::render_json;
use wheel_verify_cli::render::render_text;
use wheel_verify_cli::t;
use wheel_verify_config::EntryPointConfig;
use wheel_verify_config::ManifestConfig;
use wheel_verify_config::SuiteConfig;
use wheel_verify_config::WheelVerifyConfig;
use wheel_verify_config::config_toml_example;
use wheel_verify_core::ArtifactVerifier;
use wheel_verify_core::DEFAULT_VERSION_FLAG;
use wheel_verify_core::DeferredLocator;
use wheel_verify_core::NoopObserver;
use wheel_verify_core::ProcessEnv;
use wheel_verify_core::Runfiles;
use wheel_verify_core::Suite;
use wheel_verify_core::SuiteReport;
use wheel_verify_core::VerifyObserver;
use wheel_verify_core::expectations::ENTRY_POINT_CHECK;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable for CLI locale selection.
const LANG_ENV: &str = "WHEEL_VERIFY_LANG";
/// Exit code for failed checks and unresolved lookups.
const EXIT_CHECK_FAILED: u8 = 1;
/// Exit code for usage and configuration errors.
const EXIT_USAGE: u8 = 2;
/// Suite name used for ad-hoc checks.
const ADHOC_SUITE: &str = "adhoc";
/// Check name used for ad-hoc manifest checks.
const ADHOC_MANIFEST_CHECK: &str = "manifest";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "wheel-verify", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the configured verification suite.
    Check(CheckCommand),
    /// Verify a single entry point prints the expected version.
    EntryPoint(EntryPointCommand),
    /// Verify a single installed file list.
    Manifest(ManifestCommand),
    /// Resolve a logical runfiles path.
    Locate(LocateCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Report output formats.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Canonical JSON.
    Json,
}

/// Output options shared by verification commands.
#[derive(Args, Debug)]
struct ReportArgs {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Write check lifecycle events to stderr.
    #[arg(long, action = ArgAction::SetTrue)]
    verbose: bool,
}

/// Arguments for `check`.
#[derive(Args, Debug)]
struct CheckCommand {
    /// Config file path (overrides `WHEEL_VERIFY_CONFIG`).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Run only the named check (repeatable).
    #[arg(long = "only", value_name = "NAME")]
    only: Vec<String>,
    /// Output options.
    #[command(flatten)]
    report: ReportArgs,
}

/// Arguments for `entry-point`.
#[derive(Args, Debug)]
struct EntryPointCommand {
    /// Variable holding the entry point's relative path.
    #[arg(long, value_name = "VAR")]
    env: String,
    /// Expected trimmed stdout.
    #[arg(long, value_name = "TEXT")]
    expect: String,
    /// Runfiles workspace prefixed to the relative path.
    #[arg(long, value_name = "WS")]
    workspace: Option<String>,
    /// Argument passed to the entry point.
    #[arg(long, value_name = "FLAG", default_value = DEFAULT_VERSION_FLAG, allow_hyphen_values = true)]
    flag: String,
    /// Output options.
    #[command(flatten)]
    report: ReportArgs,
}

/// Arguments for `manifest`.
#[derive(Args, Debug)]
struct ManifestCommand {
    /// Variable holding the space-separated file list.
    #[arg(long, value_name = "VAR")]
    env: String,
    /// Expected entries in order.
    #[arg(long, value_name = "PATH", num_args = 1.., required = true)]
    expect: Vec<String>,
    /// Output options.
    #[command(flatten)]
    report: ReportArgs,
}

/// Arguments for `locate`.
#[derive(Args, Debug)]
struct LocateCommand {
    /// Logical runfiles path.
    #[arg(value_name = "LOGICAL")]
    logical: String,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Print the canonical example configuration.
    Example,
    /// Validate a configuration file.
    Validate {
        /// Config file path (overrides `WHEEL_VERIFY_CONFIG`).
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },
}

/// JSON output for `locate`.
#[derive(Debug, Serialize)]
struct LocateOutput {
    /// Requested logical path.
    logical: String,
    /// Resolved filesystem path, when mapped.
    resolved: Option<String>,
    /// Whether the resolved path exists.
    exists: bool,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for catalog error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a catalog message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let env_lang = std::env::var(LANG_ENV).ok();
    set_locale(resolve_locale(env_lang.as_deref())?);

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Check(command) => command_check(command),
        Commands::EntryPoint(command) => command_entry_point(command),
        Commands::Manifest(command) => command_manifest(command),
        Commands::Locate(command) => command_locate(command),
        Commands::Config {
            command,
        } => command_config(command),
    }
}

/// Prints CLI help.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

/// Resolves the CLI locale from the environment.
fn resolve_locale(env_lang: Option<&str>) -> CliResult<Locale> {
    match env_lang {
        Some(value) if !value.trim().is_empty() => Locale::parse(value).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        }),
        _ => Ok(Locale::En),
    }
}

// ============================================================================
// SECTION: Verification Commands
// ============================================================================

/// Executes the `check` command.
fn command_check(command: CheckCommand) -> CliResult<ExitCode> {
    let config = WheelVerifyConfig::load(command.config.as_deref(), &ProcessEnv)
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    let suite = config
        .to_suite()
        .select(&command.only)
        .map_err(|err| CliError::new(t!("check.select_failed", error = err)))?;
    run_and_report(&suite, &command.report)
}

/// Executes the `entry-point` command.
fn command_entry_point(command: EntryPointCommand) -> CliResult<ExitCode> {
    let config = WheelVerifyConfig {
        suite: adhoc_suite_config(),
        entry_point: Some(EntryPointConfig {
            name: ENTRY_POINT_CHECK.to_string(),
            env: command.env,
            workspace: command.workspace,
            version_flag: command.flag,
            expected_stdout: command.expect,
        }),
        manifests: Vec::new(),
        source: None,
    };
    let suite = adhoc_suite(&config)?;
    run_and_report(&suite, &command.report)
}

/// Executes the `manifest` command.
fn command_manifest(command: ManifestCommand) -> CliResult<ExitCode> {
    let config = WheelVerifyConfig {
        suite: adhoc_suite_config(),
        entry_point: None,
        manifests: vec![ManifestConfig {
            name: ADHOC_MANIFEST_CHECK.to_string(),
            env: command.env,
            expected: command.expect,
        }],
        source: None,
    };
    let suite = adhoc_suite(&config)?;
    run_and_report(&suite, &command.report)
}

/// Suite metadata for ad-hoc checks.
fn adhoc_suite_config() -> SuiteConfig {
    SuiteConfig {
        name: ADHOC_SUITE.to_string(),
    }
}

/// Validates an ad-hoc check definition and converts it into a suite.
fn adhoc_suite(config: &WheelVerifyConfig) -> CliResult<Suite> {
    config
        .validate()
        .map_err(|err| CliError::new(t!("check.definition_invalid", error = err)))?;
    Ok(config.to_suite())
}

/// Runs a suite and writes its report in the requested format.
fn run_and_report(suite: &Suite, args: &ReportArgs) -> CliResult<ExitCode> {
    let report = execute_suite(suite, args.verbose);
    match args.format {
        OutputFormat::Text => write_stdout_bytes(render_text(&report).as_bytes())?,
        OutputFormat::Json => {
            let bytes = render_json(&report)
                .map_err(|err| CliError::new(t!("output.json_failed", error = err)))?;
            write_stdout_bytes(&bytes)?;
        }
    }
    Ok(report_exit_code(&report))
}

/// Runs every check of a suite against the process environment.
fn execute_suite(suite: &Suite, verbose: bool) -> SuiteReport {
    let stderr_observer = StderrObserver;
    let noop_observer = NoopObserver;
    let observer: &dyn VerifyObserver =
        if verbose { &stderr_observer } else { &noop_observer };
    let locator = DeferredLocator::discover(&ProcessEnv);
    ArtifactVerifier::new(ProcessEnv, locator).with_observer(observer).run_suite(suite)
}

/// Maps a suite report to the process exit code.
fn report_exit_code(report: &SuiteReport) -> ExitCode {
    ExitCode::from(exit_status(report.passed()))
}

/// Returns the numeric exit status for a check outcome.
const fn exit_status(passed: bool) -> u8 {
    if passed { 0 } else { EXIT_CHECK_FAILED }
}

// ============================================================================
// SECTION: Locate Command
// ============================================================================

/// Executes the `locate` command.
fn command_locate(command: LocateCommand) -> CliResult<ExitCode> {
    let runfiles = Runfiles::create(&ProcessEnv)
        .map_err(|err| CliError::new(t!("locate.discover_failed", error = err)))?;
    let resolved = runfiles.rlocation(&command.logical).map_err(|err| {
        CliError::new(t!("locate.failed", logical = command.logical, error = err))
    })?;
    let exists = resolved.as_deref().is_some_and(std::path::Path::exists);

    match command.format {
        OutputFormat::Json => {
            let output = LocateOutput {
                logical: command.logical.clone(),
                resolved: resolved.as_ref().map(|path| path.display().to_string()),
                exists,
            };
            let bytes = render_json(&output)
                .map_err(|err| CliError::new(t!("output.json_failed", error = err)))?;
            write_stdout_bytes(&bytes)?;
        }
        OutputFormat::Text => match &resolved {
            Some(path) if exists => write_stdout_line(&path.display().to_string())
                .map_err(|err| CliError::new(output_error("stdout", &err)))?,
            Some(path) => write_stdout_line(&t!("locate.missing", path = path.display()))
                .map_err(|err| CliError::new(output_error("stdout", &err)))?,
            None => write_stderr_line(&t!("locate.unmapped", logical = command.logical))
                .map_err(|err| CliError::new(output_error("stderr", &err)))?,
        },
    }

    Ok(ExitCode::from(exit_status(exists)))
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Example => {
            write_stdout_bytes(config_toml_example().as_bytes())?;
            Ok(ExitCode::SUCCESS)
        }
        ConfigCommand::Validate {
            config,
        } => {
            let config = WheelVerifyConfig::load(config.as_deref(), &ProcessEnv)
                .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
            let source = config
                .source
                .as_ref()
                .map_or_else(|| t!("config.source.builtin"), |path| path.display().to_string());
            write_stdout_line(&t!(
                "config.validate.ok",
                suite = config.suite.name,
                count = config.to_suite().len(),
                source = source
            ))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes raw bytes to stdout without adding a newline.
fn write_stdout_bytes(bytes: &[u8]) -> CliResult<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(bytes).map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns the usage exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::from(EXIT_USAGE)
}
