//! Command line validator for monitoring configuration text.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use eyre::{Result, WrapErr};

use monconf_lint::config::{LintConfig, LogLevel};
use monconf_lint::error::LintError;
use monconf_lint::logging::init_logging;
use monconf_lint::report::{CheckKind, check};

/// Check a trigger expression, interval, item key or macro for validity.
#[derive(Parser, Debug)]
#[command(name = "monconf-lint", version, about)]
struct Args {
    /// What the text is.
    #[arg(value_enum)]
    kind: CheckKind,
    /// The text to check.
    text: String,
    /// Print the report as JSON.
    #[arg(long)]
    json: bool,
    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<LogLevel>,
    /// Accept `{#NAME}` low-level discovery macros.
    #[arg(long)]
    lld_macros: bool,
    /// Reject `{$NAME}` user macros.
    #[arg(long)]
    no_user_macros: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            init_logging(&LintConfig::default());
            tracing::error!(error = %e, "invalid configuration");
            return ExitCode::from(2);
        }
    };
    init_logging(&config);

    match run(&args, &config) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            tracing::error!(error = %e, "lint failed");
            ExitCode::from(2)
        }
    }
}

fn build_config(args: &Args) -> Result<LintConfig, LintError> {
    let config = LintConfig::from_env()?;
    Ok(config.apply_overrides(
        args.log_level,
        args.no_user_macros.then_some(false),
        args.lld_macros.then_some(true),
    ))
}

/// Check the input and print the report; returns whether it was valid.
fn run(args: &Args, config: &LintConfig) -> Result<bool> {
    let report = check(args.kind, &args.text, config).wrap_err("failed to check input")?;
    let mut stdout = io::stdout().lock();
    let written = if args.json {
        report.write_json(&mut stdout)
    } else {
        report.write_text(&mut stdout)
    };
    written.wrap_err("failed to write report")?;
    stdout.flush().wrap_err("failed to flush stdout")?;
    Ok(report.valid)
}
