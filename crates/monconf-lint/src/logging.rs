//! Structured logging configured from [`LintConfig`].
//!
//! Logs go to stderr so that reports on stdout stay machine readable.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LintConfig;

fn filter_from_config(config: &LintConfig) -> EnvFilter {
    EnvFilter::new(config.log_level.as_filter_str())
}

/// Initialise the logging subsystem based on configuration.
///
/// Records emitted through the `log` facade by the parser library are
/// forwarded to the same subscriber.
///
/// Log level precedence (highest to lowest):
///
/// 1. CLI `--log-level` (parsed into `config.log_level`)
/// 2. `MONCONF_LINT_LOG_LEVEL` (parsed into `config.log_level`)
/// 3. Default configuration value
///
/// If a global subscriber is already set, this function silently ignores
/// the error; the first subscriber wins.
pub fn init_logging(config: &LintConfig) {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter_from_config(config))
        .with_writer(std::io::stderr)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .finish();

    let _ = subscriber.try_init();
}
