//! Tool configuration parsed from environment variables.
//!
//! Every setting can be overridden via environment variables prefixed with
//! `MONCONF_LINT_`; command line flags take precedence over both.

use std::env;
use std::str::FromStr;

use monconf_parsers::{PREVIEW_LEN, ParserOptions};

use crate::error::LintError;

/// Log level enumeration matching tracing crate levels.
///
/// Defaults to `Warn` so diagnostics stay quiet unless asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Most verbose logging, includes parser trace output.
    Trace,
    /// Debug-level information for development.
    Debug,
    /// Standard informational messages.
    Info,
    /// Warning messages for potentially problematic situations.
    #[default]
    Warn,
    /// Error messages for failures.
    Error,
}

impl FromStr for LogLevel {
    type Err = LintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(LintError::InvalidConfig(format!(
                "unknown log level '{s}', expected one of: trace, debug, info, warn, error"
            ))),
        }
    }
}

impl LogLevel {
    /// Convert to a tracing filter directive string.
    #[must_use]
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

const LOG_LEVEL_VAR: &str = "MONCONF_LINT_LOG_LEVEL";
const PREVIEW_LEN_VAR: &str = "MONCONF_LINT_PREVIEW_LEN";
const USER_MACROS_VAR: &str = "MONCONF_LINT_USER_MACROS";
const LLD_MACROS_VAR: &str = "MONCONF_LINT_LLD_MACROS";

/// Configuration for a lint run.
///
/// # Environment Variables
///
/// - `MONCONF_LINT_LOG_LEVEL`: log level (trace, debug, info, warn, error)
/// - `MONCONF_LINT_PREVIEW_LEN`: characters shown after an error position
/// - `MONCONF_LINT_USER_MACROS`: accept `{$NAME}` macros (true/false)
/// - `MONCONF_LINT_LLD_MACROS`: accept `{#NAME}` macros (true/false)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: LogLevel,
    /// Number of characters quoted after an error position.
    pub preview_len: usize,
    /// Whether user macros are accepted where the grammar allows them.
    pub user_macros: bool,
    /// Whether LLD macros are accepted where the grammar allows them.
    pub lld_macros: bool,
}

impl Default for LintConfig {
    fn default() -> Self {
        let options = ParserOptions::default();
        Self {
            log_level: LogLevel::default(),
            preview_len: PREVIEW_LEN,
            user_macros: options.user_macros,
            lld_macros: options.lld_macros,
        }
    }
}

impl LintConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `LintError::InvalidConfig` if an environment variable contains
    /// an invalid value.
    pub fn from_env() -> Result<Self, LintError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through `lookup`, falling back to defaults for
    /// missing values.
    ///
    /// # Errors
    ///
    /// Returns `LintError::InvalidConfig` if a value cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, LintError> {
        let defaults = Self::default();

        let log_level = match lookup(LOG_LEVEL_VAR) {
            Some(val) => val.parse()?,
            None => defaults.log_level,
        };

        let preview_len = match lookup(PREVIEW_LEN_VAR) {
            Some(val) => val.trim().parse().map_err(|_| {
                LintError::InvalidConfig(format!(
                    "invalid preview length '{val}', expected a non-negative integer"
                ))
            })?,
            None => defaults.preview_len,
        };

        let user_macros = match lookup(USER_MACROS_VAR) {
            Some(val) => parse_flag(USER_MACROS_VAR, &val)?,
            None => defaults.user_macros,
        };

        let lld_macros = match lookup(LLD_MACROS_VAR) {
            Some(val) => parse_flag(LLD_MACROS_VAR, &val)?,
            None => defaults.lld_macros,
        };

        Ok(Self {
            log_level,
            preview_len,
            user_macros,
            lld_macros,
        })
    }

    /// Apply optional overrides to an existing configuration.
    ///
    /// This is intended for CLI overrides that should take precedence over
    /// environment-based defaults.
    #[must_use]
    pub fn apply_overrides(
        mut self,
        log_level: Option<LogLevel>,
        user_macros: Option<bool>,
        lld_macros: Option<bool>,
    ) -> Self {
        if let Some(level) = log_level {
            self.log_level = level;
        }
        if let Some(enabled) = user_macros {
            self.user_macros = enabled;
        }
        if let Some(enabled) = lld_macros {
            self.lld_macros = enabled;
        }
        self
    }

    /// Create a new configuration with the specified log level.
    #[must_use]
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Parser options matching the macro settings.
    #[must_use]
    pub const fn parser_options(&self) -> ParserOptions {
        ParserOptions {
            user_macros: self.user_macros,
            lld_macros: self.lld_macros,
        }
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool, LintError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(LintError::InvalidConfig(format!(
            "invalid value '{value}' for {name}, expected true or false"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use rstest::rstest;

    fn lookup_from<'a>(
        pairs: &'a [(&'a str, &'a str)],
    ) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = pairs.iter().copied().collect();
        move |name: &str| map.get(name).map(|value| (*value).to_owned())
    }

    #[rstest]
    #[case("trace", LogLevel::Trace)]
    #[case("DEBUG", LogLevel::Debug)]
    #[case("Info", LogLevel::Info)]
    #[case("warning", LogLevel::Warn)]
    #[case("error", LogLevel::Error)]
    fn log_level_parses_case_insensitively(#[case] input: &str, #[case] expected: LogLevel) {
        #[expect(clippy::expect_used, reason = "test asserts valid input")]
        let level: LogLevel = input.parse().expect("valid log level");
        assert_eq!(level, expected);
    }

    #[test]
    fn log_level_rejects_unknown_values() {
        let Err(err) = "verbose".parse::<LogLevel>() else {
            panic!("expected an unknown log level to be rejected");
        };
        assert!(err.to_string().contains("unknown log level 'verbose'"));
    }

    #[test]
    fn empty_environment_yields_defaults() {
        #[expect(clippy::expect_used, reason = "test asserts valid input")]
        let config = LintConfig::from_lookup(lookup_from(&[])).expect("defaults");
        assert_eq!(config, LintConfig::default());
        assert_eq!(config.preview_len, 50);
        assert!(config.user_macros);
        assert!(!config.lld_macros);
    }

    #[test]
    fn environment_values_are_applied() {
        let pairs = [
            ("MONCONF_LINT_LOG_LEVEL", "debug"),
            ("MONCONF_LINT_PREVIEW_LEN", "10"),
            ("MONCONF_LINT_USER_MACROS", "off"),
            ("MONCONF_LINT_LLD_MACROS", "1"),
        ];
        #[expect(clippy::expect_used, reason = "test asserts valid input")]
        let config = LintConfig::from_lookup(lookup_from(&pairs)).expect("valid config");
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.preview_len, 10);
        assert_eq!(
            config.parser_options(),
            ParserOptions::strict().with_lld_macros(true)
        );
    }

    #[rstest]
    #[case("MONCONF_LINT_PREVIEW_LEN", "-1")]
    #[case("MONCONF_LINT_USER_MACROS", "maybe")]
    #[case("MONCONF_LINT_LOG_LEVEL", "loud")]
    fn invalid_environment_values_are_rejected(#[case] name: &str, #[case] value: &str) {
        let pairs = [(name, value)];
        let Err(err) = LintConfig::from_lookup(lookup_from(&pairs)) else {
            panic!("expected {name}={value} to be rejected");
        };
        assert!(matches!(err, LintError::InvalidConfig(_)));
    }

    #[test]
    fn overrides_take_precedence() {
        let config = LintConfig::default().apply_overrides(
            Some(LogLevel::Trace),
            Some(false),
            Some(true),
        );
        assert_eq!(config.log_level, LogLevel::Trace);
        assert!(!config.user_macros);
        assert!(config.lld_macros);
    }

    #[test]
    fn absent_overrides_keep_values() {
        let base = LintConfig::default().with_log_level(LogLevel::Error);
        let config = base.clone().apply_overrides(None, None, None);
        assert_eq!(config, base);
    }
}
