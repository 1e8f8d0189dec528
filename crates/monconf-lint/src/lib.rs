//! Library behind the `monconf-lint` command.
//!
//! The command checks one piece of monitoring configuration text (a trigger
//! expression, an update interval, an item key, ...) with the parsers from
//! `monconf-parsers` and reports either the decoded structure or where the
//! text went wrong.
//!
//! # Environment Variables
//!
//! - `MONCONF_LINT_LOG_LEVEL`: log level (trace, debug, info, warn, error)
//! - `MONCONF_LINT_PREVIEW_LEN`: characters quoted after an error position
//! - `MONCONF_LINT_USER_MACROS`: accept `{$NAME}` macros (true/false)
//! - `MONCONF_LINT_LLD_MACROS`: accept `{#NAME}` macros (true/false)

pub mod config;
pub mod error;
pub mod logging;
pub mod report;
