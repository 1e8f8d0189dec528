//! Error types for the lint tool.

use thiserror::Error;

/// Errors that stop the tool before or while reporting a result.
///
/// A rejected input is not an error; it is reported through
/// [`Report`](crate::report::Report).
#[derive(Debug, Error)]
pub enum LintError {
    /// An invalid configuration value was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A decoded value could not be serialised.
    #[error("serialisation failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing the report failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_error_displays_message() {
        let error = LintError::InvalidConfig("unknown log level".to_string());
        assert_eq!(
            error.to_string(),
            "invalid configuration: unknown log level"
        );
    }

    #[test]
    fn io_error_converts_from_std_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let error: LintError = io_err.into();
        assert!(error.to_string().contains("pipe closed"));
    }
}
