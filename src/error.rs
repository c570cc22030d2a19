//! Error types for the series organizer.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the series organizer.
#[derive(Error, Debug)]
pub enum Error {
    // File system errors
    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("File already exists: {0}")]
    FileAlreadyExists(String),

    // Text generation errors
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Completion is not valid JSON: {source}")]
    Parse {
        source: serde_json::Error,
        /// Raw completion content, kept for diagnosis.
        raw: String,
    },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("No usable answer after {attempts} attempts (last error: {last})")]
    RetryExhausted { attempts: u32, last: Box<Error> },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config file: {0}")]
    TomlConfig(#[from] toml::de::Error),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Create a validation error from a string.
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Error::Validation(msg.into())
    }
}

/// Explicit fail-closed policy for gating decisions.
///
/// Callers that must never abort on a failed judgment (classification,
/// batch conformance) state their conservative default at the call site
/// instead of swallowing errors implicitly.
pub trait FailClosed<T> {
    /// Return the value, or log the error and return `default`.
    fn fail_closed(self, default: T, context: &str) -> T;
}

impl<T: std::fmt::Debug> FailClosed<T> for Result<T> {
    fn fail_closed(self, default: T, context: &str) -> T {
        match self {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("{}: {} (falling back to {:?})", context, e, default);
                default
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fail_closed_passes_value_through() {
        let ok: Result<bool> = Ok(true);
        assert!(ok.fail_closed(false, "check"));
    }

    #[test]
    fn test_fail_closed_uses_default_on_any_error() {
        let validation: Result<bool> = Err(Error::validation("matches not found"));
        assert!(!validation.fail_closed(false, "check"));

        let exhausted: Result<u8> = Err(Error::RetryExhausted {
            attempts: 15,
            last: Box::new(Error::other("boom")),
        });
        assert_eq!(exhausted.fail_closed(7, "check"), 7);
    }

    #[test]
    fn test_retry_exhausted_message() {
        let err = Error::RetryExhausted {
            attempts: 3,
            last: Box::new(Error::validation("episode not found")),
        };
        let msg = err.to_string();
        assert!(msg.contains("3 attempts"));
        assert!(msg.contains("episode not found"));
    }
}
