//! Error types for the ClassCharts client.

use thiserror::Error;

/// Errors that can occur while talking to ClassCharts or rendering a report.
#[derive(Debug, Error, Clone)]
pub enum ClassChartsError {
    /// The request could not be completed or returned a non-success status
    #[error("Network error: {message}")]
    Transport { message: String },

    /// The login/ping call went through but the body reported failure
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    /// A data endpoint answered with `success` set to false
    #[error("{endpoint} request rejected: {message}")]
    Api { endpoint: String, message: String },

    /// A response was missing a field the report needs, or held an unexpected value
    #[error("Unexpected data: {message}")]
    DataShape { message: String },

    /// The caller handed over input that can never be valid
    #[error("{message}")]
    Precondition { message: String },

    /// Missing or malformed configuration
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Writing output failed
    #[error("I/O error: {message}")]
    Io { message: String },

    /// Writing CSV output failed
    #[error("CSV error: {message}")]
    Csv { message: String },
}

impl ClassChartsError {
    /// Returns true if this error means the credentials or token were refused.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ClassChartsError::Auth { .. })
    }

    /// Returns true if this error is potentially transient.
    ///
    /// Nothing retries on this; it only informs the final diagnostic.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClassChartsError::Transport { .. })
    }

    pub(crate) fn data_shape(message: impl Into<String>) -> Self {
        ClassChartsError::DataShape {
            message: message.into(),
        }
    }

    pub(crate) fn precondition(message: impl Into<String>) -> Self {
        ClassChartsError::Precondition {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for ClassChartsError {
    fn from(err: reqwest::Error) -> Self {
        ClassChartsError::Transport {
            message: err.to_string(),
        }
    }
}

impl From<url::ParseError> for ClassChartsError {
    fn from(err: url::ParseError) -> Self {
        ClassChartsError::Transport {
            message: format!("invalid URL: {err}"),
        }
    }
}

impl From<serde_json::Error> for ClassChartsError {
    fn from(err: serde_json::Error) -> Self {
        ClassChartsError::DataShape {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for ClassChartsError {
    fn from(err: std::io::Error) -> Self {
        ClassChartsError::Io {
            message: err.to_string(),
        }
    }
}

impl From<csv::Error> for ClassChartsError {
    fn from(err: csv::Error) -> Self {
        ClassChartsError::Csv {
            message: err.to_string(),
        }
    }
}

pub type Result<T, E = ClassChartsError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let auth = ClassChartsError::Auth {
            message: "bad password".to_string(),
        };
        let net = ClassChartsError::Transport {
            message: "timeout".to_string(),
        };

        assert!(auth.is_auth_failure());
        assert!(!auth.is_retryable());
        assert!(net.is_retryable());
        assert!(!net.is_auth_failure());
    }

    #[test]
    fn test_api_error_names_endpoint() {
        let err = ClassChartsError::Api {
            endpoint: "timetable".to_string(),
            message: "No timetable found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "timetable request rejected: No timetable found"
        );
    }
}
