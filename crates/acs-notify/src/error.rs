//! Error types for the notification handler.

use thiserror::Error;

/// The main error type for notification operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// The email API could not be reached.
    #[error("email API request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The email API reached but refused the send.
    #[error("email API rejected the send ({status}): {body}")]
    Rejected {
        /// HTTP status code returned by the API.
        status: u16,
        /// Response body, for the log.
        body: String,
    },
}

/// A specialized Result type for notification operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }
}
