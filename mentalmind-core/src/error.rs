//! Error types for mentalmind-core

use thiserror::Error;

/// Main error type for the mentalmind-core library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// A journal entry carried a timestamp we could not place on a calendar day
    #[error("invalid timestamp {value:?}: {message}")]
    Timestamp { value: String, message: String },

    /// The journal service could not be reached at all
    #[error("connection error: {0}")]
    Connection(String),

    /// The journal service answered with a non-success status or an unreadable body
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}

impl Error {
    /// Whether retrying the same request may succeed.
    ///
    /// Connectivity failures and 5xx responses are transient; everything else is not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Connection(_) => true,
            Error::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Short message suitable for showing to the person using the app.
    pub fn user_message(&self) -> String {
        match self {
            Error::Connection(_) => {
                "Unable to connect to the journal service. Please make sure the backend is running and try again.".to_string()
            }
            Error::Api { status, message } => {
                format!("The journal service returned an error ({}): {}", status, message)
            }
            other => other.to_string(),
        }
    }
}

/// Result type alias for mentalmind-core
pub type Result<T> = std::result::Result<T, Error>;
