use thiserror::Error;

/// Message used when a failed response carries no readable message.
pub const GENERIC_FAILURE: &str = "request failed";

/// Errors reported by a [`crate::RemoteColorService`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// The remote could not be reached or answered with something that
    /// is not the expected JSON.
    #[error("transport error: {message}")]
    Transport { message: String },
    /// The remote answered with a non-2xx status.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    /// The remote does not know the requested id.
    #[error("{message}")]
    NotFound { message: String },
}

impl RemoteError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Classify a non-2xx status, falling back to the generic message.
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        let message =
            message.unwrap_or_else(|| String::from(GENERIC_FAILURE));
        if status == 404 {
            Self::NotFound { message }
        } else {
            Self::Rejected { status, message }
        }
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        Self::transport(err.to_string())
    }
}

impl From<serde_json::Error> for RemoteError {
    fn from(err: serde_json::Error) -> Self {
        Self::transport(format!("invalid JSON response: {err}"))
    }
}
