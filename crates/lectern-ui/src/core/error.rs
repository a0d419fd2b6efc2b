//! Error type shared by every API call.

use lectern_api_models::ErrorBody;
use thiserror::Error;

/// Failure of a single API call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("network request failed: {0}")]
    Transport(String),
    /// Non-2xx response; `message` is ready for display.
    #[error("{message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Server message or the generic fallback.
        message: String,
    },
    /// Response body was not the expected JSON.
    #[error("unexpected response: {0}")]
    Decode(String),
    /// Response decoded but carried no usable payload.
    #[error("{0}")]
    Payload(String),
}

impl ApiError {
    /// Map a non-2xx response to an error, preferring the body's `message`.
    #[must_use]
    pub fn from_status_body(status: u16, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|parsed| parsed.message)
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| {
                format!("Failed to fetch. Server responded with a status of {status}.")
            });
        Self::Status { status, message }
    }

    /// HTTP status for [`ApiError::Status`].
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
