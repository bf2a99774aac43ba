//! Error types for the shop API client.

use thiserror::Error;

/// Failures of the two network operations.
///
/// Server rejections are structured: a non-2xx response with an
/// `{"error": "..."}` body surfaces that message, not an opaque HTTP error.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Could not reach the server or the request was cut short.
    #[error("request to '{url}' failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status.
    #[error("server rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("malformed response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Short message suitable for the `error` event shown to the buyer.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Transport { .. } => "Could not reach the shop, try again".to_string(),
            ApiError::Rejected { message, .. } => message.clone(),
            ApiError::Decode(_) => "The shop returned an unexpected response".to_string(),
        }
    }
}
