//! Error types for collection API calls.

/// Errors produced by the collection API and image lookups.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a structured response.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server returned {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Server {
        status: u16,
        message: Option<String>,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid server URL: {0}")]
    InvalidUrl(String),

    #[error("missing API key")]
    MissingApiKey,
}

impl ApiError {
    /// The server-reported message, if the failure carried one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Server {
                message: Some(m), ..
            } => Some(m.as_str()),
            _ => None,
        }
    }

    /// Text for a user-facing banner: the server's message verbatim when
    /// present, otherwise `fallback`.
    pub fn banner_text(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }
}
