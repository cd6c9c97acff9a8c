use thiserror::Error;

/// Error type for client-side operations.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// The server rejected the request; the message comes from the response
    /// body and is suitable for direct display.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Only admins can add new users")]
    PermissionDenied,

    #[error("Not logged in")]
    NotAuthenticated,

    #[error("Session cache error: {0}")]
    Cache(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}
