use thiserror::Error;

/// Error for NoticeId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NoticeIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for NoticeTitle validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NoticeTitleError {
    #[error("Title must not be empty")]
    Empty,

    #[error("Title too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for NoticeContent validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NoticeContentError {
    #[error("Content must not be empty")]
    Empty,
}

/// Error for Priority parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PriorityError {
    #[error("Unknown priority: {0}")]
    Unknown(String),
}

/// Top-level error for all notice-related operations
#[derive(Debug, Clone, Error)]
pub enum NoticeError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid notice ID: {0}")]
    InvalidNoticeId(#[from] NoticeIdError),

    #[error("Invalid title: {0}")]
    InvalidTitle(#[from] NoticeTitleError),

    #[error("Invalid content: {0}")]
    InvalidContent(#[from] NoticeContentError),

    #[error("Invalid priority: {0}")]
    InvalidPriority(#[from] PriorityError),

    // Domain-level errors
    #[error("Notice not found")]
    NotFound(String),

    #[error("Not authorized to delete this notice")]
    NotAuthorized,

    #[error("Author account not found")]
    AuthorNotFound(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for NoticeError {
    fn from(err: anyhow::Error) -> Self {
        NoticeError::Unknown(err.to_string())
    }
}
