use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::notice::errors::NoticeContentError;
use crate::notice::errors::NoticeIdError;
use crate::notice::errors::NoticeTitleError;
use crate::notice::errors::PriorityError;
use crate::user::models::UserId;

/// Notice aggregate entity.
///
/// Immutable once posted: there is no edit operation, only create and delete.
#[derive(Debug, Clone)]
pub struct Notice {
    pub id: NoticeId,
    pub title: NoticeTitle,
    pub content: NoticeContent,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub author_id: UserId,
}

/// Notice unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoticeId(pub Uuid);

impl NoticeId {
    /// Generate a new random notice ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a notice ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, NoticeIdError> {
        Uuid::parse_str(s)
            .map(NoticeId)
            .map_err(|e| NoticeIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for NoticeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoticeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Notice priority.
///
/// Defaults to `Medium` when the author does not pick one. Canonical
/// uppercase on the wire, case-insensitive on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Canonical uppercase spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        }
    }
}

impl FromStr for Priority {
    type Err = PriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "HIGH" => Ok(Priority::High),
            "MEDIUM" => Ok(Priority::Medium),
            "LOW" => Ok(Priority::Low),
            _ => Err(PriorityError::Unknown(s.to_string())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Notice title value type
///
/// Must not be blank; capped at 200 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeTitle(String);

impl NoticeTitle {
    const MAX_LENGTH: usize = 200;

    /// Create a new valid notice title.
    ///
    /// # Errors
    /// * `Empty` - Title is empty or whitespace only
    /// * `TooLong` - Title longer than 200 characters
    pub fn new(title: String) -> Result<Self, NoticeTitleError> {
        if title.trim().is_empty() {
            return Err(NoticeTitleError::Empty);
        }
        if title.len() > Self::MAX_LENGTH {
            return Err(NoticeTitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: title.len(),
            });
        }
        Ok(Self(title))
    }

    /// Get title as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoticeTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Notice body value type
///
/// Must not be blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeContent(String);

impl NoticeContent {
    /// Create a new valid notice body.
    ///
    /// # Errors
    /// * `Empty` - Content is empty or whitespace only
    pub fn new(content: String) -> Result<Self, NoticeContentError> {
        if content.trim().is_empty() {
            return Err(NoticeContentError::Empty);
        }
        Ok(Self(content))
    }

    /// Get content as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Author fields embedded in read models.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorSummary {
    pub id: UserId,
    pub name: String,
}

/// Notice enriched with its author summary, as returned to clients.
#[derive(Debug, Clone)]
pub struct NoticeWithAuthor {
    pub notice: Notice,
    pub author: AuthorSummary,
}

/// Command to post a new notice with domain types.
///
/// The author is never part of the command; it is taken from the
/// authenticated identity by the service.
#[derive(Debug)]
pub struct CreateNoticeCommand {
    pub title: NoticeTitle,
    pub content: NoticeContent,
    pub priority: Priority,
    pub expires_at: Option<DateTime<Utc>>,
}

impl CreateNoticeCommand {
    /// Construct a new create notice command.
    ///
    /// # Arguments
    /// * `title` - Validated title
    /// * `content` - Validated body
    /// * `priority` - Priority (use `Priority::default()` when unspecified)
    /// * `expires_at` - Optional expiry timestamp
    pub fn new(
        title: NoticeTitle,
        content: NoticeContent,
        priority: Priority,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            title,
            content,
            priority,
            expires_at,
        }
    }
}
