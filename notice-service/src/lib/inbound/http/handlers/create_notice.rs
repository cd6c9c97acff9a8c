use std::str::FromStr;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use super::NoticeData;
use crate::inbound::http::middleware::RequireNoticeAuthor;
use crate::inbound::http::router::AppState;
use crate::notice::errors::NoticeContentError;
use crate::notice::errors::NoticeTitleError;
use crate::notice::errors::PriorityError;
use crate::notice::models::CreateNoticeCommand;
use crate::notice::models::NoticeContent;
use crate::notice::models::NoticeTitle;
use crate::notice::models::Priority;

pub async fn create_notice(
    State(state): State<AppState>,
    RequireNoticeAuthor(user): RequireNoticeAuthor,
    Json(body): Json<CreateNoticeRequestBody>,
) -> Result<ApiSuccess<NoticeData>, ApiError> {
    // The author is always the authenticated identity, never client input.
    state
        .notice_service
        .create(body.try_into_command()?, user.user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref created| ApiSuccess::new(StatusCode::CREATED, created.into()))
}

/// HTTP request body for posting a notice (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateNoticeRequestBody {
    title: String,
    content: String,
    priority: Option<String>,
    expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Error)]
enum ParseCreateNoticeRequestError {
    #[error("Invalid title: {0}")]
    Title(#[from] NoticeTitleError),

    #[error("Invalid content: {0}")]
    Content(#[from] NoticeContentError),

    #[error("Invalid priority: {0}")]
    Priority(#[from] PriorityError),
}

impl CreateNoticeRequestBody {
    fn try_into_command(self) -> Result<CreateNoticeCommand, ParseCreateNoticeRequestError> {
        let title = NoticeTitle::new(self.title)?;
        let content = NoticeContent::new(self.content)?;
        let priority = match self.priority {
            Some(raw) => Priority::from_str(&raw)?,
            None => Priority::default(),
        };
        Ok(CreateNoticeCommand::new(
            title,
            content,
            priority,
            self.expires_at,
        ))
    }
}

impl From<ParseCreateNoticeRequestError> for ApiError {
    fn from(err: ParseCreateNoticeRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
