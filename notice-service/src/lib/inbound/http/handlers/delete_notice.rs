use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::notice::models::NoticeId;

pub async fn delete_notice(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(notice_id): Path<String>,
) -> Result<ApiSuccess<DeleteNoticeResponseData>, ApiError> {
    let notice_id =
        NoticeId::from_string(&notice_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .notice_service
        .delete(&notice_id, user.user_id, user.role)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        DeleteNoticeResponseData {
            message: "Notice deleted successfully".to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteNoticeResponseData {
    pub message: String,
}
