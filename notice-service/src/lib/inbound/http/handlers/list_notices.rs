use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::NoticeData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn list_notices(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<ApiSuccess<Vec<NoticeData>>, ApiError> {
    let notices = state.notice_service.list().await.map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        notices.iter().map(NoticeData::from).collect(),
    ))
}
