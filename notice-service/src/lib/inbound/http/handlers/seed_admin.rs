use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Development bootstrap: create the fixed admin account.
///
/// Refused outright in production; otherwise fails if any admin exists.
pub async fn seed_admin(
    State(state): State<AppState>,
) -> Result<ApiSuccess<SeedAdminResponseData>, ApiError> {
    if state.environment.is_production() {
        return Err(ApiError::Forbidden("Not allowed in production".to_string()));
    }

    let admin = state
        .user_service
        .seed_admin()
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        SeedAdminResponseData {
            message: "Admin user created successfully".to_string(),
            email: admin.email.as_str().to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedAdminResponseData {
    pub message: String,
    pub email: String,
}
