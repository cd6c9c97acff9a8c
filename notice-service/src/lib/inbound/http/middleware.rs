use std::str::FromStr;

use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::request::Parts;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;
use crate::user::models::Role;
use crate::user::models::UserId;

/// Extension type to store authenticated identity in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: String,
    pub role: Role,
}

/// Middleware that validates bearer tokens and attaches the decoded identity
/// to request extensions.
///
/// A missing credential is 401; a credential that fails verification (bad
/// signature, malformed, expired, unparsable claims) is 403.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    // Extract token from Authorization header
    let token = extract_token_from_header(&req)?;

    // Validate token and extract claims
    let claims: auth::Claims = state.authenticator.validate_token(token).map_err(|e| {
        tracing::warn!("JWT validation failed: {}", e);
        ApiError::Forbidden("Invalid token.".to_string()).into_response()
    })?;

    let user_id = UserId::from_string(&claims.sub).map_err(|e| {
        tracing::warn!("Failed to parse user ID from token: {}", e);
        ApiError::Forbidden("Invalid token.".to_string()).into_response()
    })?;

    let role = Role::from_str(&claims.role).map_err(|e| {
        tracing::warn!("Failed to parse role from token: {}", e);
        ApiError::Forbidden("Invalid token.".to_string()).into_response()
    })?;

    // Add authenticated identity to request extensions
    req.extensions_mut().insert(AuthenticatedUser {
        user_id,
        email: claims.email,
        role,
    });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| {
            ApiError::Unauthorized("Access denied. No token provided.".to_string()).into_response()
        })?;

    let auth_str = auth_header.to_str().map_err(|_| {
        ApiError::Unauthorized("Access denied. No token provided.".to_string()).into_response()
    })?;

    let token = auth_str.strip_prefix("Bearer ").ok_or_else(|| {
        ApiError::Unauthorized("Access denied. No token provided.".to_string()).into_response()
    })?;

    Ok(token)
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AuthenticatedUser>().cloned().ok_or(
            ApiError::Unauthorized("Access denied. No token provided.".to_string()),
        )
    }
}

/// Route guard: the authenticated identity must be an admin.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthenticatedUser);

#[axum::async_trait]
impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;
        if user.role != Role::Admin {
            return Err(ApiError::Forbidden(
                "Access denied. Admin privileges required.".to_string(),
            ));
        }
        Ok(Self(user))
    }
}

/// Route guard: the authenticated identity must be allowed to author notices.
#[derive(Debug, Clone)]
pub struct RequireNoticeAuthor(pub AuthenticatedUser);

#[axum::async_trait]
impl<S> FromRequestParts<S> for RequireNoticeAuthor
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;
        if !user.role.capabilities().can_create_notice {
            return Err(ApiError::Forbidden(
                "Access denied. Teacher or admin privileges required.".to_string(),
            ));
        }
        Ok(Self(user))
    }
}
