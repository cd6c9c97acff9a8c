use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::inbound::http::router::AppState;
use crate::notice::errors::NoticeError;
use crate::notice::models::NoticeWithAuthor;
use crate::user::errors::UserError;
use crate::user::models::User;

pub mod create_notice;
pub mod create_user;
pub mod delete_notice;
pub mod list_notices;
pub mod list_users;
pub mod login;
pub mod register;
pub mod seed_admin;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    NotFound(String),
    Unauthorized(String),
    Forbidden(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::EmailAlreadyExists(_)
            | UserError::InvalidCredentials
            | UserError::AdminAlreadyExists
            | UserError::InvalidUserId(_)
            | UserError::InvalidName(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidRole(_) => ApiError::BadRequest(err.to_string()),
            UserError::AdminRegistrationNotAllowed => ApiError::Forbidden(err.to_string()),
            UserError::Password(_) | UserError::DatabaseError(_) | UserError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<NoticeError> for ApiError {
    fn from(err: NoticeError) -> Self {
        match err {
            NoticeError::NotFound(_) => ApiError::NotFound(err.to_string()),
            NoticeError::InvalidNoticeId(_)
            | NoticeError::InvalidTitle(_)
            | NoticeError::InvalidContent(_)
            | NoticeError::InvalidPriority(_) => ApiError::BadRequest(err.to_string()),
            NoticeError::NotAuthorized | NoticeError::AuthorNotFound(_) => {
                ApiError::Forbidden(err.to_string())
            }
            NoticeError::DatabaseError(_) | NoticeError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Response payload for both credential flows: the bearer token plus the
/// public projection of the authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthResponseData {
    pub token: String,
    pub user: UserData,
}

/// Issue a signed bearer token for the given user.
pub(crate) fn issue_token(state: &AppState, user: &User) -> Result<String, ApiError> {
    let claims = auth::Claims::for_user(
        user.id,
        user.email.as_str(),
        user.role,
        state.jwt_expiration_hours,
    );

    state
        .authenticator
        .generate_token(&claims)
        .map_err(|e| ApiError::InternalServerError(format!("Token generation failed: {}", e)))
}

/// Public user projection: everything except the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            role: user.role.to_string(),
            created_at: user.created_at,
        }
    }
}

/// Author fields embedded in notice payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorData {
    pub id: String,
    pub name: String,
}

/// Notice payload with embedded author summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoticeData {
    pub id: String,
    pub title: String,
    pub content: String,
    pub priority: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub author: AuthorData,
}

impl From<&NoticeWithAuthor> for NoticeData {
    fn from(entry: &NoticeWithAuthor) -> Self {
        Self {
            id: entry.notice.id.to_string(),
            title: entry.notice.title.as_str().to_string(),
            content: entry.notice.content.as_str().to_string(),
            priority: entry.notice.priority.to_string(),
            created_at: entry.notice.created_at,
            expires_at: entry.notice.expires_at,
            author: AuthorData {
                id: entry.author.id.to_string(),
                name: entry.author.name.clone(),
            },
        }
    }
}
