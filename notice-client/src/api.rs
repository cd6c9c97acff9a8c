use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

use crate::errors::ClientError;

/// Account role as seen by the client.
///
/// Parsed case-insensitively from whatever spelling the wire carries and
/// normalized to the canonical uppercase form; all comparisons happen on the
/// enum, never on strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Teacher,
    Student,
}

impl Role {
    /// Canonical uppercase spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Teacher => "TEACHER",
            Role::Student => "STUDENT",
        }
    }

    /// May this role author notices?
    pub fn can_create_notices(self) -> bool {
        matches!(self, Role::Admin | Role::Teacher)
    }

    /// May this role delete notices it did not author?
    pub fn can_delete_any_notice(self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ADMIN" => Ok(Role::Admin),
            "TEACHER" => Ok(Role::Teacher),
            "STUDENT" => Ok(Role::Student),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Role::from_str(&raw).map_err(serde::de::Error::custom)
    }
}

/// The user fields cached alongside the bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Successful response of both credential endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthPayload {
    pub token: String,
    pub user: SessionUser,
}

/// Author fields embedded in notice payloads.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NoticeAuthor {
    pub id: String,
    pub name: String,
}

/// A notice as rendered in the board.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NoticeView {
    pub id: String,
    pub title: String,
    pub content: String,
    pub priority: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub author: NoticeAuthor,
}

/// Fields for posting a new notice.
#[derive(Debug, Clone, Serialize)]
pub struct NewNotice {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Fields for the admin-only account creation form.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// A user row in the admin panel.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct ApiResponseBody<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct ApiErrorData {
    message: String,
}

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct Registration<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
    role: Role,
}

/// Typed HTTP client for the notice board backend.
///
/// Stateless: the caller passes the bearer token on each authenticated call.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client against the given base URL (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<AuthPayload, ClientError> {
        let response = self
            .http
            .post(self.url("/api/auth/register"))
            .json(&Registration {
                name,
                email,
                password,
                role,
            })
            .send()
            .await?;

        parse(response).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthPayload, ClientError> {
        let response = self
            .http
            .post(self.url("/api/auth/login"))
            .json(&Credentials { email, password })
            .send()
            .await?;

        parse(response).await
    }

    pub async fn list_notices(&self, token: &str) -> Result<Vec<NoticeView>, ClientError> {
        let response = self
            .http
            .get(self.url("/api/notices"))
            .bearer_auth(token)
            .send()
            .await?;

        parse(response).await
    }

    pub async fn create_notice(
        &self,
        token: &str,
        notice: &NewNotice,
    ) -> Result<NoticeView, ClientError> {
        let response = self
            .http
            .post(self.url("/api/notices"))
            .bearer_auth(token)
            .json(notice)
            .send()
            .await?;

        parse(response).await
    }

    pub async fn delete_notice(&self, token: &str, notice_id: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/api/notices/{}", notice_id)))
            .bearer_auth(token)
            .send()
            .await?;

        // Body carries only a confirmation message
        parse::<serde_json::Value>(response).await.map(|_| ())
    }

    pub async fn list_users(&self, token: &str) -> Result<Vec<UserView>, ClientError> {
        let response = self
            .http
            .get(self.url("/api/users"))
            .bearer_auth(token)
            .send()
            .await?;

        parse(response).await
    }

    pub async fn create_user(&self, token: &str, user: &NewUser) -> Result<UserView, ClientError> {
        let response = self
            .http
            .post(self.url("/api/users"))
            .bearer_auth(token)
            .json(user)
            .send()
            .await?;

        parse(response).await
    }
}

/// Unwrap the `{status_code, data}` envelope, turning error statuses into
/// `ClientError::Api` with the server's message.
async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();

    if status.is_success() {
        let body: ApiResponseBody<T> = response.json().await?;
        return Ok(body.data);
    }

    let message = response
        .json::<ApiResponseBody<ApiErrorData>>()
        .await
        .map(|body| body.data.message)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });

    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}
