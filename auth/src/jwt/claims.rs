use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// JWT claims carried by every bearer token.
///
/// These are the only identity fields the services trust on a request:
/// the user id (`sub`), the email, and the role string. The role is stored
/// in canonical uppercase; consumers parse it into their role enum.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Email of the authenticated user
    pub email: String,

    /// Role in canonical uppercase ("ADMIN", "TEACHER", "STUDENT")
    pub role: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for an authenticated user with automatic expiration.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `email` - User email address
    /// * `role` - Role, rendered in canonical uppercase
    /// * `expiration_hours` - Hours until token expires
    ///
    /// # Returns
    /// Claims with sub, email, role, iat, and exp set
    pub fn for_user(
        user_id: impl ToString,
        email: impl Into<String>,
        role: impl ToString,
        expiration_hours: i64,
    ) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::hours(expiration_hours);

        Self {
            sub: user_id.to_string(),
            email: email.into(),
            role: role.to_string().to_uppercase(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
