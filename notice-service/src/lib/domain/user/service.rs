use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::DisplayName;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Bootstrap admin credentials, created only through `seed_admin` and only
/// outside production.
pub const BOOTSTRAP_ADMIN_NAME: &str = "Admin User";
pub const BOOTSTRAP_ADMIN_EMAIL: &str = "admin@school.edu";
pub const BOOTSTRAP_ADMIN_PASSWORD: &str = "hiss";

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and verification
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    async fn insert_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let password_hash = self.authenticator.hash_password(&command.password)?;

        let user = User {
            id: UserId::new(),
            name: command.name,
            email: command.email,
            password_hash,
            role: command.role,
            created_at: Utc::now(),
        };

        self.repository.create(user).await
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: CreateUserCommand) -> Result<User, UserError> {
        if command.role == Role::Admin {
            return Err(UserError::AdminRegistrationNotAllowed);
        }

        self.insert_user(command).await
    }

    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        self.insert_user(command).await
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<User, UserError> {
        let user = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        let is_valid = self
            .authenticator
            .verify_password(password, &user.password_hash)?;

        if !is_valid {
            return Err(UserError::InvalidCredentials);
        }

        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.repository.list_all().await
    }

    async fn seed_admin(&self) -> Result<User, UserError> {
        if self
            .repository
            .find_any_with_role(Role::Admin)
            .await?
            .is_some()
        {
            return Err(UserError::AdminAlreadyExists);
        }

        let command = CreateUserCommand::new(
            DisplayName::new(BOOTSTRAP_ADMIN_NAME.to_string())
                .map_err(|e| UserError::Unknown(e.to_string()))?,
            EmailAddress::new(BOOTSTRAP_ADMIN_EMAIL.to_string())
                .map_err(|e| UserError::Unknown(e.to_string()))?,
            BOOTSTRAP_ADMIN_PASSWORD.to_string(),
            Role::Admin,
        );

        self.insert_user(command).await
    }
}
