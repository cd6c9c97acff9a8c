use async_trait::async_trait;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Self-register a new account.
    ///
    /// Admin accounts cannot be created through this path; they require an
    /// already-authenticated admin using `create_user`.
    ///
    /// # Arguments
    /// * `command` - Validated command containing name, email, password, role
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `AdminRegistrationNotAllowed` - Command requested the admin role
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: CreateUserCommand) -> Result<User, UserError>;

    /// Create an account on behalf of an admin. Any role may be assigned.
    ///
    /// # Arguments
    /// * `command` - Validated command containing name, email, password, role
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError>;

    /// Verify credentials and return the matching user.
    ///
    /// Unknown email and wrong password fail identically.
    ///
    /// # Arguments
    /// * `email` - Email as submitted (matched case-sensitively)
    /// * `password` - Plaintext password to verify
    ///
    /// # Returns
    /// Authenticated user entity
    ///
    /// # Errors
    /// * `InvalidCredentials` - No such user or password mismatch
    /// * `DatabaseError` - Database operation failed
    async fn authenticate(&self, email: &str, password: &str) -> Result<User, UserError>;

    /// Retrieve all users.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_users(&self) -> Result<Vec<User>, UserError>;

    /// Create the fixed bootstrap admin account.
    ///
    /// # Returns
    /// Created admin entity
    ///
    /// # Errors
    /// * `AdminAlreadyExists` - An admin account is already present
    /// * `DatabaseError` - Database operation failed
    async fn seed_admin(&self) -> Result<User, UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Arguments
    /// * `user` - User entity to create
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by email address (exact, case-sensitive match).
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Retrieve multiple users by identifiers.
    ///
    /// # Returns
    /// Vector of found users (missing IDs are skipped without error)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserError>;

    /// Retrieve all users from storage.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self) -> Result<Vec<User>, UserError>;

    /// Retrieve any one user holding the given role, if one exists.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_any_with_role(&self, role: Role) -> Result<Option<User>, UserError>;
}
