use async_trait::async_trait;

use crate::domain::notice::models::CreateNoticeCommand;
use crate::domain::notice::models::Notice;
use crate::domain::notice::models::NoticeId;
use crate::domain::notice::models::NoticeWithAuthor;
use crate::notice::errors::NoticeError;
use crate::user::models::Role;
use crate::user::models::UserId;

/// Port for notice domain service operations.
#[async_trait]
pub trait NoticeServicePort: Send + Sync + 'static {
    /// Retrieve all notices with their author summaries, newest first.
    ///
    /// Ordering is by creation time descending with the notice id as a
    /// deterministic tie-break, so repeated calls without intervening writes
    /// return identical sequences.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list(&self) -> Result<Vec<NoticeWithAuthor>, NoticeError>;

    /// Post a new notice authored by the given user.
    ///
    /// # Arguments
    /// * `command` - Validated notice fields
    /// * `author_id` - Authenticated author identity
    ///
    /// # Returns
    /// Created notice with embedded author summary
    ///
    /// # Errors
    /// * `AuthorNotFound` - Authenticated identity has no matching account
    /// * `DatabaseError` - Database operation failed
    async fn create(
        &self,
        command: CreateNoticeCommand,
        author_id: UserId,
    ) -> Result<NoticeWithAuthor, NoticeError>;

    /// Delete a notice on behalf of the requester.
    ///
    /// Admins may delete any notice; everyone else only their own.
    ///
    /// # Arguments
    /// * `id` - Notice to delete
    /// * `requester_id` - Authenticated requester identity
    /// * `requester_role` - Authenticated requester role
    ///
    /// # Errors
    /// * `NotFound` - No notice with this id
    /// * `NotAuthorized` - Requester is neither admin nor the author
    /// * `DatabaseError` - Database operation failed
    async fn delete(
        &self,
        id: &NoticeId,
        requester_id: UserId,
        requester_role: Role,
    ) -> Result<(), NoticeError>;
}

/// Persistence operations for notice aggregate.
#[async_trait]
pub trait NoticeRepository: Send + Sync + 'static {
    /// Persist new notice to storage.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, notice: Notice) -> Result<Notice, NoticeError>;

    /// Retrieve notice by identifier.
    ///
    /// # Returns
    /// Optional notice entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &NoticeId) -> Result<Option<Notice>, NoticeError>;

    /// Retrieve all notices ordered by creation time descending, notice id
    /// as tie-break.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self) -> Result<Vec<Notice>, NoticeError>;

    /// Remove notice from storage.
    ///
    /// # Errors
    /// * `NotFound` - Notice does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &NoticeId) -> Result<(), NoticeError>;
}
