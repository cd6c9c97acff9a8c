use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::notice::models::Notice;
use crate::domain::notice::models::NoticeId;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::notice::errors::NoticeError;
use crate::notice::ports::NoticeRepository;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;

/// In-memory user store.
///
/// Mirrors the Postgres adapter's observable behavior (email uniqueness,
/// list ordering) without requiring a database. Backs the integration test
/// harness and local experiments.
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        // Same conflict the unique constraint would surface
        if users
            .values()
            .any(|existing| existing.email.as_str() == user.email.as_str())
        {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }

        users.insert(user.id.0, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(&id.0).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.email.as_str() == email)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserError> {
        let users = self.users.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| users.get(&id.0).cloned())
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.0.cmp(&b.id.0)));
        Ok(users)
    }

    async fn find_any_with_role(&self, role: Role) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.role == role)
            .cloned())
    }
}

/// In-memory notice store, counterpart of [`InMemoryUserRepository`].
pub struct InMemoryNoticeRepository {
    notices: RwLock<HashMap<Uuid, Notice>>,
}

impl InMemoryNoticeRepository {
    pub fn new() -> Self {
        Self {
            notices: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryNoticeRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NoticeRepository for InMemoryNoticeRepository {
    async fn create(&self, notice: Notice) -> Result<Notice, NoticeError> {
        self.notices
            .write()
            .await
            .insert(notice.id.0, notice.clone());
        Ok(notice)
    }

    async fn find_by_id(&self, id: &NoticeId) -> Result<Option<Notice>, NoticeError> {
        Ok(self.notices.read().await.get(&id.0).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Notice>, NoticeError> {
        let mut notices: Vec<Notice> = self.notices.read().await.values().cloned().collect();
        notices.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(notices)
    }

    async fn delete(&self, id: &NoticeId) -> Result<(), NoticeError> {
        self.notices
            .write()
            .await
            .remove(&id.0)
            .map(|_| ())
            .ok_or_else(|| NoticeError::NotFound(id.to_string()))
    }
}
