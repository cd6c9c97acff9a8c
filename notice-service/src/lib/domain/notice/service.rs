use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::notice::models::AuthorSummary;
use crate::domain::notice::models::CreateNoticeCommand;
use crate::domain::notice::models::Notice;
use crate::domain::notice::models::NoticeId;
use crate::domain::notice::models::NoticeWithAuthor;
use crate::notice::errors::NoticeError;
use crate::notice::ports::NoticeRepository;
use crate::notice::ports::NoticeServicePort;
use crate::user::models::Role;
use crate::user::models::User;
use crate::user::models::UserId;
use crate::user::ports::UserRepository;

/// Domain service implementation for notice operations.
///
/// Composes the notice store with the user store to embed author summaries
/// into read models.
pub struct NoticeService<NR, UR>
where
    NR: NoticeRepository,
    UR: UserRepository,
{
    notices: Arc<NR>,
    users: Arc<UR>,
}

impl<NR, UR> NoticeService<NR, UR>
where
    NR: NoticeRepository,
    UR: UserRepository,
{
    /// Create a new notice service with injected dependencies.
    ///
    /// # Arguments
    /// * `notices` - Notice persistence implementation
    /// * `users` - User persistence implementation (author lookups)
    pub fn new(notices: Arc<NR>, users: Arc<UR>) -> Self {
        Self { notices, users }
    }

    async fn author_names(
        &self,
        notices: &[Notice],
    ) -> Result<HashMap<UserId, String>, NoticeError> {
        let author_ids: Vec<UserId> = notices
            .iter()
            .map(|n| n.author_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let authors = self
            .users
            .find_by_ids(&author_ids)
            .await
            .map_err(|e| NoticeError::DatabaseError(e.to_string()))?;

        Ok(authors
            .into_iter()
            .map(|user: User| (user.id, user.name.as_str().to_string()))
            .collect())
    }
}

#[async_trait]
impl<NR, UR> NoticeServicePort for NoticeService<NR, UR>
where
    NR: NoticeRepository,
    UR: UserRepository,
{
    async fn list(&self) -> Result<Vec<NoticeWithAuthor>, NoticeError> {
        let notices = self.notices.list_all().await?;
        let authors = self.author_names(&notices).await?;

        Ok(notices
            .into_iter()
            .filter_map(|notice| match authors.get(&notice.author_id) {
                Some(name) => Some(NoticeWithAuthor {
                    author: AuthorSummary {
                        id: notice.author_id,
                        name: name.clone(),
                    },
                    notice,
                }),
                None => {
                    // The author foreign key guarantees this cannot happen
                    // through the API; guard against manual data edits.
                    tracing::warn!(
                        notice_id = %notice.id,
                        author_id = %notice.author_id,
                        "Skipping notice with missing author"
                    );
                    None
                }
            })
            .collect())
    }

    async fn create(
        &self,
        command: CreateNoticeCommand,
        author_id: UserId,
    ) -> Result<NoticeWithAuthor, NoticeError> {
        let author = self
            .users
            .find_by_id(&author_id)
            .await
            .map_err(|e| NoticeError::DatabaseError(e.to_string()))?
            .ok_or_else(|| NoticeError::AuthorNotFound(author_id.to_string()))?;

        let notice = Notice {
            id: NoticeId::new(),
            title: command.title,
            content: command.content,
            priority: command.priority,
            created_at: Utc::now(),
            expires_at: command.expires_at,
            author_id,
        };

        let created = self.notices.create(notice).await?;

        Ok(NoticeWithAuthor {
            notice: created,
            author: AuthorSummary {
                id: author.id,
                name: author.name.as_str().to_string(),
            },
        })
    }

    async fn delete(
        &self,
        id: &NoticeId,
        requester_id: UserId,
        requester_role: Role,
    ) -> Result<(), NoticeError> {
        let notice = self
            .notices
            .find_by_id(id)
            .await?
            .ok_or_else(|| NoticeError::NotFound(id.to_string()))?;

        let can_delete_any = requester_role.capabilities().can_delete_any_notice;
        if !can_delete_any && notice.author_id != requester_id {
            return Err(NoticeError::NotAuthorized);
        }

        self.notices.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use mockall::mock;

    use super::*;
    use crate::domain::notice::models::NoticeContent;
    use crate::domain::notice::models::NoticeTitle;
    use crate::domain::notice::models::Priority;
    use crate::user::errors::UserError;
    use crate::user::models::CreateUserCommand;
    use crate::user::models::DisplayName;
    use crate::user::models::EmailAddress;

    mock! {
        pub TestNoticeRepository {}

        #[async_trait]
        impl NoticeRepository for TestNoticeRepository {
            async fn create(&self, notice: Notice) -> Result<Notice, NoticeError>;
            async fn find_by_id(&self, id: &NoticeId) -> Result<Option<Notice>, NoticeError>;
            async fn list_all(&self) -> Result<Vec<Notice>, NoticeError>;
            async fn delete(&self, id: &NoticeId) -> Result<(), NoticeError>;
        }
    }

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
            async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserError>;
            async fn list_all(&self) -> Result<Vec<User>, UserError>;
            async fn find_any_with_role(&self, role: Role) -> Result<Option<User>, UserError>;
        }
    }

    fn test_user(name: &str, role: Role) -> User {
        let command = CreateUserCommand::new(
            DisplayName::new(name.to_string()).unwrap(),
            EmailAddress::new(format!(
                "{}@school.edu",
                name.to_lowercase().replace(' ', ".")
            ))
            .unwrap(),
            "pw".to_string(),
            role,
        );
        User {
            id: UserId::new(),
            name: command.name,
            email: command.email,
            password_hash: "$argon2id$test_hash".to_string(),
            role: command.role,
            created_at: Utc::now(),
        }
    }

    fn test_notice(author_id: UserId, title: &str) -> Notice {
        Notice {
            id: NoticeId::new(),
            title: NoticeTitle::new(title.to_string()).unwrap(),
            content: NoticeContent::new("Body".to_string()).unwrap(),
            priority: Priority::Medium,
            created_at: Utc::now(),
            expires_at: None,
            author_id,
        }
    }

    #[tokio::test]
    async fn test_create_embeds_author_summary() {
        let author = test_user("Grace Hopper", Role::Teacher);
        let author_id = author.id;

        let mut notices = MockTestNoticeRepository::new();
        notices
            .expect_create()
            .withf(move |n| n.author_id == author_id && n.title.as_str() == "Exam schedule")
            .times(1)
            .returning(|n| Ok(n));

        let mut users = MockTestUserRepository::new();
        let returned = author.clone();
        users
            .expect_find_by_id()
            .withf(move |id| *id == author_id)
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));

        let service = NoticeService::new(Arc::new(notices), Arc::new(users));

        let command = CreateNoticeCommand::new(
            NoticeTitle::new("Exam schedule".to_string()).unwrap(),
            NoticeContent::new("Finals start May 2nd.".to_string()).unwrap(),
            Priority::default(),
            None,
        );

        let created = service
            .create(command, author_id)
            .await
            .expect("create should succeed");
        assert_eq!(created.author.id, author_id);
        assert_eq!(created.author.name, "Grace Hopper");
        assert_eq!(created.notice.priority, Priority::Medium);
    }

    #[tokio::test]
    async fn test_create_fails_for_unknown_author() {
        let mut notices = MockTestNoticeRepository::new();
        notices.expect_create().times(0);

        let mut users = MockTestUserRepository::new();
        users.expect_find_by_id().times(1).returning(|_| Ok(None));

        let service = NoticeService::new(Arc::new(notices), Arc::new(users));

        let command = CreateNoticeCommand::new(
            NoticeTitle::new("Exam schedule".to_string()).unwrap(),
            NoticeContent::new("Finals start May 2nd.".to_string()).unwrap(),
            Priority::default(),
            None,
        );

        let result = service.create(command, UserId::new()).await;
        assert!(matches!(
            result.unwrap_err(),
            NoticeError::AuthorNotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_list_embeds_author_names_newest_first() {
        let author = test_user("Grace Hopper", Role::Teacher);
        let author_id = author.id;

        let older = Notice {
            created_at: Utc::now() - Duration::hours(1),
            ..test_notice(author_id, "Older")
        };
        let newer = test_notice(author_id, "Newer");

        let mut notices = MockTestNoticeRepository::new();
        let rows = vec![newer.clone(), older.clone()];
        notices
            .expect_list_all()
            .times(1)
            .returning(move || Ok(rows.clone()));

        let mut users = MockTestUserRepository::new();
        let returned = author.clone();
        users
            .expect_find_by_ids()
            .withf(move |ids| ids == [author_id])
            .times(1)
            .returning(move |_| Ok(vec![returned.clone()]));

        let service = NoticeService::new(Arc::new(notices), Arc::new(users));

        let listed = service.list().await.expect("list should succeed");
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].notice.title.as_str(), "Newer");
        assert_eq!(listed[1].notice.title.as_str(), "Older");
        assert!(listed.iter().all(|n| n.author.name == "Grace Hopper"));
    }

    #[tokio::test]
    async fn test_delete_by_author_succeeds() {
        let author_id = UserId::new();
        let notice = test_notice(author_id, "Mine");
        let notice_id = notice.id;

        let mut notices = MockTestNoticeRepository::new();
        let returned = notice.clone();
        notices
            .expect_find_by_id()
            .withf(move |id| *id == notice_id)
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));
        notices
            .expect_delete()
            .withf(move |id| *id == notice_id)
            .times(1)
            .returning(|_| Ok(()));

        let users = MockTestUserRepository::new();
        let service = NoticeService::new(Arc::new(notices), Arc::new(users));

        let result = service.delete(&notice_id, author_id, Role::Teacher).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_delete_by_other_teacher_is_refused() {
        let notice = test_notice(UserId::new(), "Not yours");
        let notice_id = notice.id;

        let mut notices = MockTestNoticeRepository::new();
        let returned = notice.clone();
        notices
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));
        // The notice must survive the refused attempt
        notices.expect_delete().times(0);

        let users = MockTestUserRepository::new();
        let service = NoticeService::new(Arc::new(notices), Arc::new(users));

        let result = service.delete(&notice_id, UserId::new(), Role::Teacher).await;
        assert!(matches!(result.unwrap_err(), NoticeError::NotAuthorized));
    }

    #[tokio::test]
    async fn test_delete_by_admin_ignores_authorship() {
        let notice = test_notice(UserId::new(), "Anyone's");
        let notice_id = notice.id;

        let mut notices = MockTestNoticeRepository::new();
        let returned = notice.clone();
        notices
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));
        notices
            .expect_delete()
            .withf(move |id| *id == notice_id)
            .times(1)
            .returning(|_| Ok(()));

        let users = MockTestUserRepository::new();
        let service = NoticeService::new(Arc::new(notices), Arc::new(users));

        let result = service.delete(&notice_id, UserId::new(), Role::Admin).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_delete_missing_notice() {
        let mut notices = MockTestNoticeRepository::new();
        notices.expect_find_by_id().times(1).returning(|_| Ok(None));
        notices.expect_delete().times(0);

        let users = MockTestUserRepository::new();
        let service = NoticeService::new(Arc::new(notices), Arc::new(users));

        let result = service
            .delete(&NoticeId::new(), UserId::new(), Role::Admin)
            .await;
        assert!(matches!(result.unwrap_err(), NoticeError::NotFound(_)));
    }
}
