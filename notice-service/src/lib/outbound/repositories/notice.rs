use std::str::FromStr;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::notice::models::Notice;
use crate::domain::notice::models::NoticeContent;
use crate::domain::notice::models::NoticeId;
use crate::domain::notice::models::NoticeTitle;
use crate::domain::notice::models::Priority;
use crate::notice::errors::NoticeError;
use crate::notice::ports::NoticeRepository;
use crate::user::models::UserId;

pub struct PostgresNoticeRepository {
    pool: PgPool,
}

impl PostgresNoticeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct NoticeRow {
    id: Uuid,
    title: String,
    content: String,
    priority: String,
    created_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
    author_id: Uuid,
}

impl TryFrom<NoticeRow> for Notice {
    type Error = NoticeError;

    fn try_from(row: NoticeRow) -> Result<Self, Self::Error> {
        Ok(Notice {
            id: NoticeId(row.id),
            title: NoticeTitle::new(row.title)?,
            content: NoticeContent::new(row.content)?,
            priority: Priority::from_str(&row.priority)?,
            created_at: row.created_at,
            expires_at: row.expires_at,
            author_id: UserId(row.author_id),
        })
    }
}

const SELECT_NOTICE: &str =
    "SELECT id, title, content, priority, created_at, expires_at, author_id FROM notices";

#[async_trait]
impl NoticeRepository for PostgresNoticeRepository {
    async fn create(&self, notice: Notice) -> Result<Notice, NoticeError> {
        sqlx::query(
            "INSERT INTO notices (id, title, content, priority, created_at, expires_at, author_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(notice.id.0)
        .bind(notice.title.as_str())
        .bind(notice.content.as_str())
        .bind(notice.priority.as_str())
        .bind(notice.created_at)
        .bind(notice.expires_at)
        .bind(notice.author_id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| NoticeError::DatabaseError(e.to_string()))?;

        Ok(notice)
    }

    async fn find_by_id(&self, id: &NoticeId) -> Result<Option<Notice>, NoticeError> {
        let row = sqlx::query_as::<_, NoticeRow>(&format!("{} WHERE id = $1", SELECT_NOTICE))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| NoticeError::DatabaseError(e.to_string()))?;

        row.map(Notice::try_from).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Notice>, NoticeError> {
        // Id as tie-break keeps the order deterministic for identical
        // creation timestamps.
        let rows = sqlx::query_as::<_, NoticeRow>(&format!(
            "{} ORDER BY created_at DESC, id",
            SELECT_NOTICE
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| NoticeError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Notice::try_from).collect()
    }

    async fn delete(&self, id: &NoticeId) -> Result<(), NoticeError> {
        let result = sqlx::query("DELETE FROM notices WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| NoticeError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(NoticeError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
