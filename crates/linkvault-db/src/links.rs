use async_trait::async_trait;
use sqlx::PgPool;

use linkvault_core::AppError;
use linkvault_models::{Link, LinkId, NewLink, UserId};

#[async_trait]
pub trait LinkStore: Send + Sync {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Links owned by `user_id`, newest first.
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Link>, AppError>;

    async fn find(&self, id: LinkId) -> Result<Option<Link>, AppError>;

    /// Returns whether a link was removed.
    async fn delete(&self, id: LinkId) -> Result<bool, AppError>;
}

#[derive(Clone, Debug)]
pub struct PgLinkStore {
    db: PgPool,
}

impl PgLinkStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

const LINK_COLUMNS: &str = "id, user_id, url, title, image_url, ai_summary, ai_tags, created_at";

#[async_trait]
impl LinkStore for PgLinkStore {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let link = sqlx::query_as::<_, Link>(&format!(
            "INSERT INTO links (user_id, url, title, image_url, ai_summary, ai_tags)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {LINK_COLUMNS}"
        ))
        .bind(new_link.user_id)
        .bind(&new_link.url)
        .bind(&new_link.title)
        .bind(&new_link.image_url)
        .bind(&new_link.ai_summary)
        .bind(&new_link.ai_tags)
        .fetch_one(&self.db)
        .await?;

        Ok(link)
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Link>, AppError> {
        let links = sqlx::query_as::<_, Link>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(links)
    }

    async fn find(&self, id: LinkId) -> Result<Option<Link>, AppError> {
        let link = sqlx::query_as::<_, Link>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(link)
    }

    async fn delete(&self, id: LinkId) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM links WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
