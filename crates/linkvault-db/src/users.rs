use async_trait::async_trait;
use sqlx::PgPool;

use linkvault_core::AppError;
use linkvault_models::{NewUser, User, UserCredentials, UserId};

use crate::is_unique_violation;

pub const EMAIL_IN_USE: &str = "Email already in use";

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a user. Fails with a conflict when the email is taken.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Looks up a user by normalized email, including the password hash.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, AppError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AppError>;
}

#[derive(Clone, Debug)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (username, email, password_hash)
             VALUES ($1, $2, $3)
             RETURNING id, username, email, created_at",
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::conflict(EMAIL_IN_USE)
            } else {
                AppError::from(e)
            }
        })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, AppError> {
        let user = sqlx::query_as::<_, UserCredentials>(
            "SELECT id, username, email, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }
}
