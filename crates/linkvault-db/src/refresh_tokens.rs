//! The refresh-token allow-list.
//!
//! A `jti` is honored only while its entry exists and `expires_at` lies in
//! the future. Expiry is checked at lookup time by every implementation, so
//! a late or disabled background sweep never lets an expired token through.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use linkvault_core::AppError;
use linkvault_models::{RefreshTokenEntry, TokenId, UserId};

use crate::is_unique_violation;

#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    /// Inserts an entry. A duplicate `jti` is rejected as a conflict.
    async fn record(&self, entry: &RefreshTokenEntry) -> Result<(), AppError>;

    /// Finds the entry matching both `jti` and `user_id`, expired or not.
    async fn find(
        &self,
        jti: TokenId,
        user_id: UserId,
    ) -> Result<Option<RefreshTokenEntry>, AppError>;

    /// True when an unexpired entry exists for both `jti` and `user_id`.
    async fn is_allowed(
        &self,
        jti: TokenId,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        Ok(self
            .find(jti, user_id)
            .await?
            .is_some_and(|entry| !entry.is_expired(now)))
    }

    /// Deletes the entry for `jti`. Returns whether an entry was removed;
    /// deleting an absent entry is not an error.
    async fn revoke(&self, jti: TokenId) -> Result<bool, AppError>;

    /// Deletes every entry owned by `user_id`, returning how many were removed.
    async fn revoke_all_for_user(&self, user_id: UserId) -> Result<u64, AppError>;

    /// All entries owned by `user_id`, newest first.
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<RefreshTokenEntry>, AppError>;

    /// Deletes every entry expired at `now`, returning how many were removed.
    async fn prune_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError>;
}

#[derive(Clone, Debug)]
pub struct PgRefreshTokenStore {
    db: PgPool,
}

impl PgRefreshTokenStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RefreshTokenStore for PgRefreshTokenStore {
    async fn record(&self, entry: &RefreshTokenEntry) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO refresh_tokens (jti, user_id, expires_at, created_at)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(entry.jti)
        .bind(entry.user_id)
        .bind(entry.expires_at)
        .bind(entry.created_at)
        .execute(&self.db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::conflict("Refresh token identifier already recorded")
            } else {
                AppError::from(e)
            }
        })?;

        Ok(())
    }

    async fn find(
        &self,
        jti: TokenId,
        user_id: UserId,
    ) -> Result<Option<RefreshTokenEntry>, AppError> {
        let entry = sqlx::query_as::<_, RefreshTokenEntry>(
            "SELECT user_id, jti, expires_at, created_at
             FROM refresh_tokens
             WHERE jti = $1 AND user_id = $2",
        )
        .bind(jti)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(entry)
    }

    async fn is_allowed(
        &self,
        jti: TokenId,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let allowed = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                SELECT 1 FROM refresh_tokens
                WHERE jti = $1 AND user_id = $2 AND expires_at > $3
             )",
        )
        .bind(jti)
        .bind(user_id)
        .bind(now)
        .fetch_one(&self.db)
        .await?;

        Ok(allowed)
    }

    async fn revoke(&self, jti: TokenId) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE jti = $1")
            .bind(jti)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn revoke_all_for_user(&self, user_id: UserId) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected())
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<RefreshTokenEntry>, AppError> {
        let entries = sqlx::query_as::<_, RefreshTokenEntry>(
            "SELECT user_id, jti, expires_at, created_at
             FROM refresh_tokens
             WHERE user_id = $1
             ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(entries)
    }

    async fn prune_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected())
    }
}
