use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::ids::{TokenId, UserId};

/// An allow-list entry: the refresh token identified by `jti` is honored
/// until `expires_at`, unless the entry is deleted first.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenEntry {
    pub user_id: UserId,
    pub jti: TokenId,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl RefreshTokenEntry {
    /// An entry is expired from its `expires_at` instant onward.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
