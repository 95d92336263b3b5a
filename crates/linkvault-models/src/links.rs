use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::ids::{LinkId, UserId};

/// A saved bookmark with its enrichment.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub id: LinkId,
    pub user_id: UserId,
    #[schema(example = "https://www.rust-lang.org/learn")]
    pub url: String,
    pub title: String,
    pub image_url: Option<String>,
    /// Bullet-point summary of the page
    pub ai_summary: Vec<String>,
    pub ai_tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewLink {
    pub user_id: UserId,
    pub url: String,
    pub title: String,
    pub image_url: Option<String>,
    pub ai_summary: Vec<String>,
    pub ai_tags: Vec<String>,
}

impl Link {
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}
