//! In-memory store implementations.
//!
//! Used when `STORAGE_BACKEND=memory` and by the integration tests. State
//! lives for the lifetime of the process.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use linkvault_core::AppError;
use linkvault_models::{
    Link, LinkId, NewLink, NewUser, RefreshTokenEntry, TokenId, User, UserCredentials, UserId,
};

use crate::links::LinkStore;
use crate::refresh_tokens::RefreshTokenStore;
use crate::users::{EMAIL_IN_USE, UserStore};

#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<UserId, UserCredentials>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        // Check and insert under one write lock so two racing registrations
        // cannot both claim the email.
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == new_user.email) {
            return Err(AppError::conflict(EMAIL_IN_USE));
        }

        let credentials = UserCredentials {
            id: UserId::new(),
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: Utc::now(),
        };
        let user = credentials.to_user();
        users.insert(credentials.id, credentials);

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, AppError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.get(&id).map(UserCredentials::to_user))
    }
}

#[derive(Debug, Default)]
pub struct MemoryRefreshTokenStore {
    entries: RwLock<HashMap<TokenId, RefreshTokenEntry>>,
}

impl MemoryRefreshTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl RefreshTokenStore for MemoryRefreshTokenStore {
    async fn record(&self, entry: &RefreshTokenEntry) -> Result<(), AppError> {
        let mut entries = self.entries.write().await;
        if entries.contains_key(&entry.jti) {
            return Err(AppError::conflict(
                "Refresh token identifier already recorded",
            ));
        }
        entries.insert(entry.jti, entry.clone());
        Ok(())
    }

    async fn find(
        &self,
        jti: TokenId,
        user_id: UserId,
    ) -> Result<Option<RefreshTokenEntry>, AppError> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(&jti)
            .filter(|entry| entry.user_id == user_id)
            .cloned())
    }

    async fn revoke(&self, jti: TokenId) -> Result<bool, AppError> {
        Ok(self.entries.write().await.remove(&jti).is_some())
    }

    async fn revoke_all_for_user(&self, user_id: UserId) -> Result<u64, AppError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.user_id != user_id);
        Ok((before - entries.len()) as u64)
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<RefreshTokenEntry>, AppError> {
        let entries = self.entries.read().await;
        let mut owned: Vec<RefreshTokenEntry> = entries
            .values()
            .filter(|entry| entry.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn prune_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        Ok((before - entries.len()) as u64)
    }
}

#[derive(Debug, Default)]
pub struct MemoryLinkStore {
    links: RwLock<HashMap<LinkId, Link>>,
}

impl MemoryLinkStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkStore for MemoryLinkStore {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let link = Link {
            id: LinkId::new(),
            user_id: new_link.user_id,
            url: new_link.url,
            title: new_link.title,
            image_url: new_link.image_url,
            ai_summary: new_link.ai_summary,
            ai_tags: new_link.ai_tags,
            created_at: Utc::now(),
        };
        self.links.write().await.insert(link.id, link.clone());
        Ok(link)
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Link>, AppError> {
        let links = self.links.read().await;
        let mut owned: Vec<Link> = links
            .values()
            .filter(|link| link.is_owned_by(user_id))
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn find(&self, id: LinkId) -> Result<Option<Link>, AppError> {
        Ok(self.links.read().await.get(&id).cloned())
    }

    async fn delete(&self, id: LinkId) -> Result<bool, AppError> {
        Ok(self.links.write().await.remove(&id).is_some())
    }
}
