//! User accounts.
//!
//! [`User`] is the public profile and is safe to serialize. The password
//! hash only ever travels inside [`UserCredentials`], which is not
//! `Serialize` and redacts the hash from its `Debug` output.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::ToSchema;

use crate::ids::UserId;

/// Public user profile.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[schema(example = "a@b.com")]
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// A user row including the bcrypt password hash.
#[derive(FromRow, Clone)]
pub struct UserCredentials {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl UserCredentials {
    pub fn to_user(&self) -> User {
        User {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            created_at: self.created_at,
        }
    }
}

impl From<UserCredentials> for User {
    fn from(credentials: UserCredentials) -> Self {
        User {
            id: credentials.id,
            username: credentials.username,
            email: credentials.email,
            created_at: credentials.created_at,
        }
    }
}

impl fmt::Debug for UserCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCredentials")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// Data needed to insert a user. The email is expected to be normalized.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Emails are stored trimmed and lower-cased; lookups must apply the same rule.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
