use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use linkvault_models::{User, UserId};

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequestDto {
    #[validate(length(min = 1, max = 50, message = "Username is required"))]
    #[schema(example = "alice")]
    pub username: String,
    #[validate(email(message = "Invalid email address"))]
    #[schema(example = "a@b.com")]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters long"))]
    #[schema(example = "longenough1")]
    pub password: String,
}

#[derive(Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    #[schema(example = "a@b.com")]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// The subset of the profile returned alongside a fresh access token.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SessionUser {
    pub id: UserId,
    pub username: String,
    pub email: String,
}

impl From<User> for SessionUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: String,
    pub access_token: String,
    pub user: SessionUser,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LogoutAllResponse {
    pub message: String,
    /// Number of sessions that were revoked
    pub revoked: u64,
}

/// Why a refresh attempt was turned down. Logged and counted, never sent
/// to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshFailure {
    /// No refresh cookie on the request
    Missing,
    /// Bad signature or malformed token
    Invalid,
    /// No allow-list entry for the token's `jti`
    Revoked,
    /// The entry existed but had expired; it has now been removed
    Expired,
}

impl RefreshFailure {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefreshFailure::Missing => "missing",
            RefreshFailure::Invalid => "invalid",
            RefreshFailure::Revoked => "revoked",
            RefreshFailure::Expired => "expired",
        }
    }
}

impl fmt::Display for RefreshFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
