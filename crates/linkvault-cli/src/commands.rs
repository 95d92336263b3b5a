use chrono::{DateTime, Utc};
use validator::ValidateEmail;

use linkvault_core::{AppError, hash_password};
use linkvault_db::{RefreshTokenStore, UserStore};
use linkvault_models::{NewUser, RefreshTokenEntry, User, normalize_email};

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Creates an account the same way registration does: normalized email,
/// bcrypt hash, minimum password length.
pub async fn create_user(
    users: &dyn UserStore,
    username: &str,
    email: &str,
    password: &str,
) -> Result<User, AppError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(AppError::bad_request("Username is required"));
    }

    let email = normalize_email(email);
    if !email.validate_email() {
        return Err(AppError::bad_request("Invalid email address"));
    }

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::bad_request(
            "Password must be at least 8 characters long",
        ));
    }

    let password_hash = hash_password(password)?;
    users
        .create(NewUser {
            username: username.to_string(),
            email,
            password_hash,
        })
        .await
}

/// Deletes allow-list entries expired at `now`.
pub async fn prune_tokens(
    tokens: &dyn RefreshTokenStore,
    now: DateTime<Utc>,
) -> Result<u64, AppError> {
    tokens.prune_expired(now).await
}

async fn user_by_email(users: &dyn UserStore, email: &str) -> Result<User, AppError> {
    users
        .find_by_email(&normalize_email(email))
        .await?
        .map(User::from)
        .ok_or_else(|| AppError::not_found(format!("No user with email {}", email.trim())))
}

/// Lists the allow-list entries of the user with `email`, newest first.
pub async fn list_sessions(
    users: &dyn UserStore,
    tokens: &dyn RefreshTokenStore,
    email: &str,
) -> Result<(User, Vec<RefreshTokenEntry>), AppError> {
    let user = user_by_email(users, email).await?;
    let sessions = tokens.list_for_user(user.id).await?;
    Ok((user, sessions))
}

/// Revokes every refresh token of the user with `email`.
pub async fn revoke_sessions(
    users: &dyn UserStore,
    tokens: &dyn RefreshTokenStore,
    email: &str,
) -> Result<u64, AppError> {
    let user = user_by_email(users, email).await?;
    tokens.revoke_all_for_user(user.id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use linkvault_db::{MemoryRefreshTokenStore, MemoryUserStore};
    use linkvault_models::TokenId;

    fn entry(user: &User, expires_at: DateTime<Utc>) -> RefreshTokenEntry {
        RefreshTokenEntry {
            user_id: user.id,
            jti: TokenId::new(),
            expires_at,
            created_at: expires_at - Duration::days(30),
        }
    }

    #[tokio::test]
    async fn test_create_user_normalizes_email() {
        let users = MemoryUserStore::new();
        let user = create_user(&users, "alice", "  Alice@Example.COM ", "longenough1")
            .await
            .unwrap();

        assert_eq!(user.email, "alice@example.com");
        let stored = users
            .find_by_email("alice@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_ne!(stored.password_hash, "longenough1");
    }

    #[tokio::test]
    async fn test_create_user_rejects_short_password() {
        let users = MemoryUserStore::new();
        let err = create_user(&users, "alice", "a@b.com", "1234567")
            .await
            .unwrap_err();

        assert_eq!(err.status.as_u16(), 400);
        assert_eq!(
            err.error.to_string(),
            "Password must be at least 8 characters long"
        );
    }

    #[tokio::test]
    async fn test_create_user_rejects_email_the_api_rejects() {
        let users = MemoryUserStore::new();

        for email in ["foo@", "@example.com", "no-at-sign"] {
            let err = create_user(&users, "alice", email, "longenough1")
                .await
                .unwrap_err();
            assert_eq!(err.status.as_u16(), 400);
            assert_eq!(err.error.to_string(), "Invalid email address");
        }
        assert!(users.find_by_email("foo@").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_user_rejects_blank_username() {
        let users = MemoryUserStore::new();
        let err = create_user(&users, "   ", "a@b.com", "longenough1")
            .await
            .unwrap_err();

        assert_eq!(err.status.as_u16(), 400);
        assert_eq!(err.error.to_string(), "Username is required");
    }

    #[tokio::test]
    async fn test_sessions_listed_and_revoked_by_email() {
        let users = MemoryUserStore::new();
        let tokens = MemoryRefreshTokenStore::new();
        let user = create_user(&users, "alice", "a@b.com", "longenough1")
            .await
            .unwrap();
        let now = Utc::now();
        tokens.record(&entry(&user, now + Duration::days(1))).await.unwrap();
        tokens.record(&entry(&user, now + Duration::days(2))).await.unwrap();

        let (found, sessions) = list_sessions(&users, &tokens, "A@B.com").await.unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(sessions.len(), 2);

        assert_eq!(revoke_sessions(&users, &tokens, "a@b.com").await.unwrap(), 2);
        assert!(tokens.is_empty().await);
    }

    #[tokio::test]
    async fn test_unknown_email_is_not_found() {
        let users = MemoryUserStore::new();
        let tokens = MemoryRefreshTokenStore::new();

        let err = revoke_sessions(&users, &tokens, "nobody@b.com")
            .await
            .unwrap_err();
        assert_eq!(err.status.as_u16(), 404);
    }

    #[tokio::test]
    async fn test_prune_tokens() {
        let users = MemoryUserStore::new();
        let tokens = MemoryRefreshTokenStore::new();
        let user = create_user(&users, "alice", "a@b.com", "longenough1")
            .await
            .unwrap();
        let now = Utc::now();
        tokens.record(&entry(&user, now - Duration::hours(1))).await.unwrap();
        tokens.record(&entry(&user, now + Duration::hours(1))).await.unwrap();

        assert_eq!(prune_tokens(&tokens, now).await.unwrap(), 1);
        assert_eq!(tokens.len().await, 1);
    }
}
