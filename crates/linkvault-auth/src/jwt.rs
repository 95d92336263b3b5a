//! Issuing and verifying access and refresh tokens.
//!
//! All routines take the [`JwtConfig`] holding the secrets and the current
//! time explicitly, so nothing here reads ambient state.
//!
//! # Verification contract
//!
//! - [`verify_access_token`] checks signature, shape and expiry.
//! - [`verify_refresh_signature`] checks signature and shape only. Whether a
//!   refresh token is still honored is decided by the allow-list entry for
//!   its `jti`, whose expiry equals the token's `exp`.
//!
//! Both fail closed with `None`. The reason is logged at `debug` level and
//! never returned, so callers cannot leak it.

use anyhow::anyhow;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use linkvault_config::JwtConfig;
use linkvault_core::AppError;

use crate::claims::{AccessClaims, RefreshClaims};

const ALGORITHM: Algorithm = Algorithm::HS256;

/// A freshly signed refresh token together with the data the allow-list needs.
#[derive(Debug, Clone)]
pub struct IssuedRefreshToken {
    pub token: String,
    pub jti: Uuid,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Identity extracted from a refresh token whose signature checked out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSubject {
    pub user_id: Uuid,
    pub jti: Uuid,
}

fn validation() -> Validation {
    let mut validation = Validation::new(ALGORITHM);
    // Expiry is compared against the injected clock instead of the system time.
    validation.validate_exp = false;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["sub", "exp"]);
    validation
}

fn decode_claims<T: DeserializeOwned>(token: &str, secret: &str) -> Option<T> {
    decode::<T>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation(),
    )
    .map(|data| data.claims)
    .map_err(|e| tracing::debug!(error = %e, "Token rejected"))
    .ok()
}

/// Creates a short-lived access token for `user_id`.
///
/// # Errors
///
/// Returns an internal error if the lifetime overflows or encoding fails.
pub fn issue_access_token(
    user_id: Uuid,
    email: &str,
    jwt_config: &JwtConfig,
    now: DateTime<Utc>,
) -> Result<String, AppError> {
    let iat = now.timestamp();
    let exp = iat
        .checked_add(jwt_config.access_token_expiry)
        .ok_or_else(|| AppError::internal(anyhow!("Access token lifetime out of range")))?;
    let claims = AccessClaims {
        sub: user_id.to_string(),
        email: email.to_string(),
        iat,
        exp,
    };

    encode(
        &Header::new(ALGORITHM),
        &claims,
        &EncodingKey::from_secret(jwt_config.access_secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow!("Failed to create access token: {}", e)))
}

/// Verifies an access token against the access secret and `now`.
pub fn verify_access_token(
    token: &str,
    jwt_config: &JwtConfig,
    now: DateTime<Utc>,
) -> Option<AccessClaims> {
    let claims: AccessClaims = decode_claims(token, &jwt_config.access_secret)?;

    if Uuid::parse_str(&claims.sub).is_err() {
        tracing::debug!("Access token subject is not a UUID");
        return None;
    }

    if claims.exp <= now.timestamp() {
        tracing::debug!(exp = claims.exp, "Access token expired");
        return None;
    }

    Some(claims)
}

/// Creates a long-lived refresh token with a fresh random `jti`.
///
/// The caller must record `jti` in the allow-list before handing the token
/// to the client.
///
/// # Errors
///
/// Returns an internal error if the lifetime overflows or encoding fails.
pub fn issue_refresh_token(
    user_id: Uuid,
    jwt_config: &JwtConfig,
    now: DateTime<Utc>,
) -> Result<IssuedRefreshToken, AppError> {
    let jti = Uuid::new_v4();
    let expires_at = Duration::try_seconds(jwt_config.refresh_token_expiry)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or_else(|| AppError::internal(anyhow!("Refresh token lifetime out of range")))?;

    let claims = RefreshClaims {
        sub: user_id.to_string(),
        jti: jti.to_string(),
        iat: now.timestamp(),
        exp: expires_at.timestamp(),
    };

    let token = encode(
        &Header::new(ALGORITHM),
        &claims,
        &EncodingKey::from_secret(jwt_config.refresh_secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow!("Failed to create refresh token: {}", e)))?;

    Ok(IssuedRefreshToken {
        token,
        jti,
        issued_at: now,
        expires_at,
    })
}

/// Checks a refresh token's signature and shape. Does not consult the
/// allow-list and does not enforce `exp`.
pub fn verify_refresh_signature(token: &str, jwt_config: &JwtConfig) -> Option<RefreshSubject> {
    let claims: RefreshClaims = decode_claims(token, &jwt_config.refresh_secret)?;

    let (Ok(user_id), Ok(jti)) = (Uuid::parse_str(&claims.sub), Uuid::parse_str(&claims.jti))
    else {
        tracing::debug!("Refresh token carries malformed identifiers");
        return None;
    };

    Some(RefreshSubject { user_id, jti })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_test_jwt_config() -> JwtConfig {
        JwtConfig {
            access_secret: "test-access-secret-at-least-32-characters".to_string(),
            refresh_secret: "test-refresh-secret-at-least-32-characters".to_string(),
            access_token_expiry: 900,
            refresh_token_expiry: 2_592_000,
        }
    }

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn test_access_round_trip_preserves_identity() {
        let config = get_test_jwt_config();
        let user_id = Uuid::new_v4();

        let token = issue_access_token(user_id, "a@b.com", &config, now()).unwrap();
        let claims = verify_access_token(&token, &config, now()).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, "a@b.com");
        assert_eq!(claims.exp - claims.iat, 900);
    }

    #[test]
    fn test_access_token_expires() {
        let config = get_test_jwt_config();
        let token = issue_access_token(Uuid::new_v4(), "a@b.com", &config, now()).unwrap();

        let just_before = now() + Duration::seconds(899);
        let at_expiry = now() + Duration::seconds(900);

        assert!(verify_access_token(&token, &config, just_before).is_some());
        assert!(verify_access_token(&token, &config, at_expiry).is_none());
    }

    #[test]
    fn test_access_token_wrong_secret() {
        let config = get_test_jwt_config();
        let token = issue_access_token(Uuid::new_v4(), "a@b.com", &config, now()).unwrap();

        let wrong_config = JwtConfig {
            access_secret: "different-secret-key-at-least-32-characters".to_string(),
            ..get_test_jwt_config()
        };

        assert!(verify_access_token(&token, &wrong_config, now()).is_none());
    }

    #[test]
    fn test_access_token_malformed() {
        let config = get_test_jwt_config();
        assert!(verify_access_token("invalid.token.here", &config, now()).is_none());
        assert!(verify_access_token("", &config, now()).is_none());
    }

    #[test]
    fn test_refresh_token_not_accepted_as_access() {
        let config = get_test_jwt_config();
        let issued = issue_refresh_token(Uuid::new_v4(), &config, now()).unwrap();

        assert!(verify_access_token(&issued.token, &config, now()).is_none());
    }

    #[test]
    fn test_access_token_not_accepted_as_refresh() {
        let config = get_test_jwt_config();
        let token = issue_access_token(Uuid::new_v4(), "a@b.com", &config, now()).unwrap();

        assert!(verify_refresh_signature(&token, &config).is_none());
    }

    #[test]
    fn test_refresh_round_trip_carries_jti() {
        let config = get_test_jwt_config();
        let user_id = Uuid::new_v4();

        let issued = issue_refresh_token(user_id, &config, now()).unwrap();
        let subject = verify_refresh_signature(&issued.token, &config).unwrap();

        assert_eq!(subject.user_id, user_id);
        assert_eq!(subject.jti, issued.jti);
        assert_eq!(issued.expires_at, now() + Duration::days(30));
    }

    #[test]
    fn test_refresh_jti_is_unique_per_issue() {
        let config = get_test_jwt_config();
        let user_id = Uuid::new_v4();

        let first = issue_refresh_token(user_id, &config, now()).unwrap();
        let second = issue_refresh_token(user_id, &config, now()).unwrap();

        assert_ne!(first.jti, second.jti);
        assert_ne!(first.token, second.token);
    }

    #[test]
    fn test_refresh_signature_rejects_other_secret() {
        let config = get_test_jwt_config();
        let issued = issue_refresh_token(Uuid::new_v4(), &config, now()).unwrap();

        let rotated = JwtConfig {
            refresh_secret: "rotated-refresh-secret-at-least-32-chars".to_string(),
            ..get_test_jwt_config()
        };

        assert!(verify_refresh_signature(&issued.token, &rotated).is_none());
    }

    #[test]
    fn test_refresh_signature_ignores_expiry() {
        let config = JwtConfig {
            refresh_token_expiry: 1,
            ..get_test_jwt_config()
        };
        let long_ago = DateTime::from_timestamp(1_000_000_000, 0).unwrap();
        let issued = issue_refresh_token(Uuid::new_v4(), &config, long_ago).unwrap();

        assert!(verify_refresh_signature(&issued.token, &config).is_some());
    }

    #[test]
    fn test_refresh_token_tampered_payload() {
        let config = get_test_jwt_config();
        let issued = issue_refresh_token(Uuid::new_v4(), &config, now()).unwrap();

        let mut parts: Vec<&str> = issued.token.split('.').collect();
        let forged = issue_refresh_token(Uuid::new_v4(), &config, now()).unwrap();
        let forged_payload = forged.token.split('.').nth(1).unwrap().to_string();
        parts[1] = &forged_payload;
        let tampered = parts.join(".");

        assert!(verify_refresh_signature(&tampered, &config).is_none());
    }

    #[test]
    fn test_overflowing_lifetimes_fail_without_panic() {
        let config = JwtConfig {
            access_token_expiry: i64::MAX,
            refresh_token_expiry: i64::MAX,
            ..get_test_jwt_config()
        };

        let access = issue_access_token(Uuid::new_v4(), "a@b.com", &config, now());
        assert!(access.unwrap_err().is_server_error());

        let refresh = issue_refresh_token(Uuid::new_v4(), &config, now());
        assert!(refresh.is_err_and(|e| e.is_server_error()));
    }
}
