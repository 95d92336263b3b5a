//! JWT claim structures.
//!
//! - [`AccessClaims`]: identity carried by access tokens
//! - [`RefreshClaims`]: identity plus the revocation key carried by refresh tokens
//!
//! The structures share no optional fields, so a token of one kind never
//! deserializes as the other even if the secrets were ever mixed up.

use serde::{Deserialize, Serialize};

/// Claims embedded in access tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// User ID (subject claim)
    pub sub: String,
    /// User's email address
    pub email: String,
    /// Issued-at (Unix timestamp, seconds)
    pub iat: i64,
    /// Expiration (Unix timestamp, seconds)
    pub exp: i64,
}

/// Claims embedded in refresh tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// User ID (subject claim)
    pub sub: String,
    /// Unique token identifier, the allow-list key
    pub jti: String,
    /// Issued-at (Unix timestamp, seconds)
    pub iat: i64,
    /// Expiration (Unix timestamp, seconds)
    pub exp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_claims_serialize() {
        let claims = AccessClaims {
            sub: "user-id-123".to_string(),
            email: "a@b.com".to_string(),
            iat: 1_700_000_000,
            exp: 1_700_000_900,
        };
        let serialized = serde_json::to_string(&claims).unwrap();
        assert!(serialized.contains(r#""sub":"user-id-123""#));
        assert!(serialized.contains(r#""email":"a@b.com""#));
    }

    #[test]
    fn test_refresh_claims_do_not_parse_as_access() {
        let json = r#"{"sub":"u","jti":"j","iat":1,"exp":2}"#;
        assert!(serde_json::from_str::<AccessClaims>(json).is_err());
        assert!(serde_json::from_str::<RefreshClaims>(json).is_ok());
    }

    #[test]
    fn test_access_claims_do_not_parse_as_refresh() {
        let json = r#"{"sub":"u","email":"a@b.com","iat":1,"exp":2}"#;
        assert!(serde_json::from_str::<RefreshClaims>(json).is_err());
    }
}
