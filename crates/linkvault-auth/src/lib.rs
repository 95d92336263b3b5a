//! # LinkVault Auth
//!
//! Credential-pair primitives for the LinkVault API.
//!
//! This crate provides:
//!
//! - [`claims`]: claim structures for access and refresh tokens
//! - [`jwt`]: issuing and verifying both token kinds
//! - [`clock`]: the injectable time source every routine takes `now` from
//!
//! # Token Types
//!
//! - **Access Token** ([`AccessClaims`]): short-lived, stateless, proves identity per request
//! - **Refresh Token** ([`RefreshClaims`]): long-lived, carries a `jti` that must be
//!   present in the allow-list to be honored
//!
//! The two kinds are signed with different secrets. Verification never
//! returns a distinguishable error: callers get `Some(..)` or `None`.
//!
//! # Example
//!
//! ```ignore
//! use linkvault_auth::{Clock, SystemClock, issue_access_token, verify_access_token};
//! use linkvault_config::JwtConfig;
//!
//! let config = JwtConfig::from_env()?;
//! let now = SystemClock.now();
//!
//! let token = issue_access_token(user_id, "a@b.com", &config, now)?;
//! let claims = verify_access_token(&token, &config, now).expect("fresh token verifies");
//! assert_eq!(claims.sub, user_id.to_string());
//! ```

pub mod claims;
pub mod clock;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::{AccessClaims, RefreshClaims};
pub use clock::{Clock, FixedClock, SystemClock};
pub use jwt::{
    IssuedRefreshToken, RefreshSubject, issue_access_token, issue_refresh_token,
    verify_access_token, verify_refresh_signature,
};
