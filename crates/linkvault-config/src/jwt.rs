//! Token signing configuration.
//!
//! Access and refresh tokens are signed with two distinct secrets so that a
//! leaked access secret cannot mint refresh tokens and vice versa.
//!
//! # Environment Variables
//!
//! - `JWT_SECRET`: access token secret (required)
//! - `JWT_REFRESH_SECRET`: refresh token secret (required, must differ from `JWT_SECRET`)
//! - `JWT_ACCESS_EXPIRY`: access token lifetime in seconds (default: 900)
//! - `JWT_REFRESH_EXPIRY`: refresh token lifetime in seconds (default: 2592000)

use std::fmt;

use anyhow::{Result, bail};

use crate::{env_var, parse_or};

pub const DEFAULT_ACCESS_EXPIRY: i64 = 15 * 60;
pub const DEFAULT_REFRESH_EXPIRY: i64 = 30 * 24 * 60 * 60;
/// Upper bound for either lifetime: ten years.
pub const MAX_TOKEN_EXPIRY: i64 = 10 * 365 * 24 * 60 * 60;

#[derive(Clone)]
pub struct JwtConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    /// Access token lifetime in seconds
    pub access_token_expiry: i64,
    /// Refresh token lifetime in seconds
    pub refresh_token_expiry: i64,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("access_secret", &"<redacted>")
            .field("refresh_secret", &"<redacted>")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .finish()
    }
}

impl JwtConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(env_var)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (Some(access_secret), Some(refresh_secret)) =
            (lookup("JWT_SECRET"), lookup("JWT_REFRESH_SECRET"))
        else {
            bail!("JWT_SECRET and JWT_REFRESH_SECRET must both be set");
        };

        let config = Self {
            access_secret,
            refresh_secret,
            access_token_expiry: parse_or(lookup("JWT_ACCESS_EXPIRY"), DEFAULT_ACCESS_EXPIRY),
            refresh_token_expiry: parse_or(lookup("JWT_REFRESH_EXPIRY"), DEFAULT_REFRESH_EXPIRY),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.access_secret.trim().is_empty() || self.refresh_secret.trim().is_empty() {
            bail!("JWT secrets must not be empty");
        }
        if self.access_secret == self.refresh_secret {
            bail!("JWT_SECRET and JWT_REFRESH_SECRET must be different");
        }
        if self.access_token_expiry <= 0 || self.refresh_token_expiry <= 0 {
            bail!("token lifetimes must be positive");
        }
        if self.access_token_expiry > MAX_TOKEN_EXPIRY || self.refresh_token_expiry > MAX_TOKEN_EXPIRY
        {
            bail!("token lifetimes must not exceed {MAX_TOKEN_EXPIRY} seconds");
        }
        if self.refresh_token_expiry <= self.access_token_expiry {
            bail!("JWT_REFRESH_EXPIRY must be longer than JWT_ACCESS_EXPIRY");
        }
        Ok(())
    }
}
