//! Refresh-token cookie attributes.
//!
//! The cookie is always `HttpOnly` with `SameSite=Strict`. `Secure` follows
//! `COOKIE_SECURE` when set, otherwise it is enabled only when
//! `APP_ENV=production`. Its lifetime matches the refresh token lifetime.

use crate::jwt::JwtConfig;
use crate::{env_var, parse_or};

pub const REFRESH_TOKEN_COOKIE_NAME: &str = "refreshToken";

#[derive(Clone, Debug)]
pub struct CookieConfig {
    pub name: String,
    pub path: String,
    pub secure: bool,
    /// Cookie lifetime in seconds
    pub max_age: i64,
}

impl CookieConfig {
    pub fn from_env(jwt_config: &JwtConfig) -> Self {
        Self::from_lookup(jwt_config, env_var)
    }

    pub fn from_lookup<F>(jwt_config: &JwtConfig, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let production = lookup("APP_ENV")
            .map(|v| v.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        Self {
            secure: parse_or(lookup("COOKIE_SECURE"), production),
            ..Self::for_jwt(jwt_config)
        }
    }

    /// Development defaults: not `Secure`, lifetime taken from the JWT config.
    pub fn for_jwt(jwt_config: &JwtConfig) -> Self {
        Self {
            name: REFRESH_TOKEN_COOKIE_NAME.to_string(),
            path: "/".to_string(),
            secure: false,
            max_age: jwt_config.refresh_token_expiry,
        }
    }
}
