//! # LinkVault Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: token secrets and lifetimes
//! - [`cookie`]: refresh-token cookie attributes
//! - [`cors`]: allowed origins
//! - [`session`]: allow-list sweeper interval
//! - [`server`]: bind address and storage backend
//!
//! # Example
//!
//! ```ignore
//! use linkvault_config::{CookieConfig, CorsConfig, JwtConfig, ServerConfig, SessionConfig};
//!
//! let jwt_config = JwtConfig::from_env()?;
//! let cookie_config = CookieConfig::from_env(&jwt_config);
//! let cors_config = CorsConfig::from_env();
//! ```

pub mod cookie;
pub mod cors;
pub mod jwt;
pub mod server;
pub mod session;

// Re-export commonly used types at crate root
pub use cookie::CookieConfig;
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use server::{ServerConfig, StorageBackend};
pub use session::SessionConfig;

/// Parses an optional raw value, falling back to `default` when it is unset
/// or unparsable.
pub(crate) fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

pub(crate) fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
