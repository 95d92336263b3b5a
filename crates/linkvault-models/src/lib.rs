//! # LinkVault Models
//!
//! Domain entities shared by the API, the storage layer and the CLI.
//!
//! # Modules
//!
//! - [`ids`]: strongly-typed UUID newtypes
//! - [`users`]: user accounts and their stored credentials
//! - [`refresh_tokens`]: allow-list entries for refresh tokens
//! - [`links`]: saved bookmarks

pub mod ids;
pub mod links;
pub mod refresh_tokens;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use ids::{LinkId, TokenId, UserId};
pub use links::{Link, NewLink};
pub use refresh_tokens::RefreshTokenEntry;
pub use users::{NewUser, User, UserCredentials, normalize_email};
