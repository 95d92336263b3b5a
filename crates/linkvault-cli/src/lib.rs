//! # LinkVault CLI
//!
//! Administrative commands for LinkVault: creating accounts and maintaining
//! the refresh-token allow-list.
//!
//! The commands take store trait objects so they run unchanged against the
//! PostgreSQL backend or the in-memory one.
//!
//! ## Usage
//!
//! ```ignore
//! use linkvault_cli::commands;
//! use linkvault_db::PgRefreshTokenStore;
//!
//! let store = PgRefreshTokenStore::new(pool);
//! let pruned = commands::prune_tokens(&store, chrono::Utc::now()).await?;
//! ```

pub mod commands;
