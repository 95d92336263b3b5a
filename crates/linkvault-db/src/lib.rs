//! # LinkVault DB
//!
//! Connection pool setup and the storage backends behind the API.
//!
//! Each aggregate has a store trait with two implementations:
//!
//! | Trait                 | PostgreSQL                | In-memory                     |
//! |-----------------------|---------------------------|-------------------------------|
//! | [`UserStore`]         | [`PgUserStore`]           | [`MemoryUserStore`]           |
//! | [`RefreshTokenStore`] | [`PgRefreshTokenStore`]   | [`MemoryRefreshTokenStore`]   |
//! | [`LinkStore`]         | [`PgLinkStore`]           | [`MemoryLinkStore`]           |
//!
//! The PostgreSQL stores rely on single-statement operations and unique
//! constraints for concurrency safety; the in-memory stores guard a map with
//! a `tokio::sync::RwLock`.
//!
//! # Example
//!
//! ```ignore
//! use linkvault_db::{PgRefreshTokenStore, RefreshTokenStore, init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&database_url, 10).await?;
//! run_migrations(&pool).await?;
//!
//! let store = PgRefreshTokenStore::new(pool.clone());
//! let pruned = store.prune_expired(chrono::Utc::now()).await?;
//! ```

pub mod links;
pub mod memory;
pub mod refresh_tokens;
pub mod users;

use sqlx::postgres::PgPoolOptions;

pub use links::{LinkStore, PgLinkStore};
pub use memory::{MemoryLinkStore, MemoryRefreshTokenStore, MemoryUserStore};
pub use refresh_tokens::{PgRefreshTokenStore, RefreshTokenStore};
pub use users::{PgUserStore, UserStore};

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Creates a PostgreSQL connection pool.
///
/// The returned pool is cheaply cloneable and is shared by every store.
pub async fn init_db_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Applies the migrations under `migrations/` at the repository root.
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    Ok(())
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
