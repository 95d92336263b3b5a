use std::fmt;
use std::sync::Arc;

use linkvault_auth::{Clock, SystemClock};
use linkvault_config::{CookieConfig, CorsConfig, JwtConfig};
use linkvault_db::{
    LinkStore, MemoryLinkStore, MemoryRefreshTokenStore, MemoryUserStore, PgLinkStore, PgPool,
    PgRefreshTokenStore, PgUserStore, RefreshTokenStore, UserStore,
};

use crate::modules::links::enricher::{LinkEnricher, UrlEnricher};

/// Shared application state. Stores, the enricher and the clock are trait
/// objects so the same router runs on PostgreSQL, in memory, or in tests
/// with a fixed clock.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub refresh_tokens: Arc<dyn RefreshTokenStore>,
    pub links: Arc<dyn LinkStore>,
    pub enricher: Arc<dyn LinkEnricher>,
    pub clock: Arc<dyn Clock>,
    pub jwt_config: JwtConfig,
    pub cookie_config: CookieConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn postgres(
        db: PgPool,
        jwt_config: JwtConfig,
        cookie_config: CookieConfig,
        cors_config: CorsConfig,
    ) -> Self {
        Self {
            users: Arc::new(PgUserStore::new(db.clone())),
            refresh_tokens: Arc::new(PgRefreshTokenStore::new(db.clone())),
            links: Arc::new(PgLinkStore::new(db)),
            enricher: Arc::new(UrlEnricher),
            clock: Arc::new(SystemClock),
            jwt_config,
            cookie_config,
            cors_config,
        }
    }

    pub fn in_memory(
        jwt_config: JwtConfig,
        cookie_config: CookieConfig,
        cors_config: CorsConfig,
    ) -> Self {
        Self {
            users: Arc::new(MemoryUserStore::new()),
            refresh_tokens: Arc::new(MemoryRefreshTokenStore::new()),
            links: Arc::new(MemoryLinkStore::new()),
            enricher: Arc::new(UrlEnricher),
            clock: Arc::new(SystemClock),
            jwt_config,
            cookie_config,
            cors_config,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_enricher(mut self, enricher: Arc<dyn LinkEnricher>) -> Self {
        self.enricher = enricher;
        self
    }

    pub fn with_refresh_tokens(mut self, store: Arc<dyn RefreshTokenStore>) -> Self {
        self.refresh_tokens = store;
        self
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("jwt_config", &self.jwt_config)
            .field("cookie_config", &self.cookie_config)
            .field("cors_config", &self.cors_config)
            .finish_non_exhaustive()
    }
}
