//! Helpers for driving the router in tests: an in-memory [`AppState`] with a
//! [`FixedClock`] and fixed secrets.

use std::sync::Arc;

use axum::Router;

use linkvault_auth::FixedClock;
use linkvault_config::{CookieConfig, CorsConfig, JwtConfig};

use crate::router::init_router;
use crate::state::AppState;

/// 2023-11-14T22:13:20Z
pub const TEST_EPOCH: i64 = 1_700_000_000;

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        access_secret: "test-access-secret-0123456789abcdef".to_string(),
        refresh_secret: "test-refresh-secret-0123456789abcdef".to_string(),
        access_token_expiry: 900,
        refresh_token_expiry: 30 * 24 * 60 * 60,
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub clock: Arc<FixedClock>,
}

impl TestApp {
    /// In-memory stores, URL-only enricher, clock frozen at [`TEST_EPOCH`].
    pub fn new() -> Self {
        Self::from_state(test_state())
    }

    /// Builds the router over `state`, replacing its clock with a fixed one.
    pub fn from_state(state: AppState) -> Self {
        let clock = Arc::new(FixedClock::at_timestamp(TEST_EPOCH));
        let state = state.with_clock(clock.clone());
        Self {
            router: init_router(state.clone()),
            state,
            clock,
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

pub fn test_state() -> AppState {
    let jwt_config = test_jwt_config();
    let cookie_config = CookieConfig::for_jwt(&jwt_config);
    AppState::in_memory(jwt_config, cookie_config, CorsConfig::default())
}
