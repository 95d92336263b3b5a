use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{get_me, login_user, logout_all, logout_user, refresh_token, register_user};
use crate::state::AppState;

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_user))
        .route("/login", post(login_user))
        .route("/refresh", post(refresh_token))
        .route("/logout", post(logout_user))
        .route("/logout-all", post(logout_all))
        .route("/me", get(get_me))
}
