use axum::{
    Router,
    routing::{delete, get},
};

use super::controller::{create_link, delete_link, get_links};
use crate::state::AppState;

pub fn init_links_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_links).post(create_link))
        .route("/{id}", delete(delete_link))
}
