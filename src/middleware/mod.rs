//! Request extractors for cross-cutting concerns.
//!
//! # Authentication Flow
//!
//! 1. Client sends request with `Authorization: Bearer <token>` header
//! 2. [`auth::AuthUser`] verifies signature and expiry against the injected clock
//! 3. Handler executes with the caller's [`UserId`](linkvault_models::UserId)
//!
//! Every failure is a 401 with a generic message.
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::AuthUser;
//!
//! async fn get_me(State(state): State<AppState>, auth_user: AuthUser) -> impl IntoResponse {
//!     let user_id = auth_user.user_id();
//!     // ...
//! }
//! ```

pub mod auth;
