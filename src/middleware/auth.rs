use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use linkvault_auth::{AccessClaims, verify_access_token};
use linkvault_core::AppError;
use linkvault_models::UserId;

use crate::state::AppState;

/// Extractor that validates the bearer access token against the state's
/// clock and provides the caller's identity.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub claims: AccessClaims,
    user_id: UserId,
}

impl AuthUser {
    pub fn user_id(&self) -> UserId {
        self.user_id
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid authorization header format"))?;

        let claims = verify_access_token(token, &state.jwt_config, state.clock.now())
            .ok_or_else(|| AppError::unauthorized("Invalid or expired token"))?;

        let user_id = claims
            .sub
            .parse::<UserId>()
            .map_err(|_| AppError::unauthorized("Invalid or expired token"))?;

        Ok(AuthUser { claims, user_id })
    }
}
