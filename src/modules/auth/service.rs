//! Session lifecycle: registration, login, refresh and logout.
//!
//! A login issues an access token and a refresh token and records the
//! refresh token's `jti` in the allow-list before either reaches the client.
//! Refresh never rotates the refresh token, so concurrent refreshes with the
//! same cookie all succeed while its entry is live.

use tracing::{info, instrument, warn};

use linkvault_auth::{issue_access_token, issue_refresh_token, verify_refresh_signature};
use linkvault_core::{AppError, hash_password, verify_password};
use linkvault_models::{NewUser, RefreshTokenEntry, TokenId, User, UserId, normalize_email};

use super::model::{LoginRequest, RefreshFailure, RegisterRequestDto};
use crate::metrics::{track_login_failure, track_tokens_issued, track_user_registered};
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Tokens handed out by a successful login.
pub struct IssuedSession {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}

pub struct AuthService;

impl AuthService {
    #[instrument(skip_all, fields(email = %dto.email))]
    pub async fn register_user(state: &AppState, dto: RegisterRequestDto) -> Result<User, AppError> {
        let username = dto.username.trim();
        if username.is_empty() {
            return Err(AppError::bad_request("Username is required"));
        }

        let password_hash = hash_password(&dto.password)?;

        let user = state
            .users
            .create(NewUser {
                username: username.to_string(),
                email: normalize_email(&dto.email),
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, "User registered");
        track_user_registered();
        Ok(user)
    }

    #[instrument(skip_all, fields(email = %dto.email))]
    pub async fn login_user(state: &AppState, dto: LoginRequest) -> Result<IssuedSession, AppError> {
        let Some(credentials) = state
            .users
            .find_by_email(&normalize_email(&dto.email))
            .await?
        else {
            track_login_failure("unknown_email");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        if !verify_password(&dto.password, &credentials.password_hash)? {
            track_login_failure("bad_password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let user = User::from(credentials);
        let now = state.clock.now();

        let access_token =
            issue_access_token(user.id.into_inner(), &user.email, &state.jwt_config, now)?;
        let refresh = issue_refresh_token(user.id.into_inner(), &state.jwt_config, now)?;

        state
            .refresh_tokens
            .record(&RefreshTokenEntry {
                user_id: user.id,
                jti: TokenId::from(refresh.jti),
                expires_at: refresh.expires_at,
                created_at: refresh.issued_at,
            })
            .await?;

        track_tokens_issued("access");
        track_tokens_issued("refresh");
        info!(user_id = %user.id, jti = %refresh.jti, "Session started");

        Ok(IssuedSession {
            user,
            access_token,
            refresh_token: refresh.token,
        })
    }

    /// Exchanges a refresh token for a new access token.
    ///
    /// The outer `Result` carries storage failures and a vanished user; the
    /// inner one says whether the refresh token itself was accepted.
    #[instrument(skip_all)]
    pub async fn refresh_access_token(
        state: &AppState,
        refresh_token: Option<&str>,
    ) -> Result<Result<String, RefreshFailure>, AppError> {
        let Some(token) = refresh_token else {
            return Ok(Err(RefreshFailure::Missing));
        };

        let Some(subject) = verify_refresh_signature(token, &state.jwt_config) else {
            return Ok(Err(RefreshFailure::Invalid));
        };

        let user_id = UserId::from(subject.user_id);
        let jti = TokenId::from(subject.jti);
        let now = state.clock.now();

        let Some(entry) = state.refresh_tokens.find(jti, user_id).await? else {
            return Ok(Err(RefreshFailure::Revoked));
        };

        if entry.is_expired(now) {
            state.refresh_tokens.revoke(jti).await?;
            return Ok(Err(RefreshFailure::Expired));
        }

        let user = state
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let access_token =
            issue_access_token(user.id.into_inner(), &user.email, &state.jwt_config, now)?;
        track_tokens_issued("access");

        Ok(Ok(access_token))
    }

    /// Revokes the session behind `refresh_token` if it verifies. Returns
    /// whether an allow-list entry was removed. Never fails: logout must
    /// always succeed from the client's point of view.
    #[instrument(skip_all)]
    pub async fn logout(state: &AppState, refresh_token: Option<&str>) -> bool {
        let Some(subject) =
            refresh_token.and_then(|token| verify_refresh_signature(token, &state.jwt_config))
        else {
            return false;
        };

        match state.refresh_tokens.revoke(TokenId::from(subject.jti)).await {
            Ok(removed) => {
                info!(user_id = %subject.user_id, jti = %subject.jti, removed, "Session ended");
                removed
            }
            Err(e) => {
                warn!(jti = %subject.jti, error = %e.error, "Failed to revoke refresh token on logout");
                false
            }
        }
    }

    #[instrument(skip(state))]
    pub async fn logout_all(state: &AppState, user_id: UserId) -> Result<u64, AppError> {
        let revoked = state.refresh_tokens.revoke_all_for_user(user_id).await?;
        info!(revoked, "All sessions ended");
        Ok(revoked)
    }

    #[instrument(skip(state))]
    pub async fn get_profile(state: &AppState, user_id: UserId) -> Result<User, AppError> {
        state
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}
