use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::CookieJar;
use tracing::{instrument, warn};

use linkvault_core::AppError;
use linkvault_models::User;

use super::cookie::{read_refresh_token, refresh_cookie, removal_cookie};
use super::model::{
    ErrorResponse, LoginRequest, LoginResponse, LogoutAllResponse, MessageResponse,
    RefreshResponse, RegisterRequestDto,
};
use super::service::AuthService;
use crate::metrics::{track_login_success, track_refresh};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequestDto,
    responses(
        (status = 201, description = "User registered successfully", body = MessageResponse),
        (status = 400, description = "Bad request - validation error", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequestDto>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    AuthService::register_user(&state, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User created successfully".to_string(),
        }),
    ))
}

/// Log in and receive an access token plus the refresh-token cookie
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful; sets the refreshToken cookie", body = LoginResponse),
        (status = 400, description = "Bad request - validation error", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn login_user(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    let session = AuthService::login_user(&state, dto).await?;
    track_login_success();

    let jar = jar.add(refresh_cookie(&state.cookie_config, session.refresh_token));
    Ok((
        jar,
        Json(LoginResponse {
            message: "Login successful".to_string(),
            access_token: session.access_token,
            user: session.user.into(),
        }),
    ))
}

/// Exchange the refresh-token cookie for a new access token
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    responses(
        (status = 200, description = "New access token issued", body = RefreshResponse),
        (status = 401, description = "Missing, invalid, revoked or expired refresh token", body = ErrorResponse),
        (status = 404, description = "User no longer exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn refresh_token(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<RefreshResponse>, AppError> {
    let token = read_refresh_token(&jar, &state.cookie_config);

    match AuthService::refresh_access_token(&state, token.as_deref()).await? {
        Ok(access_token) => {
            track_refresh("success");
            Ok(Json(RefreshResponse { access_token }))
        }
        Err(failure) => {
            warn!(reason = %failure, "Refresh rejected");
            track_refresh(failure.as_str());
            Err(AppError::unauthorized("Invalid or expired refresh token"))
        }
    }
}

/// Log out of the current session and clear the refresh-token cookie
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logged out; cookie cleared", body = MessageResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn logout_user(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<MessageResponse>) {
    let token = read_refresh_token(&jar, &state.cookie_config);
    AuthService::logout(&state, token.as_deref()).await;

    (
        jar.add(removal_cookie(&state.cookie_config)),
        Json(MessageResponse {
            message: "Logged out successfully".to_string(),
        }),
    )
}

/// Revoke every session of the caller
#[utoipa::path(
    post,
    path = "/api/auth/logout-all",
    responses(
        (status = 200, description = "All sessions revoked; cookie cleared", body = LogoutAllResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
#[instrument(skip_all, fields(user_id = %auth_user.user_id()))]
pub async fn logout_all(
    State(state): State<AppState>,
    auth_user: AuthUser,
    jar: CookieJar,
) -> Result<(CookieJar, Json<LogoutAllResponse>), AppError> {
    let revoked = AuthService::logout_all(&state, auth_user.user_id()).await?;

    Ok((
        jar.add(removal_cookie(&state.cookie_config)),
        Json(LogoutAllResponse {
            message: "Logged out of all sessions".to_string(),
            revoked,
        }),
    ))
}

/// Get the current user's profile
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User no longer exists", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
#[instrument(skip_all, fields(user_id = %auth_user.user_id()))]
pub async fn get_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<User>, AppError> {
    let user = AuthService::get_profile(&state, auth_user.user_id()).await?;
    Ok(Json(user))
}
