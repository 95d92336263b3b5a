use std::sync::Arc;

use chrono::Duration;

use linkvault::linkvault_auth::{Clock, FixedClock, verify_access_token};
use linkvault::modules::auth::model::{LoginRequest, RefreshFailure, RegisterRequestDto};
use linkvault::modules::auth::service::{AuthService, IssuedSession};
use linkvault::state::AppState;
use linkvault::testing::{TEST_EPOCH, test_state};

async fn setup() -> (AppState, Arc<FixedClock>, IssuedSession) {
    let clock = Arc::new(FixedClock::at_timestamp(TEST_EPOCH));
    let state = test_state().with_clock(clock.clone());

    AuthService::register_user(
        &state,
        RegisterRequestDto {
            username: "alice".to_string(),
            email: "Alice@Example.com".to_string(),
            password: "longenough1".to_string(),
        },
    )
    .await
    .unwrap();

    let session = AuthService::login_user(
        &state,
        LoginRequest {
            email: "alice@example.com".to_string(),
            password: "longenough1".to_string(),
        },
    )
    .await
    .unwrap();

    (state, clock, session)
}

#[tokio::test]
async fn test_refresh_issues_access_token_for_same_user() {
    let (state, clock, session) = setup().await;
    clock.advance(Duration::minutes(20));

    let access = AuthService::refresh_access_token(&state, Some(&session.refresh_token))
        .await
        .unwrap()
        .unwrap();

    let claims = verify_access_token(&access, &state.jwt_config, clock.now()).unwrap();
    assert_eq!(claims.sub, session.user.id.to_string());
    assert_eq!(claims.email, "alice@example.com");
}

#[tokio::test]
async fn test_refresh_missing_token() {
    let (state, _clock, _session) = setup().await;

    let outcome = AuthService::refresh_access_token(&state, None).await.unwrap();
    assert_eq!(outcome, Err(RefreshFailure::Missing));
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let (state, _clock, session) = setup().await;

    let outcome = AuthService::refresh_access_token(&state, Some(&session.access_token))
        .await
        .unwrap();
    assert_eq!(outcome, Err(RefreshFailure::Invalid));
}

#[tokio::test]
async fn test_refresh_after_logout_is_revoked() {
    let (state, _clock, session) = setup().await;

    assert!(AuthService::logout(&state, Some(&session.refresh_token)).await);
    assert!(!AuthService::logout(&state, Some(&session.refresh_token)).await);

    let outcome = AuthService::refresh_access_token(&state, Some(&session.refresh_token))
        .await
        .unwrap();
    assert_eq!(outcome, Err(RefreshFailure::Revoked));
}

#[tokio::test]
async fn test_refresh_at_expiry_removes_entry() {
    let (state, clock, session) = setup().await;
    clock.advance(Duration::days(30));

    let outcome = AuthService::refresh_access_token(&state, Some(&session.refresh_token))
        .await
        .unwrap();
    assert_eq!(outcome, Err(RefreshFailure::Expired));

    // The expired entry was dropped, so a retry no longer finds it
    let outcome = AuthService::refresh_access_token(&state, Some(&session.refresh_token))
        .await
        .unwrap();
    assert_eq!(outcome, Err(RefreshFailure::Revoked));
}

#[tokio::test]
async fn test_logout_all_counts_sessions() {
    let (state, _clock, session) = setup().await;
    let second = AuthService::login_user(
        &state,
        LoginRequest {
            email: "alice@example.com".to_string(),
            password: "longenough1".to_string(),
        },
    )
    .await
    .unwrap();

    assert_eq!(AuthService::logout_all(&state, session.user.id).await.unwrap(), 2);

    for token in [&session.refresh_token, &second.refresh_token] {
        let outcome = AuthService::refresh_access_token(&state, Some(token))
            .await
            .unwrap();
        assert_eq!(outcome, Err(RefreshFailure::Revoked));
    }
}

#[tokio::test]
async fn test_login_wrong_password() {
    let (state, _clock, _session) = setup().await;

    let err = AuthService::login_user(
        &state,
        LoginRequest {
            email: "alice@example.com".to_string(),
            password: "wrongpassword".to_string(),
        },
    )
    .await
    .err()
    .unwrap();
    assert_eq!(err.status.as_u16(), 401);
}
