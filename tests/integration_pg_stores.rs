use chrono::{Duration, DurationRound, Utc};
use sqlx::PgPool;

use linkvault::linkvault_db::{
    LinkStore, PgLinkStore, PgRefreshTokenStore, PgUserStore, RefreshTokenStore, UserStore,
};
use linkvault::linkvault_models::{NewLink, NewUser, RefreshTokenEntry, TokenId, User, UserId};

async fn create_user(pool: &PgPool, email: &str) -> User {
    PgUserStore::new(pool.clone())
        .create(NewUser {
            username: "tester".to_string(),
            email: email.to_string(),
            password_hash: "$2b$12$notarealhashnotarealhashnotarealhashnotarealhash".to_string(),
        })
        .await
        .unwrap()
}

/// Postgres keeps microseconds; truncate so round-trips compare equal.
fn now() -> chrono::DateTime<Utc> {
    Utc::now().duration_trunc(Duration::seconds(1)).unwrap()
}

fn entry(user_id: UserId, expires_at: chrono::DateTime<Utc>) -> RefreshTokenEntry {
    RefreshTokenEntry {
        user_id,
        jti: TokenId::new(),
        expires_at,
        created_at: expires_at - Duration::days(30),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_user_email_is_unique(pool: PgPool) {
    create_user(&pool, "a@b.com").await;

    let err = PgUserStore::new(pool.clone())
        .create(NewUser {
            username: "other".to_string(),
            email: "a@b.com".to_string(),
            password_hash: "x".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.status.as_u16(), 409);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_user_lookup(pool: PgPool) {
    let user = create_user(&pool, "a@b.com").await;
    let store = PgUserStore::new(pool.clone());

    let credentials = store.find_by_email("a@b.com").await.unwrap().unwrap();
    assert_eq!(credentials.id, user.id);
    assert!(credentials.password_hash.starts_with("$2b$"));

    assert_eq!(store.find_by_id(user.id).await.unwrap(), Some(user));
    assert!(store.find_by_id(UserId::new()).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_allow_list_lifecycle(pool: PgPool) {
    let user = create_user(&pool, "a@b.com").await;
    let store = PgRefreshTokenStore::new(pool.clone());
    let now = now();

    let e = entry(user.id, now + Duration::days(1));
    store.record(&e).await.unwrap();

    assert_eq!(store.find(e.jti, user.id).await.unwrap(), Some(e.clone()));
    assert!(store.find(e.jti, UserId::new()).await.unwrap().is_none());
    assert!(store.is_allowed(e.jti, user.id, now).await.unwrap());
    assert!(!store.is_allowed(e.jti, user.id, e.expires_at).await.unwrap());

    assert!(store.revoke(e.jti).await.unwrap());
    assert!(!store.revoke(e.jti).await.unwrap());
    assert!(!store.is_allowed(e.jti, user.id, now).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_jti_is_conflict(pool: PgPool) {
    let user = create_user(&pool, "a@b.com").await;
    let store = PgRefreshTokenStore::new(pool.clone());
    let e = entry(user.id, now() + Duration::days(1));

    store.record(&e).await.unwrap();
    let err = store.record(&e).await.unwrap_err();
    assert_eq!(err.status.as_u16(), 409);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_prune_and_revoke_all(pool: PgPool) {
    let alice = create_user(&pool, "alice@b.com").await;
    let bob = create_user(&pool, "bob@b.com").await;
    let store = PgRefreshTokenStore::new(pool.clone());
    let now = now();

    store.record(&entry(alice.id, now - Duration::hours(1))).await.unwrap();
    store.record(&entry(alice.id, now)).await.unwrap();
    store.record(&entry(alice.id, now + Duration::hours(1))).await.unwrap();
    store.record(&entry(bob.id, now + Duration::hours(1))).await.unwrap();

    assert_eq!(store.prune_expired(now).await.unwrap(), 2);
    assert_eq!(store.list_for_user(alice.id).await.unwrap().len(), 1);

    assert_eq!(store.revoke_all_for_user(alice.id).await.unwrap(), 1);
    assert!(store.list_for_user(alice.id).await.unwrap().is_empty());
    assert_eq!(store.list_for_user(bob.id).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_links_roundtrip(pool: PgPool) {
    let user = create_user(&pool, "a@b.com").await;
    let store = PgLinkStore::new(pool.clone());

    let link = store
        .create(NewLink {
            user_id: user.id,
            url: "https://example.com/".to_string(),
            title: "example.com".to_string(),
            image_url: None,
            ai_summary: vec!["point".to_string()],
            ai_tags: vec!["tag".to_string()],
        })
        .await
        .unwrap();

    assert_eq!(link.ai_summary, vec!["point".to_string()]);
    assert_eq!(store.find(link.id).await.unwrap(), Some(link.clone()));
    assert_eq!(store.list_for_user(user.id).await.unwrap(), vec![link.clone()]);
    assert!(store.list_for_user(UserId::new()).await.unwrap().is_empty());

    assert!(store.delete(link.id).await.unwrap());
    assert!(store.find(link.id).await.unwrap().is_none());
}
