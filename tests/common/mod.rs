#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

pub const PASSWORD: &str = "longenough1";

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// Value of the `refreshToken` cookie set by this response, if any.
    pub fn refresh_cookie(&self) -> Option<String> {
        self.set_cookie_header().and_then(|raw| {
            raw.split(';')
                .next()
                .and_then(|pair| pair.trim().strip_prefix("refreshToken="))
                .map(str::to_string)
        })
    }

    pub fn set_cookie_header(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with("refreshToken="))
            .map(str::to_string)
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    TestResponse {
        status,
        headers,
        body,
    }
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

pub fn bearer_request(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

pub fn bearer_json_request(method: &str, uri: &str, token: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

pub fn cookie_request(method: &str, uri: &str, refresh_token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = refresh_token {
        builder = builder.header(header::COOKIE, format!("refreshToken={}", token));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

pub async fn register(app: &Router, email: &str, password: &str) -> TestResponse {
    send(
        app,
        json_request(
            "POST",
            "/api/auth/register",
            json!({ "username": "tester", "email": email, "password": password }),
        ),
    )
    .await
}

pub async fn login(app: &Router, email: &str, password: &str) -> TestResponse {
    send(
        app,
        json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": email, "password": password }),
        ),
    )
    .await
}

/// A session for a newly registered user
pub struct Session {
    pub email: String,
    pub access_token: String,
    pub refresh_token: String,
}

pub async fn register_and_login(app: &Router, email: &str) -> Session {
    let registered = register(app, email, PASSWORD).await;
    assert_eq!(registered.status, StatusCode::CREATED);

    let logged_in = login(app, email, PASSWORD).await;
    assert_eq!(logged_in.status, StatusCode::OK);

    Session {
        email: email.to_string(),
        access_token: logged_in.body["accessToken"].as_str().unwrap().to_string(),
        refresh_token: logged_in.refresh_cookie().unwrap(),
    }
}
