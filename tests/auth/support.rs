#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, Response, StatusCode},
    Router,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tower::ServiceExt;

use rollcall::{
    api::{build_router, ApiState},
    auth::{TokenService, UserService},
    storage::DbPool,
};

use crate::common::test_db::TestDatabase;

/// Signing secret shared by the app under test and forged-token helpers.
pub const TEST_JWT_SECRET: &[u8] = b"rollcall-integration-test-secret-0123456789";

pub struct TestApp {
    pub pool: DbPool,
    pub token_service: Arc<TokenService>,
    _db: TestDatabase,
}

impl TestApp {
    pub fn router(&self) -> Router {
        build_router(ApiState {
            pool: self.pool.clone(),
            token_service: self.token_service.clone(),
        })
    }
}

/// Build an app over a fresh database with the default accounts seeded.
pub async fn setup_test_app(prefix: &str) -> TestApp {
    let db = TestDatabase::new(prefix).await;
    let pool = db.pool.clone();

    UserService::with_sqlx(pool.clone())
        .ensure_default_users()
        .await
        .expect("seed default users");

    let token_service = Arc::new(TokenService::new(TEST_JWT_SECRET, Duration::from_secs(1800)));

    TestApp { pool, token_service, _db: db }
}

pub async fn send_request(
    app: &TestApp,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }

    let request = if let Some(json) = body {
        let bytes = serde_json::to_vec(&json).expect("serialize body");
        builder
            .header("content-type", "application/json")
            .body(Body::from(bytes))
            .expect("build request")
    } else {
        builder.body(Body::empty()).expect("build request")
    };

    app.router().oneshot(request).await.expect("request")
}

pub async fn read_json<T: DeserializeOwned>(response: Response<Body>) -> T {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("read body");
    serde_json::from_slice(&bytes).expect("parse json")
}

/// Log in and return the bearer token.
pub async fn login(app: &TestApp, email: &str, password: &str) -> String {
    let response = send_request(
        app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = read_json(response).await;
    body["access_token"].as_str().expect("access_token in login response").to_string()
}
