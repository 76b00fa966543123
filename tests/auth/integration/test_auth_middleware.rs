use axum::http::{Method, StatusCode};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use std::time::{SystemTime, UNIX_EPOCH};

use rollcall::auth::jwt::Claims;

use crate::support::{login, read_json, send_request, setup_test_app, TEST_JWT_SECRET};

#[tokio::test]
async fn missing_and_malformed_bearer_tokens_are_rejected() {
    let app = setup_test_app("mw_missing").await;

    let response = send_request(&app, Method::GET, "/users/me", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send_request(&app, Method::GET, "/users/me", Some("not-a-valid-token"), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn tampered_token_is_rejected() {
    let app = setup_test_app("mw_tampered").await;
    let token = login(&app, "teacher@school.com", "teacher123").await;

    // Flip a character in the payload segment.
    let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
    assert_eq!(parts.len(), 3);
    let payload = parts[1].clone();
    let flipped = if payload.starts_with('A') { "B" } else { "A" };
    parts[1] = format!("{}{}", flipped, &payload[1..]);
    let tampered = parts.join(".");

    let response = send_request(&app, Method::GET, "/users/me", Some(&tampered), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let app = setup_test_app("mw_expired").await;

    let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs() as usize;
    let claims = Claims { sub: "teacher@school.com".to_string(), exp: now - 120, iat: now - 180 };
    let expired =
        encode(&Header::default(), &claims, &EncodingKey::from_secret(TEST_JWT_SECRET)).unwrap();

    let response = send_request(&app, Method::GET, "/users/me", Some(&expired), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_signed_with_another_secret_is_rejected() {
    let app = setup_test_app("mw_wrong_secret").await;

    let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs() as usize;
    let claims = Claims { sub: "teacher@school.com".to_string(), exp: now + 600, iat: now };
    let forged = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"a-completely-different-signing-secret"),
    )
    .unwrap();

    let response = send_request(&app, Method::GET, "/users/me", Some(&forged), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn validation_failures_are_indistinguishable() {
    let app = setup_test_app("mw_oracle").await;

    let garbage = send_request(&app, Method::GET, "/users/me", Some("garbage"), None).await;
    assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);
    let garbage: Value = read_json(garbage).await;

    let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs() as usize;
    let claims = Claims { sub: "teacher@school.com".to_string(), exp: now - 120, iat: now - 180 };
    let expired =
        encode(&Header::default(), &claims, &EncodingKey::from_secret(TEST_JWT_SECRET)).unwrap();
    let expired = send_request(&app, Method::GET, "/users/me", Some(&expired), None).await;
    assert_eq!(expired.status(), StatusCode::UNAUTHORIZED);
    let expired: Value = read_json(expired).await;

    assert_eq!(garbage, expired);
}

#[tokio::test]
async fn deleted_user_token_stops_resolving() {
    let app = setup_test_app("mw_deleted_user").await;
    let admin_token = login(&app, "principal@school.com", "principal123").await;

    // Create a user and log them in.
    let created = send_request(
        &app,
        Method::POST,
        "/users",
        Some(&admin_token),
        Some(json!({
            "email": "shortlived@school.com",
            "password": "shortlived-pass",
            "name": "Short Lived"
        })),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let created: Value = read_json(created).await;
    let user_id = created["id"].as_str().unwrap().to_string();

    let user_token = login(&app, "shortlived@school.com", "shortlived-pass").await;

    let me = send_request(&app, Method::GET, "/users/me", Some(&user_token), None).await;
    assert_eq!(me.status(), StatusCode::OK);

    // Delete the backing record; the still-signed, unexpired token must stop
    // working on the next request.
    let deleted = send_request(
        &app,
        Method::DELETE,
        &format!("/users/{}", user_id),
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let me = send_request(&app, Method::GET, "/users/me", Some(&user_token), None).await;
    assert_eq!(me.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_and_docs_need_no_authentication() {
    let app = setup_test_app("mw_public").await;

    let response = send_request(&app, Method::GET, "/health", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send_request(&app, Method::GET, "/api-docs/openapi.json", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
}
