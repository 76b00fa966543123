use axum::http::{Method, StatusCode};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::support::{login, read_json, send_request, setup_test_app, TestApp};

async fn create_user(app: &TestApp, token: &str, email: &str, name: &str, role: &str) -> Value {
    let response = send_request(
        app,
        Method::POST,
        "/users",
        Some(token),
        Some(json!({
            "email": email,
            "password": "a-valid-password",
            "name": name,
            "role": role
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    read_json(response).await
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let app = setup_test_app("users_duplicate").await;
    let token = login(&app, "principal@school.com", "principal123").await;

    let response = send_request(
        &app,
        Method::POST,
        "/users",
        Some(&token),
        Some(json!({
            "email": "Teacher@school.com",
            "password": "another-password",
            "name": "Duplicate Teacher"
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn invalid_payloads_are_rejected() {
    let app = setup_test_app("users_invalid_payload").await;
    let token = login(&app, "principal@school.com", "principal123").await;

    // Bad email and short password fail request validation.
    let response = send_request(
        &app,
        Method::POST,
        "/users",
        Some(&token),
        Some(json!({
            "email": "not-an-email",
            "password": "short",
            "name": "Bad"
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // An unknown role never makes it past deserialization.
    let response = send_request(
        &app,
        Method::POST,
        "/users",
        Some(&token),
        Some(json!({
            "email": "janitor@school.com",
            "password": "a-valid-password",
            "name": "Janitor",
            "role": "janitor"
        })),
    )
    .await;
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn malformed_and_unknown_ids() {
    let app = setup_test_app("users_ids").await;
    let token = login(&app, "principal@school.com", "principal123").await;

    let response =
        send_request(&app, Method::GET, "/users/not-a-uuid", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let missing = Uuid::new_v4();
    let response =
        send_request(&app, Method::GET, &format!("/users/{}", missing), Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn partial_update_leaves_other_fields_alone() {
    let app = setup_test_app("users_partial_update").await;
    let token = login(&app, "principal@school.com", "principal123").await;

    let created = create_user(&app, &token, "renameme@school.com", "Before", "student").await;
    let id = created["id"].as_str().unwrap();

    let response = send_request(
        &app,
        Method::PUT,
        &format!("/users/{}", id),
        Some(&token),
        Some(json!({ "name": "After" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let updated: Value = read_json(response).await;
    assert_eq!(updated["name"], "After");
    assert_eq!(updated["email"], "renameme@school.com");
    assert_eq!(updated["role"], "student");
}

#[tokio::test]
async fn password_update_rotates_credentials() {
    let app = setup_test_app("users_password_update").await;
    let token = login(&app, "principal@school.com", "principal123").await;

    let created = create_user(&app, &token, "rotate@school.com", "Rotate", "student").await;
    let id = created["id"].as_str().unwrap();

    let response = send_request(
        &app,
        Method::PUT,
        &format!("/users/{}", id),
        Some(&token),
        Some(json!({ "password": "a-brand-new-password" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Old password stops working, new one logs in.
    let old = send_request(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "email": "rotate@school.com", "password": "a-valid-password" })),
    )
    .await;
    assert_eq!(old.status(), StatusCode::UNAUTHORIZED);

    login(&app, "rotate@school.com", "a-brand-new-password").await;
}

#[tokio::test]
async fn update_to_taken_email_is_a_conflict() {
    let app = setup_test_app("users_update_conflict").await;
    let token = login(&app, "principal@school.com", "principal123").await;

    let created = create_user(&app, &token, "mover@school.com", "Mover", "student").await;
    let id = created["id"].as_str().unwrap();

    let response = send_request(
        &app,
        Method::PUT,
        &format!("/users/{}", id),
        Some(&token),
        Some(json!({ "email": "teacher@school.com" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn role_update_changes_the_gate() {
    let app = setup_test_app("users_promote").await;
    let token = login(&app, "principal@school.com", "principal123").await;

    let created = create_user(&app, &token, "promoted@school.com", "Promoted", "teacher").await;
    let id = created["id"].as_str().unwrap();

    // Before promotion the account cannot list users.
    let member_token = login(&app, "promoted@school.com", "a-valid-password").await;
    let response = send_request(&app, Method::GET, "/users", Some(&member_token), None).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = send_request(
        &app,
        Method::PUT,
        &format!("/users/{}", id),
        Some(&token),
        Some(json!({ "role": "principal" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // The role gate re-checks the stored record on every request, so the
    // promotion applies to the existing token too.
    let response = send_request(&app, Method::GET, "/users", Some(&member_token), None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn delete_is_immediate_and_unconditional() {
    let app = setup_test_app("users_delete").await;
    let token = login(&app, "principal@school.com", "principal123").await;

    let created = create_user(&app, &token, "gone@school.com", "Gone", "student").await;
    let id = created["id"].as_str().unwrap();

    let response =
        send_request(&app, Method::DELETE, &format!("/users/{}", id), Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response =
        send_request(&app, Method::GET, &format!("/users/{}", id), Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response =
        send_request(&app, Method::DELETE, &format!("/users/{}", id), Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn listing_supports_pagination_search_and_role_filter() {
    let app = setup_test_app("users_listing").await;
    let token = login(&app, "principal@school.com", "principal123").await;

    create_user(&app, &token, "alice@school.com", "Alice Albright", "student").await;
    create_user(&app, &token, "bob@school.com", "Bob Babbage", "teacher").await;

    // 3 seeded + 2 created
    let response = send_request(&app, Method::GET, "/users?limit=2", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let page: Value = read_json(response).await;
    assert_eq!(page["items"].as_array().unwrap().len(), 2);
    assert_eq!(page["total"], 5);
    assert_eq!(page["limit"], 2);

    let response =
        send_request(&app, Method::GET, "/users?limit=2&offset=4", Some(&token), None).await;
    let page: Value = read_json(response).await;
    assert_eq!(page["items"].as_array().unwrap().len(), 1);
    assert_eq!(page["total"], 5);

    // Search matches name and email, case-insensitively.
    let response =
        send_request(&app, Method::GET, "/users?search=albright", Some(&token), None).await;
    let page: Value = read_json(response).await;
    assert_eq!(page["total"], 1);
    assert_eq!(page["items"][0]["email"], "alice@school.com");

    let response = send_request(&app, Method::GET, "/users?search=bob@", Some(&token), None).await;
    let page: Value = read_json(response).await;
    assert_eq!(page["total"], 1);

    // Role filter.
    let response = send_request(&app, Method::GET, "/users?role=student", Some(&token), None).await;
    let page: Value = read_json(response).await;
    assert_eq!(page["total"], 2);
    for item in page["items"].as_array().unwrap() {
        assert_eq!(item["role"], "student");
    }

    // Filters compose.
    let response = send_request(
        &app,
        Method::GET,
        "/users?search=school.com&role=teacher",
        Some(&token),
        None,
    )
    .await;
    let page: Value = read_json(response).await;
    assert_eq!(page["total"], 2);

    // An unknown role in the query is a client error.
    let response = send_request(&app, Method::GET, "/users?role=janitor", Some(&token), None).await;
    assert!(response.status().is_client_error());
}
