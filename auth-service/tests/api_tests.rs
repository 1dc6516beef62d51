mod common;

use chrono::Duration;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/auth/register")
        .json(&json!({
            "first_name": "Alice",
            "last_name": "Doe",
            "email": "alice@example.com",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["first_name"], "Alice");
    assert_eq!(body["last_name"], "Doe");
    assert_eq!(body["email"], "alice@example.com");
    assert_eq!(body["active"], true);
    assert!(body["id"].is_string());
    assert!(body["created_at"].is_string());
    assert!(body["modified_at"].is_null());

    // The projection never carries the password in any form
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;

    let first = app.register("alice@example.com", "pass_word!").await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = app.register("alice@example.com", "other_password").await;
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = second.json().await.expect("Failed to parse response");
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("already registered"));
}

#[tokio::test]
async fn test_register_concurrent_duplicates_resolve_to_one_row() {
    let app = TestApp::spawn().await;

    let (first, second) = tokio::join!(
        app.register("race@example.com", "pass_word!"),
        app.register("race@example.com", "pass_word!"),
    );

    let mut statuses = [first.status(), second.status()];
    statuses.sort();

    // Exactly one success and one conflict, regardless of interleaving
    assert_eq!(statuses, [StatusCode::OK, StatusCode::CONFLICT]);
}

#[tokio::test]
async fn test_register_invalid_email() {
    let app = TestApp::spawn().await;

    let response = app.register("not-an-email", "pass_word!").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"].as_str().unwrap().to_lowercase().contains("email"));
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;

    app.register("alice@example.com", "pass_word!").await;

    let response = app.login("alice@example.com", "pass_word!").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(!body["access_token"].as_str().unwrap().is_empty());
    assert_eq!(body["token_type"], "bearer");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;

    app.register("real@example.com", "pass_word!").await;

    let unknown = app.login("nonexistent@example.com", "anything").await;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        unknown
            .headers()
            .get("www-authenticate")
            .and_then(|v| v.to_str().ok()),
        Some("Bearer")
    );
    let unknown_body = unknown.text().await.expect("Failed to read body");

    let wrong = app.login("real@example.com", "wrongpassword").await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    let wrong_body = wrong.text().await.expect("Failed to read body");

    // No email enumeration: identical status, header, and body
    assert_eq!(unknown_body, wrong_body);
}

#[tokio::test]
async fn test_me_success() {
    let app = TestApp::spawn().await;

    app.register("alice@example.com", "pass_word!").await;
    let token = app.login_token("alice@example.com", "pass_word!").await;

    let response = app
        .get_authenticated("/auth/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["email"], "alice@example.com");
    assert_eq!(body["active"], true);
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_me_without_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/auth/me")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response
            .headers()
            .get("www-authenticate")
            .and_then(|v| v.to_str().ok()),
        Some("Bearer")
    );
}

#[tokio::test]
async fn test_me_with_garbage_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get_authenticated("/auth/me", "not.a.token")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Could not validate credentials");
}

#[tokio::test]
async fn test_me_with_expired_token() {
    // Tokens leave this app already expired
    let app = TestApp::spawn_with_token_lifetime(Duration::seconds(-10)).await;

    app.register("alice@example.com", "pass_word!").await;
    let token = app.login_token("alice@example.com", "pass_word!").await;

    let response = app
        .get_authenticated("/auth/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_after_user_deleted() {
    let app = TestApp::spawn().await;

    app.register("alice@example.com", "pass_word!").await;
    let token = app.login_token("alice@example.com", "pass_word!").await;

    // Valid token, but its subject no longer resolves to a user
    app.store.remove("alice@example.com");

    let response = app
        .get_authenticated("/auth/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Could not validate credentials");
}

#[tokio::test]
async fn test_register_login_me_round_trip() {
    let app = TestApp::spawn().await;

    let register_response = app
        .post("/auth/register")
        .json(&json!({
            "first_name": "A",
            "last_name": "B",
            "email": "a@b.com",
            "password": "hunter2"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(register_response.status(), StatusCode::OK);
    let registered: serde_json::Value = register_response
        .json()
        .await
        .expect("Failed to parse response");

    let token = app.login_token("a@b.com", "hunter2").await;

    let me_response = app
        .get_authenticated("/auth/me", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(me_response.status(), StatusCode::OK);

    let me: serde_json::Value = me_response.json().await.expect("Failed to parse response");
    assert_eq!(me, registered);
}
