mod common;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

fn expires_at(body: &Value) -> DateTime<Utc> {
    body["data"]["expires_at"]
        .as_str()
        .expect("Missing expires_at")
        .parse()
        .expect("Invalid expires_at")
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;
    app.create_user("demo@site.test", "demo", "Secret123").await;

    let response = app.login("demo@site.test", "Secret123", false).await;

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 200);
    assert_eq!(body["data"]["token_type"], "bearer");
    assert!(body["data"]["access_token"].is_string());
    assert_eq!(body["data"]["user"]["email"], "demo@site.test");
    assert_eq!(body["data"]["user"]["username"], "demo");
    assert!(body["data"]["user"]["password_hash"].is_null());

    let remaining = expires_at(&body) - Utc::now();
    assert!(remaining <= Duration::minutes(30));
    assert!(remaining > Duration::minutes(29));
}

#[tokio::test]
async fn test_login_records_last_login() {
    let app = TestApp::spawn().await;
    app.create_user("demo@site.test", "demo", "Secret123").await;
    assert!(app.repository.find("demo@site.test").unwrap().last_login.is_none());

    app.token_for("demo@site.test", "Secret123").await;

    assert!(app.repository.find("demo@site.test").unwrap().last_login.is_some());
}

#[tokio::test]
async fn test_login_remember_me_extends_expiry() {
    let app = TestApp::spawn().await;
    app.create_user("demo@site.test", "demo", "Secret123").await;

    let response = app.login("demo@site.test", "Secret123", true).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(expires_at(&body) - Utc::now() > Duration::days(29));
}

#[tokio::test]
async fn test_login_unknown_email_and_wrong_password_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.create_user("demo@site.test", "demo", "Secret123").await;

    let unknown = app.login("nobody@site.test", "x", false).await;
    let wrong = app.login("demo@site.test", "Secret124", false).await;

    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.headers()["www-authenticate"], "Bearer");
    assert_eq!(wrong.headers()["www-authenticate"], "Bearer");

    let unknown: Value = unknown.json().await.expect("Failed to parse response");
    let wrong: Value = wrong.json().await.expect("Failed to parse response");
    assert_eq!(unknown, wrong);
    assert_eq!(unknown["data"]["message"], "Invalid email or password");
}

#[tokio::test]
async fn test_login_deactivated_account() {
    let app = TestApp::spawn().await;
    app.create_user("demo@site.test", "demo", "Secret123").await;
    app.repository.set_active("demo@site.test", false);

    let response = app.login("demo@site.test", "Secret123", false).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Account is deactivated");
}

#[tokio::test]
async fn test_login_deactivated_account_with_wrong_password() {
    let app = TestApp::spawn().await;
    app.create_user("demo@site.test", "demo", "Secret123").await;
    app.repository.set_active("demo@site.test", false);

    let response = app.login("demo@site.test", "wrong", false).await;

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Invalid email or password");
}

#[tokio::test]
async fn test_login_long_password_is_truncated_consistently() {
    let app = TestApp::spawn().await;
    let prefix = "p".repeat(72);
    app.create_user("long@site.test", "long", &format!("{prefix}AAAAAAAA"))
        .await;

    let response = app
        .login("long@site.test", &format!("{prefix}BBBBBBBB"), false)
        .await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_missing_fields() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/auth/login")
        .json(&json!({ "email": "demo@site.test" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_auth_me_resolves_token() {
    let app = TestApp::spawn().await;
    let token = app.demo_token().await;

    let response = app
        .get_authenticated("/auth/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["email"], "demo@site.test");
    assert_eq!(body["data"]["is_active"], true);
}

#[tokio::test]
async fn test_auth_me_without_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/auth/me")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers()["www-authenticate"], "Bearer");
}

#[tokio::test]
async fn test_auth_me_rejects_bad_tokens() {
    let app = TestApp::spawn().await;
    let token = app.demo_token().await;

    let expired = app
        .token_service
        .issue("demo@site.test", Duration::seconds(-5))
        .unwrap()
        .access_token;
    let unknown_subject = app
        .token_service
        .issue("ghost@site.test", Duration::minutes(5))
        .unwrap()
        .access_token;
    let foreign = auth::TokenService::new(b"another-secret-entirely", auth::Algorithm::HS256)
        .unwrap()
        .issue("demo@site.test", Duration::minutes(5))
        .unwrap()
        .access_token;
    let truncated = token[..token.len() - 4].to_string();

    for bad in [expired, unknown_subject, foreign, truncated, "garbage".to_string()] {
        let response = app
            .get_authenticated("/auth/me", &bad)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["data"]["message"], "Could not validate credentials");
    }
}

#[tokio::test]
async fn test_token_stops_working_after_deactivation() {
    let app = TestApp::spawn().await;
    let token = app.demo_token().await;

    app.repository.set_active("demo@site.test", false);

    let response = app
        .get_authenticated("/auth/me", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_issues_new_token() {
    let app = TestApp::spawn().await;
    let token = app.demo_token().await;

    let response = app
        .post_authenticated("/auth/refresh", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["token_type"], "bearer");
    assert!(body["data"]["user"].is_null());

    let refreshed = body["data"]["access_token"].as_str().unwrap();
    let me = app
        .get_authenticated("/auth/me", refreshed)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(me.status(), StatusCode::OK);

    // No revocation: the original token stays valid until it expires.
    let original = app
        .get_authenticated("/auth/me", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(original.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_rejects_invalid_token() {
    let app = TestApp::spawn().await;

    let response = app
        .post_authenticated("/auth/refresh", "not.a.token")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Could not validate credentials");
}

#[tokio::test]
async fn test_refresh_rejects_deactivated_account() {
    let app = TestApp::spawn().await;
    let token = app.demo_token().await;
    app.repository.set_active("demo@site.test", false);

    let response = app
        .post_authenticated("/auth/refresh", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_is_stateless() {
    let app = TestApp::spawn().await;
    let token = app.demo_token().await;

    let response = app
        .post("/auth/logout")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Successfully logged out");

    let me = app
        .get_authenticated("/auth/me", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(me.status(), StatusCode::OK);
}
