//! End-to-end credential flows: register, login, lockout, refresh, logout.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{test_app, token};
use notehub_entity::user::UserRole;

#[tokio::test]
async fn register_issues_a_working_session() {
    let app = test_app();
    let session = app.register("Ana", "ana@example.com", "Secr3t!").await;

    assert_eq!(session["user"]["email"], "ana@example.com");
    assert_eq!(session["user"]["role"], "editor");
    assert!(session["user"].get("password_hash").is_none());

    let (status, body) = app
        .send("GET", "/api/auth/validate", Some(token(&session)), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "ana@example.com");
}

#[tokio::test]
async fn register_rejects_mismatched_confirmation() {
    let app = test_app();
    let (status, _) = app
        .send(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "name": "Ana",
                "email": "ana@example.com",
                "password": "Secr3t!",
                "confirm_password": "Different1!",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn register_rejects_weak_password() {
    let app = test_app();
    let (status, body) = app
        .send(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "name": "Ana",
                "email": "ana@example.com",
                "password": "weak",
                "confirm_password": "weak",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
}

#[tokio::test]
async fn duplicate_email_conflicts() {
    let app = test_app();
    app.register("Ana", "ana@example.com", "Secr3t!").await;

    let (status, _) = app
        .send(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "name": "Other",
                "email": "ana@example.com",
                "password": "Secr3t!",
                "confirm_password": "Secr3t!",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn wrong_password_and_unknown_email_get_the_same_rejection() {
    let app = test_app();
    app.register("Ana", "ana@example.com", "Secr3t!").await;

    let (wrong_status, wrong_body) = app
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "ana@example.com", "password": "nope" })),
        )
        .await;
    let (unknown_status, unknown_body) = app
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "ghost@example.com", "password": "Secr3t!" })),
        )
        .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body["message"], unknown_body["message"]);
}

#[tokio::test]
async fn five_failures_lock_the_account_and_admin_unblocks_it() {
    let app = test_app();
    let session = app.register("Ana", "ana@example.com", "Secr3t!").await;
    let user_id = session["user"]["id"].as_str().unwrap().to_string();

    for _ in 0..5 {
        let (status, _) = app
            .send(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({ "email": "ana@example.com", "password": "wrong" })),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    // Blocked: the correct password no longer helps, and the response is
    // indistinguishable from a wrong password.
    let (status, body) = app
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "ana@example.com", "password": "Secr3t!" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "INVALID_CREDENTIALS");

    // Admin restores the account.
    app.seed_user("root@example.com", "Sup3rS3cret!", UserRole::Admin)
        .await;
    let admin = app.login("root@example.com", "Sup3rS3cret!").await;
    let (status, body) = app
        .send(
            "POST",
            &format!("/api/users/{user_id}/unblock"),
            Some(token(&admin)),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["status"], "active");

    app.login("ana@example.com", "Secr3t!").await;
}

#[tokio::test]
async fn unblock_is_admin_only() {
    let app = test_app();
    let session = app.register("Ana", "ana@example.com", "Secr3t!").await;
    let user_id = session["user"]["id"].as_str().unwrap().to_string();

    let (status, _) = app
        .send(
            "POST",
            &format!("/api/users/{user_id}/unblock"),
            Some(token(&session)),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn refresh_rotates_and_kills_the_previous_token() {
    let app = test_app();
    let session = app.register("Ana", "ana@example.com", "Secr3t!").await;
    let old_refresh = session["refresh_token"].as_str().unwrap().to_string();

    let (status, body) = app
        .send(
            "POST",
            "/api/auth/refresh-token",
            None,
            Some(json!({ "refresh_token": old_refresh })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let new_refresh = body["data"]["refresh_token"].as_str().unwrap().to_string();
    assert_ne!(new_refresh, old_refresh);

    // The new session token is live.
    let new_token = body["data"]["token"].as_str().unwrap().to_string();
    let (status, _) = app
        .send("GET", "/api/auth/validate", Some(&new_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    // The rotated-away refresh token is dead.
    let (status, _) = app
        .send(
            "POST",
            "/api/auth/refresh-token",
            None,
            Some(json!({ "refresh_token": old_refresh })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn logout_revokes_the_live_token_and_the_refresh_token() {
    let app = test_app();
    let session = app.register("Ana", "ana@example.com", "Secr3t!").await;
    let session_token = token(&session).to_string();
    let refresh = session["refresh_token"].as_str().unwrap().to_string();

    let (status, _) = app
        .send("POST", "/api/auth/logout", Some(&session_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    // The still-unexpired session token is rejected from now on.
    let (status, body) = app
        .send("GET", "/api/auth/validate", Some(&session_token), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "TOKEN_REVOKED");

    // Renewal is dead too.
    let (status, _) = app
        .send(
            "POST",
            "/api/auth/refresh-token",
            None,
            Some(json!({ "refresh_token": refresh })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_or_malformed_authorization_is_unauthorized() {
    let app = test_app();

    let (status, _) = app.send("GET", "/api/auth/validate", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .send("GET", "/api/auth/validate", Some("not-a-token"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_endpoint_is_public() {
    let app = test_app();
    let (status, body) = app.send("GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");
}
