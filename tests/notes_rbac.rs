//! Role- and ownership-based note access through the HTTP surface.

mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

use common::{test_app, token};
use notehub_entity::user::UserRole;

async fn create_note(app: &common::TestApp, token: &str, title: &str) -> Value {
    let (status, body) = app
        .send(
            "POST",
            "/api/notes",
            Some(token),
            Some(json!({ "title": title, "content": "body" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["data"].clone()
}

#[tokio::test]
async fn editor_manages_their_own_notes() {
    let app = test_app();
    let session = app.register("Ana", "ana@example.com", "Secr3t!").await;
    let t = token(&session);

    let note = create_note(&app, t, "groceries").await;
    let id = note["id"].as_str().unwrap();
    assert_eq!(note["owner_id"], session["user"]["id"]);

    let (status, body) = app
        .send("GET", &format!("/api/notes/{id}"), Some(t), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "groceries");

    let (status, body) = app
        .send(
            "PUT",
            &format!("/api/notes/{id}"),
            Some(t),
            Some(json!({ "title": "errands" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "errands");
    // Absent fields are left unchanged.
    assert_eq!(body["data"]["content"], "body");
}

#[tokio::test]
async fn editor_cannot_delete_even_their_own_note() {
    let app = test_app();
    let session = app.register("Ana", "ana@example.com", "Secr3t!").await;
    let note = create_note(&app, token(&session), "mine").await;
    let id = note["id"].as_str().unwrap();

    let (status, _) = app
        .send("DELETE", &format!("/api/notes/{id}"), Some(token(&session)), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn foreign_notes_are_invisible_to_editors() {
    let app = test_app();
    let ana = app.register("Ana", "ana@example.com", "Secr3t!").await;
    let bob = app.register("Bob", "bob@example.com", "Secr3t!").await;

    let note = create_note(&app, token(&ana), "private").await;
    let id = note["id"].as_str().unwrap();

    let (status, _) = app
        .send("GET", &format!("/api/notes/{id}"), Some(token(&bob)), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send(
            "PUT",
            &format!("/api/notes/{id}"),
            Some(token(&bob)),
            Some(json!({ "title": "hijacked" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn reader_cannot_create_notes() {
    let app = test_app();
    app.seed_user("reader@example.com", "Secr3t!", UserRole::Reader)
        .await;
    let session = app.login("reader@example.com", "Secr3t!").await;

    let (status, _) = app
        .send(
            "POST",
            "/api/notes",
            Some(token(&session)),
            Some(json!({ "title": "nope", "content": "" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_sees_and_deletes_everything() {
    let app = test_app();
    let ana = app.register("Ana", "ana@example.com", "Secr3t!").await;
    let bob = app.register("Bob", "bob@example.com", "Secr3t!").await;
    create_note(&app, token(&ana), "ana-note").await;
    let bob_note = create_note(&app, token(&bob), "bob-note").await;

    app.seed_user("root@example.com", "Sup3rS3cret!", UserRole::Admin)
        .await;
    let admin = app.login("root@example.com", "Sup3rS3cret!").await;

    // Admin listing spans all owners.
    let (status, body) = app.send("GET", "/api/notes", Some(token(&admin)), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    // Editors list only their own.
    let (status, body) = app.send("GET", "/api/notes", Some(token(&ana)), None).await;
    assert_eq!(status, StatusCode::OK);
    let ana_notes = body["data"].as_array().unwrap();
    assert_eq!(ana_notes.len(), 1);
    assert_eq!(ana_notes[0]["title"], "ana-note");

    // Admin deletes a foreign note.
    let id = bob_note["id"].as_str().unwrap();
    let (status, _) = app
        .send("DELETE", &format!("/api/notes/{id}"), Some(token(&admin)), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .send("GET", &format!("/api/notes/{id}"), Some(token(&admin)), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_note_is_not_found() {
    let app = test_app();
    let session = app.register("Ana", "ana@example.com", "Secr3t!").await;

    let (status, _) = app
        .send(
            "GET",
            "/api/notes/00000000-0000-0000-0000-000000000001",
            Some(token(&session)),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn notes_require_authentication() {
    let app = test_app();
    let (status, _) = app.send("GET", "/api/notes", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
