use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use warbler_api::{AppStateInner, router};
use warbler_db::Database;

const SECRET: &str = "route-test-secret";

fn app() -> Router {
    let db = Database::open_in_memory().unwrap();
    router(Arc::new(AppStateInner {
        db,
        jwt_secret: SECRET.to_string(),
    }))
}

async fn send(app: &Router, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Returns (user id, token).
async fn signup(app: &Router, username: &str) -> (i64, String) {
    let (status, body) = send(
        app,
        "POST",
        "/auth/signup",
        None,
        Some(json!({
            "username": username,
            "email": format!("{username}@test.com"),
            "password": "password",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    (
        body["user"]["id"].as_i64().unwrap(),
        body["token"].as_str().unwrap().to_string(),
    )
}

#[tokio::test]
async fn signup_then_login() {
    let app = app();
    let (id, _) = signup(&app, "testuser1").await;

    let (status, body) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "username": "testuser1", "password": "password" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"].as_i64(), Some(id));
    assert!(body["user"].get("password").is_none());

    let (status, _) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "username": "testuser1", "password": "nope" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn duplicate_signup_conflicts() {
    let app = app();
    signup(&app, "testuser1").await;

    let (status, _) = send(
        &app,
        "POST",
        "/auth/signup",
        None,
        Some(json!({
            "username": "testuser1",
            "email": "fresh@test.com",
            "password": "password",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn signup_validates_input() {
    let app = app();
    let (status, _) = send(
        &app,
        "POST",
        "/auth/signup",
        None,
        Some(json!({ "username": "short", "email": "short@test.com", "password": "abc" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn protected_routes_need_token() {
    let app = app();
    let (status, _) = send(&app, "GET", "/timeline", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/timeline", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn follow_updates_both_sides() {
    let app = app();
    let (id1, token1) = signup(&app, "testuser1").await;
    let (id2, _) = signup(&app, "testuser2").await;

    let (status, _) = send(&app, "POST", &format!("/users/{id2}/follow"), Some(&token1), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "POST", &format!("/users/{id2}/follow"), Some(&token1), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&app, "POST", &format!("/users/{id1}/follow"), Some(&token1), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, profile1) = send(&app, "GET", &format!("/users/{id1}"), Some(&token1), None).await;
    assert_eq!(profile1["following"], 1);
    assert_eq!(profile1["followers"], 0);

    let (_, profile2) = send(&app, "GET", &format!("/users/{id2}"), Some(&token1), None).await;
    assert_eq!(profile2["following"], 0);
    assert_eq!(profile2["followers"], 1);

    let (_, followers) = send(&app, "GET", &format!("/users/{id2}/followers"), Some(&token1), None).await;
    assert_eq!(followers[0]["username"], "testuser1");

    let (status, _) = send(&app, "DELETE", &format!("/users/{id2}/follow"), Some(&token1), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "DELETE", &format!("/users/{id2}/follow"), Some(&token1), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn messages_likes_and_timeline() {
    let app = app();
    let (_, token1) = signup(&app, "testuser1").await;
    let (id2, token2) = signup(&app, "testuser2").await;

    let (status, msg) = send(&app, "POST", "/messages", Some(&token2), Some(json!({ "text": "first warble" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    let msg_id = msg["id"].as_i64().unwrap();

    let (status, _) = send(&app, "POST", "/messages", Some(&token2), Some(json!({ "text": "x".repeat(141) }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Not following yet
    let (_, feed) = send(&app, "GET", "/timeline", Some(&token1), None).await;
    assert_eq!(feed.as_array().unwrap().len(), 0);

    send(&app, "POST", &format!("/users/{id2}/follow"), Some(&token1), None).await;
    let (_, feed) = send(&app, "GET", "/timeline", Some(&token1), None).await;
    assert_eq!(feed[0]["text"], "first warble");

    let (status, _) = send(&app, "POST", &format!("/messages/{msg_id}/like"), Some(&token2), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, like) = send(&app, "POST", &format!("/messages/{msg_id}/like"), Some(&token1), None).await;
    assert_eq!(like["liked"], true);
    let (_, shown) = send(&app, "GET", &format!("/messages/{msg_id}"), Some(&token1), None).await;
    assert_eq!(shown["likes"], 1);

    let (status, _) = send(&app, "DELETE", &format!("/messages/{msg_id}"), Some(&token1), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = send(&app, "DELETE", &format!("/messages/{msg_id}"), Some(&token2), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "GET", &format!("/messages/{msg_id}"), Some(&token1), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn profile_edit_requires_password() {
    let app = app();
    let (id, token) = signup(&app, "testuser1").await;

    let (status, _) = send(
        &app,
        "PATCH",
        "/users/me",
        Some(&token),
        Some(json!({ "password": "wrong", "bio": "hi" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, user) = send(
        &app,
        "PATCH",
        "/users/me",
        Some(&token),
        Some(json!({ "password": "password", "bio": "hi", "location": "Nowhere" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["id"].as_i64(), Some(id));
    assert_eq!(user["bio"], "hi");

    let (status, _) = send(&app, "DELETE", "/users/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "GET", &format!("/users/{id}"), Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn padded_username_is_the_same_account() {
    let app = app();
    let (_, token) = signup(&app, "testuser1").await;

    let (status, _) = send(
        &app,
        "POST",
        "/auth/signup",
        None,
        Some(json!({
            "username": " testuser1 ",
            "email": "other@test.com",
            "password": "password",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(
        &app,
        "POST",
        "/auth/signup",
        None,
        Some(json!({
            "username": "  testuser2\t",
            "email": " test2@test.com ",
            "password": "password",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["username"], "testuser2");
    assert_eq!(body["user"]["email"], "test2@test.com");

    let (_, found) = send(&app, "GET", "/users?q=TEST", Some(&token), None).await;
    let names: Vec<_> = found.as_array().unwrap().iter().map(|u| u["username"].clone()).collect();
    assert_eq!(names, vec![json!("testuser1"), json!("testuser2")]);

    let (status, _) = send(
        &app,
        "PATCH",
        "/users/me",
        Some(&token),
        Some(json!({ "password": "password", "username": " testuser2 " })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "username": " testuser2 ", "password": "password" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn search_and_relationship_lists() {
    let app = app();
    let (id1, token1) = signup(&app, "alice").await;
    let (id2, token2) = signup(&app, "bob").await;
    signup(&app, "alfred").await;

    let (status, found) = send(&app, "GET", "/users?q=AL", Some(&token1), None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = found.as_array().unwrap().iter().map(|u| u["username"].clone()).collect();
    assert_eq!(names, vec![json!("alfred"), json!("alice")]);

    let (_, everyone) = send(&app, "GET", "/users", Some(&token1), None).await;
    assert_eq!(everyone.as_array().unwrap().len(), 3);

    send(&app, "POST", &format!("/users/{id2}/follow"), Some(&token1), None).await;
    let (status, following) = send(&app, "GET", &format!("/users/{id1}/following"), Some(&token1), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(following.as_array().unwrap().len(), 1);
    assert_eq!(following[0]["id"].as_i64(), Some(id2));

    let (_, msg) = send(&app, "POST", "/messages", Some(&token2), Some(json!({ "text": "likeable" }))).await;
    let msg_id = msg["id"].as_i64().unwrap();
    send(&app, "POST", &format!("/messages/{msg_id}/like"), Some(&token1), None).await;

    let (status, likes) = send(&app, "GET", &format!("/users/{id1}/likes"), Some(&token1), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(likes[0]["id"].as_i64(), Some(msg_id));

    let (_, likes) = send(&app, "GET", &format!("/users/{id2}/likes"), Some(&token1), None).await;
    assert_eq!(likes.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let app = app();
    let (_, token) = signup(&app, "testuser1").await;

    let (status, _) = send(&app, "POST", "/users/9999/follow", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    for path in ["/users/9999", "/users/9999/following", "/users/9999/followers", "/users/9999/likes"] {
        let (status, _) = send(&app, "GET", path, Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "GET {path}");
    }

    let (status, _) = send(&app, "POST", "/messages/9999/like", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn own_profile_via_me() {
    let app = app();
    let (id, token) = signup(&app, "testuser1").await;
    send(&app, "POST", "/messages", Some(&token), Some(json!({ "text": "hello" }))).await;

    let (status, profile) = send(&app, "GET", "/users/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["user"]["id"].as_i64(), Some(id));
    assert_eq!(profile["user"]["username"], "testuser1");
    assert_eq!(profile["messages"], 1);

    let (status, _) = send(&app, "GET", "/users/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
