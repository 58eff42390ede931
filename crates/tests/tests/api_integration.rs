use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use moodlog_api::{build_app, ApiConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn app() -> Router {
    build_app(ApiConfig::default()).await.expect("app should build")
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let parsed = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, parsed)
}

async fn register(app: &Router, email: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/auth?action=register",
        None,
        Some(json!({ "email": email, "password": "secret1" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_is_public() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["metrics"]["requests_total"].is_u64());
}

#[tokio::test]
async fn register_login_and_me() {
    let app = app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/auth?action=register",
        None,
        Some(json!({ "email": "Ada@Example.com", "password": "secret1" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["email"], "ada@example.com");
    assert!(body["user"].get("password_hash").is_none());
    assert!(body["token"].as_str().is_some());

    let (status, body) = send(
        &app,
        "POST",
        "/auth?action=login",
        None,
        Some(json!({ "email": "ada@example.com", "password": "secret1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = send(&app, "GET", "/auth?action=me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "ada@example.com");
}

#[tokio::test]
async fn auth_validation_errors_are_400() {
    let app = app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/auth?action=register",
        None,
        Some(json!({ "email": "ada@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email and password are required");

    let (status, _) = send(
        &app,
        "POST",
        "/auth?action=register",
        None,
        Some(json!({ "email": "ada@example.com", "password": "123" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        "POST",
        "/auth?action=dance",
        None,
        Some(json!({ "email": "ada@example.com", "password": "secret1" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid action");

    register(&app, "ada@example.com").await;
    let (status, body) = send(
        &app,
        "POST",
        "/auth?action=register",
        None,
        Some(json!({ "email": "ada@example.com", "password": "secret1" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "This email address is already in use");
}

#[tokio::test]
async fn wrong_password_and_unknown_email_look_the_same() {
    let app = app().await;
    register(&app, "ada@example.com").await;

    let (wrong_status, wrong_body) = send(
        &app,
        "POST",
        "/auth?action=login",
        None,
        Some(json!({ "email": "ada@example.com", "password": "nope-nope" })),
    )
    .await;
    let (unknown_status, unknown_body) = send(
        &app,
        "POST",
        "/auth?action=login",
        None,
        Some(json!({ "email": "ghost@example.com", "password": "nope-nope" })),
    )
    .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_status, unknown_status);
    assert_eq!(wrong_body, unknown_body);
}

#[tokio::test]
async fn protected_routes_need_a_valid_token() {
    let app = app().await;

    let (status, body) = send(&app, "GET", "/entries", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    let (status, _) = send(&app, "GET", "/weekly", Some("not.a.token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = register(&app, "ada@example.com").await;
    let mut tampered = token.clone();
    let last = if tampered.ends_with('A') { 'B' } else { 'A' };
    tampered.pop();
    tampered.push(last);
    let (status, _) = send(&app, "GET", "/entries", Some(&tampered), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn entries_crud_round_trip() {
    let app = app().await;
    let token = register(&app, "ada@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/entries",
        Some(&token),
        Some(json!({ "content": "What a great day" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["entry"]["sentiment"], "positive");
    assert!(!body["entry"]["summary"].as_str().unwrap().is_empty());
    let first_id = body["entry"]["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        "POST",
        "/entries",
        Some(&token),
        Some(json!({
            "content": "ekmek aldım",
            "sentiment": "neutral",
            "summary": "sade bir gün",
            "suggestion": "yürüyüşe çık",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "GET", "/entries", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let entries = body["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["content"], "ekmek aldım");

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/entries?id={first_id}"),
        Some(&token),
        Some(json!({ "sentiment": "negative" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["entry"]["sentiment"], "negative");
    assert_eq!(body["entry"]["content"], "What a great day");

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/entries?id={first_id}"),
        Some(&token),
        Some(json!({ "sentiment": "ecstatic" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "PUT", "/entries", Some(&token), Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Entry ID is required");

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/entries?id={first_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/entries?id={first_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn other_users_entries_are_forbidden() {
    let app = app().await;
    let owner = register(&app, "ada@example.com").await;
    let intruder = register(&app, "eve@example.com").await;

    let (_, body) = send(
        &app,
        "POST",
        "/entries",
        Some(&owner),
        Some(json!({ "content": "günlüğüm" })),
    )
    .await;
    let id = body["entry"]["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/entries?id={id}"),
        Some(&intruder),
        Some(json!({ "content": "hacked" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/entries?id={id}"),
        Some(&intruder),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, body) = send(&app, "GET", "/entries", Some(&intruder), None).await;
    assert!(body["entries"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn weekly_summary_and_bulk_delete() {
    let app = app().await;
    let token = register(&app, "ada@example.com").await;

    for (content, sentiment) in [
        ("a", "positive"),
        ("b", "positive"),
        ("c", "negative"),
    ] {
        let (status, _) = send(
            &app,
            "POST",
            "/entries",
            Some(&token),
            Some(json!({
                "content": content,
                "sentiment": sentiment,
                "summary": "s",
                "suggestion": "g",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, "GET", "/weekly", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalEntries"], 3);
    assert_eq!(body["positive"], 2);
    assert_eq!(body["negative"], 1);
    assert_eq!(body["dominantSentiment"], "positive");

    let (status, body) = send(&app, "DELETE", "/entries?all=true", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], 3);

    let (_, body) = send(&app, "GET", "/weekly", Some(&token), None).await;
    assert_eq!(body["totalEntries"], 0);
    assert_eq!(body["dominantSentiment"], "neutral");
}

#[tokio::test]
async fn analyze_classifies_without_saving() {
    let app = app().await;
    let token = register(&app, "ada@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/analyze",
        Some(&token),
        Some(json!({ "text": "I am not happy at all" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sentiment"], "negative");
    assert_eq!(body["language"], "en");
    assert!(body["suggestion"].is_string());

    let (status, body) = send(&app, "POST", "/analyze", Some(&token), Some(json!({ "text": "  " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please enter some text");

    let (_, body) = send(&app, "GET", "/entries", Some(&token), None).await;
    assert!(body["entries"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unsupported_methods_are_405() {
    let app = app().await;

    let (status, body) = send(&app, "PATCH", "/entries", None, None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["error"], "Method not allowed");

    let (status, _) = send(&app, "DELETE", "/weekly", None, None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn malformed_json_is_400() {
    let app = app().await;
    let request = Request::builder()
        .method("POST")
        .uri("/auth?action=login")
        .header("content-type", "application/json")
        .body(Body::from("{\"email\":"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn sqlite_backend_persists_across_apps() {
    let dir = tempfile::tempdir().unwrap();
    let config = ApiConfig {
        database_url: Some(format!("sqlite://{}", dir.path().join("moodlog.db").display())),
        ..ApiConfig::default()
    };

    let first = build_app(config.clone()).await.expect("app should build");
    let token = register(&first, "ada@example.com").await;
    let (status, _) = send(
        &first,
        "POST",
        "/entries",
        Some(&token),
        Some(json!({ "content": "What a great day" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let second = build_app(config).await.expect("app should build");
    let (status, body) = send(&second, "GET", "/entries", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["entries"].as_array().unwrap().len(), 1);
}
