#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use movielist::{build_app, AppConfig, AppMode, AppState};
use serde_json::Value;
use tower::ServiceExt;

pub const SECRET: &str = "integration-secret";

pub fn state_with_mode(mode: AppMode) -> AppState {
    let mut config = AppConfig::for_tests(SECRET);
    config.mode = mode;
    AppState::in_memory(config).expect("in-memory state")
}

pub fn test_app() -> (Router, AppState) {
    let state = state_with_mode(AppMode::All);
    (build_app(state.clone()), state)
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        req = req.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    let req = match body {
        Some(b) => req
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&b).unwrap()))
            .unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };
    send_request(app, req).await
}

pub async fn send_request(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, value)
}

pub async fn register_and_login(app: &Router, email: &str, password: &str) -> String {
    let creds = serde_json::json!({ "email": email, "password": password });
    let (status, _) = send(app, Method::POST, "/register", Some(creds.clone()), None).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = send(app, Method::POST, "/login", Some(creds), None).await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().expect("token").to_string()
}
