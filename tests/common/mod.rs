//! Shared helpers for driving the router in-process.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use repositories_api::{HttpServer, ServiceConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Router over a fresh, empty store.
pub fn test_router() -> Router {
    HttpServer::new(ServiceConfig::default()).router()
}

/// Send a request and return status plus parsed JSON body (`Null` when empty).
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Create a repository and return its JSON representation.
#[allow(dead_code)]
pub async fn create(router: &Router, title: &str) -> Value {
    let (status, body) = send(
        router,
        Method::POST,
        "/repositories",
        Some(json!({
            "title": title,
            "url": format!("https://github.com/example/{}", title),
            "techs": ["Node.js", "Rust"],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body
}

#[allow(dead_code)]
pub fn id_of(repository: &Value) -> String {
    repository["id"].as_str().unwrap().to_string()
}
