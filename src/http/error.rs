//! API error responses.
//!
//! Every error leaves the service as `{"error": "<message>"}`.

use axum::{
    extract::rejection::JsonRejection,
    http::{header, Response as HttpResponse, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::StoreError;

/// Errors a handler or middleware can answer with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Invalid repository ID.")]
    InvalidId,

    #[error("Repository not found.")]
    NotFound,

    /// Body was not a JSON object of the expected shape.
    #[error("{0}")]
    InvalidBody(String),

    #[error("Request body too large.")]
    PayloadTooLarge,

    #[error("Request timed out.")]
    Timeout,

    #[error("Route not found.")]
    RouteNotFound,
}

/// Wire shape of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidId | ApiError::NotFound | ApiError::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Timeout => StatusCode::REQUEST_TIMEOUT,
            ApiError::RouteNotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => ApiError::NotFound,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge
        } else {
            ApiError::InvalidBody(rejection.body_text())
        }
    }
}

/// Give JSON bodies to the bare 408/413 responses produced by the
/// tower-http timeout and body-limit layers.
pub async fn render_layer_errors(response: Response) -> Response {
    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));
    if is_json {
        return response;
    }

    match response.status() {
        StatusCode::REQUEST_TIMEOUT => replace_body(response, ApiError::Timeout),
        StatusCode::PAYLOAD_TOO_LARGE => replace_body(response, ApiError::PayloadTooLarge),
        _ => response,
    }
}

// Keeps headers set by outer layers on the way in (e.g. request id).
fn replace_body(response: Response, error: ApiError) -> Response {
    let (mut parts, _) = response.into_parts();
    let (error_parts, body) = error.into_response().into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.extend(error_parts.headers);
    HttpResponse::from_parts(parts, body)
}

/// Router fallback for unknown paths.
pub async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http_body_util::BodyExt;
    use uuid::Uuid;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = ApiError::InvalidId.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "error": "Invalid repository ID." })
        );
    }

    #[test]
    fn test_store_error_maps_to_not_found() {
        let err: ApiError = StoreError::NotFound(Uuid::new_v4()).into();
        assert_eq!(err, ApiError::NotFound);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Repository not found.");
    }

    #[tokio::test]
    async fn test_bare_timeout_gets_json_body() {
        let bare = HttpResponse::builder()
            .status(StatusCode::REQUEST_TIMEOUT)
            .body(Body::empty())
            .unwrap();

        let response = render_layer_errors(bare).await;
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "error": "Request timed out." })
        );
    }

    #[tokio::test]
    async fn test_json_responses_pass_through() {
        let response = render_layer_errors(ApiError::NotFound.into_response()).await;
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "error": "Repository not found." })
        );
    }
}
