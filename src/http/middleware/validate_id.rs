//! Route guard for `{id}` routes.

use std::collections::HashMap;

use axum::{
    extract::{rejection::PathRejection, Path, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::http::error::ApiError;
use crate::store::id::is_valid_id;

/// Reject requests whose `id` path parameter is not a canonical UUID.
///
/// Runs before the handler, so a malformed id never touches the store.
/// Segments that fail to decode (e.g. invalid UTF-8) count as malformed.
pub async fn validate_id(
    params: Result<Path<HashMap<String, String>>, PathRejection>,
    request: Request,
    next: Next,
) -> Response {
    let id = match &params {
        Ok(Path(params)) => params.get("id").map(String::as_str),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Undecodable path parameters");
            None
        }
    };

    match id {
        Some(id) if is_valid_id(id) => next.run(request).await,
        id => {
            tracing::debug!(id = ?id, path = %request.uri().path(), "Rejected repository ID");
            ApiError::InvalidId.into_response()
        }
    }
}
