//! Repository endpoint handlers.
//!
//! `{id}` routes are guarded by [`validate_id`](crate::http::middleware::validate_id),
//! so the `Path<Uuid>` extraction here only sees canonical ids.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::store::{Repository, RepositoryInput};

type JsonBody = Result<Json<RepositoryInput>, JsonRejection>;

/// `GET /repositories`
pub async fn list_repositories(State(state): State<AppState>) -> Json<Vec<Repository>> {
    Json(state.store.list())
}

/// `POST /repositories`
pub async fn create_repository(
    State(state): State<AppState>,
    body: JsonBody,
) -> Result<Json<Repository>, ApiError> {
    let Json(input) = body?;
    let repository = state.store.create(input);

    tracing::info!(id = %repository.id, title = %repository.title, "Repository created");

    Ok(Json(repository))
}

/// `PUT /repositories/{id}`
pub async fn update_repository(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: JsonBody,
) -> Result<Json<Repository>, ApiError> {
    let Json(input) = body?;
    let repository = state.store.update(&id, input).inspect_err(|_| {
        tracing::debug!(id = %id, "Update of unknown repository");
    })?;

    tracing::info!(id = %id, "Repository updated");
    Ok(Json(repository))
}

/// `DELETE /repositories/{id}`
pub async fn delete_repository(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.store.delete(&id).inspect_err(|_| {
        tracing::debug!(id = %id, "Delete of unknown repository");
    })?;

    tracing::info!(id = %id, "Repository deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /repositories/{id}/like`
pub async fn like_repository(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Repository>, ApiError> {
    let repository = state.store.like(&id).inspect_err(|_| {
        tracing::debug!(id = %id, "Like of unknown repository");
    })?;

    tracing::debug!(id = %id, likes = repository.likes, "Repository liked");
    Ok(Json(repository))
}
