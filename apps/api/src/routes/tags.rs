//! Tag REST route handlers
//!
//! - `POST /` - Create a tag
//! - `GET /` - List tags with pagination
//! - `GET /{id}` - Fetch one tag
//! - `PUT /{id}` - Partially update a tag
//! - `DELETE /{id}` - Delete a tag

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use super::{AppState, Pagination};
use crate::error::{ApiError, ApiResult};
use crate::models::{NewTag, Tag, TagChanges};
use crate::repositories::TagRepository;
use crate::store::{Entity, Session};

/// Create tag router
pub fn tags_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_tags).post(create_tag))
        .route("/:tag_id", get(read_tag).put(update_tag).delete(delete_tag))
        .with_state(state)
}

async fn create_tag(
    State(state): State<AppState>,
    Json(payload): Json<NewTag>,
) -> ApiResult<(StatusCode, Json<Tag>)> {
    let mut session = Session::begin(&state.pool).await?;
    let mut repo = TagRepository::new(&mut session);
    let tag = repo.create(&payload).await?;
    repo.commit().await?;
    Ok((StatusCode::CREATED, Json(tag)))
}

async fn read_tag(
    State(state): State<AppState>,
    Path(tag_id): Path<Uuid>,
) -> ApiResult<Json<Tag>> {
    let mut session = Session::begin(&state.pool).await?;
    let mut repo = TagRepository::new(&mut session);
    let tag = repo
        .find_by_id(tag_id)
        .await?
        .ok_or_else(|| ApiError::not_found(Tag::KIND, tag_id))?;
    repo.commit().await?;
    Ok(Json(tag))
}

async fn list_tags(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> ApiResult<Json<Vec<Tag>>> {
    pagination.validate()?;
    let mut session = Session::begin(&state.pool).await?;
    let mut repo = TagRepository::new(&mut session);
    let tags = repo
        .find_all(pagination.skip, pagination.limit, Vec::new())
        .await?;
    repo.commit().await?;
    Ok(Json(tags))
}

async fn update_tag(
    State(state): State<AppState>,
    Path(tag_id): Path<Uuid>,
    Json(changes): Json<TagChanges>,
) -> ApiResult<Json<Tag>> {
    let mut session = Session::begin(&state.pool).await?;
    let mut repo = TagRepository::new(&mut session);
    let existing = repo
        .find_by_id(tag_id)
        .await?
        .ok_or_else(|| ApiError::not_found(Tag::KIND, tag_id))?;
    let updated = repo.update(&existing, &changes).await?;
    repo.commit().await?;
    Ok(Json(updated))
}

async fn delete_tag(
    State(state): State<AppState>,
    Path(tag_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let mut session = Session::begin(&state.pool).await?;
    let mut repo = TagRepository::new(&mut session);
    let existing = repo
        .find_by_id(tag_id)
        .await?
        .ok_or_else(|| ApiError::not_found(Tag::KIND, tag_id))?;
    repo.delete(&existing).await?;
    repo.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}
