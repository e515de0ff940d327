//! Section REST route handlers
//!
//! - `POST /` - Create a section
//! - `GET /` - List sections with pagination
//! - `GET /{id}` - Fetch one section
//! - `PUT /{id}` - Partially update a section
//! - `DELETE /{id}` - Delete a section

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use super::{AppState, Pagination};
use crate::error::{ApiError, ApiResult};
use crate::models::{NewSection, Section, SectionChanges};
use crate::repositories::SectionRepository;
use crate::store::{Entity, Session};

/// Create section router
pub fn sections_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_sections).post(create_section))
        .route(
            "/:section_id",
            get(read_section).put(update_section).delete(delete_section),
        )
        .with_state(state)
}

async fn create_section(
    State(state): State<AppState>,
    Json(payload): Json<NewSection>,
) -> ApiResult<(StatusCode, Json<Section>)> {
    let mut session = Session::begin(&state.pool).await?;
    let mut repo = SectionRepository::new(&mut session);
    let section = repo.create(&payload).await?;
    repo.commit().await?;
    Ok((StatusCode::CREATED, Json(section)))
}

async fn read_section(
    State(state): State<AppState>,
    Path(section_id): Path<Uuid>,
) -> ApiResult<Json<Section>> {
    let mut session = Session::begin(&state.pool).await?;
    let mut repo = SectionRepository::new(&mut session);
    let section = repo
        .find_by_id(section_id)
        .await?
        .ok_or_else(|| ApiError::not_found(Section::KIND, section_id))?;
    repo.commit().await?;
    Ok(Json(section))
}

async fn list_sections(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> ApiResult<Json<Vec<Section>>> {
    pagination.validate()?;
    let mut session = Session::begin(&state.pool).await?;
    let mut repo = SectionRepository::new(&mut session);
    let sections = repo
        .find_all(pagination.skip, pagination.limit, Vec::new())
        .await?;
    repo.commit().await?;
    Ok(Json(sections))
}

async fn update_section(
    State(state): State<AppState>,
    Path(section_id): Path<Uuid>,
    Json(changes): Json<SectionChanges>,
) -> ApiResult<Json<Section>> {
    let mut session = Session::begin(&state.pool).await?;
    let mut repo = SectionRepository::new(&mut session);
    let existing = repo
        .find_by_id(section_id)
        .await?
        .ok_or_else(|| ApiError::not_found(Section::KIND, section_id))?;
    let updated = repo.update(&existing, &changes).await?;
    repo.commit().await?;
    Ok(Json(updated))
}

async fn delete_section(
    State(state): State<AppState>,
    Path(section_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let mut session = Session::begin(&state.pool).await?;
    let mut repo = SectionRepository::new(&mut session);
    let existing = repo
        .find_by_id(section_id)
        .await?
        .ok_or_else(|| ApiError::not_found(Section::KIND, section_id))?;
    repo.delete(&existing).await?;
    repo.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}
