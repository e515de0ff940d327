//! Announcement REST route handlers
//!
//! - `POST /` - Create an announcement
//! - `GET /` - List announcements with pagination
//! - `GET /{id}` - Fetch one announcement
//! - `PUT /{id}` - Partially update an announcement
//! - `DELETE /{id}` - Delete an announcement
//!
//! Attaching announcements to blog posts lives on the blog post router.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use super::{AppState, Pagination};
use crate::error::{ApiError, ApiResult};
use crate::models::{Announcement, AnnouncementChanges, NewAnnouncement};
use crate::repositories::AnnouncementRepository;
use crate::store::{Entity, Session};

/// Create announcement router
pub fn announcements_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_announcements).post(create_announcement))
        .route(
            "/:announcement_id",
            get(read_announcement)
                .put(update_announcement)
                .delete(delete_announcement),
        )
        .with_state(state)
}

async fn create_announcement(
    State(state): State<AppState>,
    Json(payload): Json<NewAnnouncement>,
) -> ApiResult<(StatusCode, Json<Announcement>)> {
    let mut session = Session::begin(&state.pool).await?;
    let mut repo = AnnouncementRepository::new(&mut session);
    let announcement = repo.create(&payload).await?;
    repo.commit().await?;
    Ok((StatusCode::CREATED, Json(announcement)))
}

async fn read_announcement(
    State(state): State<AppState>,
    Path(announcement_id): Path<Uuid>,
) -> ApiResult<Json<Announcement>> {
    let mut session = Session::begin(&state.pool).await?;
    let mut repo = AnnouncementRepository::new(&mut session);
    let announcement = repo
        .find_by_id(announcement_id)
        .await?
        .ok_or_else(|| ApiError::not_found(Announcement::KIND, announcement_id))?;
    repo.commit().await?;
    Ok(Json(announcement))
}

async fn list_announcements(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> ApiResult<Json<Vec<Announcement>>> {
    pagination.validate()?;
    let mut session = Session::begin(&state.pool).await?;
    let mut repo = AnnouncementRepository::new(&mut session);
    let announcements = repo
        .find_all(pagination.skip, pagination.limit, Vec::new())
        .await?;
    repo.commit().await?;
    Ok(Json(announcements))
}

async fn update_announcement(
    State(state): State<AppState>,
    Path(announcement_id): Path<Uuid>,
    Json(changes): Json<AnnouncementChanges>,
) -> ApiResult<Json<Announcement>> {
    let mut session = Session::begin(&state.pool).await?;
    let mut repo = AnnouncementRepository::new(&mut session);
    let existing = repo
        .find_by_id(announcement_id)
        .await?
        .ok_or_else(|| ApiError::not_found(Announcement::KIND, announcement_id))?;
    let updated = repo.update(&existing, &changes).await?;
    repo.commit().await?;
    Ok(Json(updated))
}

async fn delete_announcement(
    State(state): State<AppState>,
    Path(announcement_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let mut session = Session::begin(&state.pool).await?;
    let mut repo = AnnouncementRepository::new(&mut session);
    let existing = repo
        .find_by_id(announcement_id)
        .await?
        .ok_or_else(|| ApiError::not_found(Announcement::KIND, announcement_id))?;
    repo.delete(&existing).await?;
    repo.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}
