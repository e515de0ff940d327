//! Category REST route handlers
//!
//! - `POST /` - Create a category
//! - `GET /` - List categories with pagination
//! - `GET /{id}` - Fetch one category
//! - `PUT /{id}` - Partially update a category
//! - `DELETE /{id}` - Delete a category
//! - `GET /{id}/blog_posts` - List the category's blog posts

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use super::{AppState, Pagination};
use crate::error::{ApiError, ApiResult};
use crate::models::{BlogPost, Category, CategoryChanges, NewCategory};
use crate::repositories::{BlogPostRepository, CategoryRepository};
use crate::store::{Entity, Session};

/// Create category router
pub fn categories_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/:category_id",
            get(read_category)
                .put(update_category)
                .delete(delete_category),
        )
        .route("/:category_id/blog_posts", get(list_category_blog_posts))
        .with_state(state)
}

async fn create_category(
    State(state): State<AppState>,
    Json(payload): Json<NewCategory>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let mut session = Session::begin(&state.pool).await?;
    let mut repo = CategoryRepository::new(&mut session);
    let category = repo.create(&payload).await?;
    repo.commit().await?;
    Ok((StatusCode::CREATED, Json(category)))
}

async fn read_category(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
) -> ApiResult<Json<Category>> {
    let mut session = Session::begin(&state.pool).await?;
    let mut repo = CategoryRepository::new(&mut session);
    let category = repo
        .find_by_id(category_id)
        .await?
        .ok_or_else(|| ApiError::not_found(Category::KIND, category_id))?;
    repo.commit().await?;
    Ok(Json(category))
}

async fn list_categories(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> ApiResult<Json<Vec<Category>>> {
    pagination.validate()?;
    let mut session = Session::begin(&state.pool).await?;
    let mut repo = CategoryRepository::new(&mut session);
    let categories = repo
        .find_all(pagination.skip, pagination.limit, Vec::new())
        .await?;
    repo.commit().await?;
    Ok(Json(categories))
}

async fn update_category(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
    Json(changes): Json<CategoryChanges>,
) -> ApiResult<Json<Category>> {
    let mut session = Session::begin(&state.pool).await?;
    let mut repo = CategoryRepository::new(&mut session);
    let existing = repo
        .find_by_id(category_id)
        .await?
        .ok_or_else(|| ApiError::not_found(Category::KIND, category_id))?;
    let updated = repo.update(&existing, &changes).await?;
    repo.commit().await?;
    Ok(Json(updated))
}

async fn delete_category(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let mut session = Session::begin(&state.pool).await?;
    let mut repo = CategoryRepository::new(&mut session);
    let existing = repo
        .find_by_id(category_id)
        .await?
        .ok_or_else(|| ApiError::not_found(Category::KIND, category_id))?;
    repo.delete(&existing).await?;
    repo.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_category_blog_posts(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
    Query(pagination): Query<Pagination>,
) -> ApiResult<Json<Vec<BlogPost>>> {
    pagination.validate()?;
    let mut session = Session::begin(&state.pool).await?;

    let mut categories = CategoryRepository::new(&mut session);
    categories
        .find_by_id(category_id)
        .await?
        .ok_or_else(|| ApiError::not_found(Category::KIND, category_id))?;

    let mut posts = BlogPostRepository::new(&mut session);
    let blog_posts = posts
        .find_by_category(category_id, pagination.skip, pagination.limit)
        .await?;
    posts.commit().await?;
    Ok(Json(blog_posts))
}
