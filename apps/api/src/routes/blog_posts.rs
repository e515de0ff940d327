//! Blog post REST route handlers
//!
//! - `POST /` - Create a blog post
//! - `GET /` - List blog posts with pagination
//! - `GET /{id}` - Fetch one post with its category, tags and sections
//! - `PUT /{id}` - Partially update a post
//! - `DELETE /{id}` - Delete a post
//! - `POST|DELETE /{id}/tags/{tag_id}` - Attach/detach a tag
//! - `GET /{id}/tags` - List the post's tags
//! - `POST|DELETE /{id}/announcements/{announcement_id}` - Attach/detach an announcement
//! - `GET /{id}/announcements` - List the post's announcements
//! - `PUT /{id}/category/{category_id}` - Reassign the post's category
//! - `GET /{id}/category` - Fetch the post's category
//! - `GET /{id}/sections` - List the post's sections in reading order

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;
use uuid::Uuid;

use super::{AppState, Pagination};
use crate::error::{ApiError, ApiResult};
use crate::models::{
    Announcement, BlogPost, BlogPostChanges, Category, NewBlogPost, Section, Tag,
};
use crate::repositories::{
    BlogPostRepository, CategoryRepository, SectionRepository,
};
use crate::store::{Entity, Session};

/// Create blog post router
pub fn blog_posts_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_blog_posts).post(create_blog_post))
        .route(
            "/:blog_post_id",
            get(read_blog_post)
                .put(update_blog_post)
                .delete(delete_blog_post),
        )
        .route("/:blog_post_id/tags", get(list_post_tags))
        .route(
            "/:blog_post_id/tags/:tag_id",
            post(add_tag_to_post).delete(remove_tag_from_post),
        )
        .route("/:blog_post_id/announcements", get(list_post_announcements))
        .route(
            "/:blog_post_id/announcements/:announcement_id",
            post(add_announcement_to_post).delete(remove_announcement_from_post),
        )
        .route("/:blog_post_id/category", get(read_post_category))
        .route(
            "/:blog_post_id/category/:category_id",
            put(assign_post_category),
        )
        .route("/:blog_post_id/sections", get(list_post_sections))
        .with_state(state)
}

/// A blog post together with its resolved relations
#[derive(Debug, Serialize)]
pub struct BlogPostDetail {
    #[serde(flatten)]
    pub post: BlogPost,
    pub category: Option<Category>,
    pub tags: Vec<Tag>,
    pub sections: Vec<Section>,
}

async fn create_blog_post(
    State(state): State<AppState>,
    Json(payload): Json<NewBlogPost>,
) -> ApiResult<(StatusCode, Json<BlogPost>)> {
    let mut session = Session::begin(&state.pool).await?;

    let mut categories = CategoryRepository::new(&mut session);
    categories
        .find_by_id(payload.category_id)
        .await?
        .ok_or_else(|| ApiError::not_found(Category::KIND, payload.category_id))?;

    let mut posts = BlogPostRepository::new(&mut session);
    let post = posts.create(&payload).await?;
    posts.commit().await?;
    Ok((StatusCode::CREATED, Json(post)))
}

async fn read_blog_post(
    State(state): State<AppState>,
    Path(blog_post_id): Path<Uuid>,
) -> ApiResult<Json<BlogPostDetail>> {
    let mut session = Session::begin(&state.pool).await?;

    let mut posts = BlogPostRepository::new(&mut session);
    let post = posts
        .find_by_id(blog_post_id)
        .await?
        .ok_or_else(|| ApiError::not_found(BlogPost::KIND, blog_post_id))?;
    let tags = posts.tags(blog_post_id).await?;
    let category = posts.category(&post).await?;

    let mut sections = SectionRepository::new(&mut session);
    let post_sections = sections
        .find_by_blog_post(blog_post_id, 0, i64::MAX)
        .await?;
    sections.commit().await?;

    Ok(Json(BlogPostDetail {
        post,
        category,
        tags,
        sections: post_sections,
    }))
}

async fn list_blog_posts(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> ApiResult<Json<Vec<BlogPost>>> {
    pagination.validate()?;
    let mut session = Session::begin(&state.pool).await?;
    let mut repo = BlogPostRepository::new(&mut session);
    let posts = repo
        .find_all(pagination.skip, pagination.limit, Vec::new())
        .await?;
    repo.commit().await?;
    Ok(Json(posts))
}

async fn update_blog_post(
    State(state): State<AppState>,
    Path(blog_post_id): Path<Uuid>,
    Json(changes): Json<BlogPostChanges>,
) -> ApiResult<Json<BlogPost>> {
    let mut session = Session::begin(&state.pool).await?;
    let mut repo = BlogPostRepository::new(&mut session);
    let existing = repo
        .find_by_id(blog_post_id)
        .await?
        .ok_or_else(|| ApiError::not_found(BlogPost::KIND, blog_post_id))?;
    let updated = repo.update(&existing, &changes).await?;
    repo.commit().await?;
    Ok(Json(updated))
}

async fn delete_blog_post(
    State(state): State<AppState>,
    Path(blog_post_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let mut session = Session::begin(&state.pool).await?;
    let mut repo = BlogPostRepository::new(&mut session);
    let existing = repo
        .find_by_id(blog_post_id)
        .await?
        .ok_or_else(|| ApiError::not_found(BlogPost::KIND, blog_post_id))?;
    repo.delete(&existing).await?;
    repo.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

// ========== Tag relation ==========

async fn add_tag_to_post(
    State(state): State<AppState>,
    Path((blog_post_id, tag_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<BlogPost>> {
    let mut session = Session::begin(&state.pool).await?;
    let mut repo = BlogPostRepository::new(&mut session);
    let post = repo.add_tag(blog_post_id, tag_id).await?;
    repo.commit().await?;
    Ok(Json(post))
}

async fn remove_tag_from_post(
    State(state): State<AppState>,
    Path((blog_post_id, tag_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<BlogPost>> {
    let mut session = Session::begin(&state.pool).await?;
    let mut repo = BlogPostRepository::new(&mut session);
    let post = repo.remove_tag(blog_post_id, tag_id).await?;
    repo.commit().await?;
    Ok(Json(post))
}

async fn list_post_tags(
    State(state): State<AppState>,
    Path(blog_post_id): Path<Uuid>,
) -> ApiResult<Json<Vec<Tag>>> {
    let mut session = Session::begin(&state.pool).await?;
    let mut repo = BlogPostRepository::new(&mut session);
    let tags = repo.tags(blog_post_id).await?;
    repo.commit().await?;
    Ok(Json(tags))
}

// ========== Announcement relation ==========

async fn add_announcement_to_post(
    State(state): State<AppState>,
    Path((blog_post_id, announcement_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<BlogPost>> {
    let mut session = Session::begin(&state.pool).await?;
    let mut repo = BlogPostRepository::new(&mut session);
    let post = repo.add_announcement(blog_post_id, announcement_id).await?;
    repo.commit().await?;
    Ok(Json(post))
}

async fn remove_announcement_from_post(
    State(state): State<AppState>,
    Path((blog_post_id, announcement_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<BlogPost>> {
    let mut session = Session::begin(&state.pool).await?;
    let mut repo = BlogPostRepository::new(&mut session);
    let post = repo
        .remove_announcement(blog_post_id, announcement_id)
        .await?;
    repo.commit().await?;
    Ok(Json(post))
}

async fn list_post_announcements(
    State(state): State<AppState>,
    Path(blog_post_id): Path<Uuid>,
) -> ApiResult<Json<Vec<Announcement>>> {
    let mut session = Session::begin(&state.pool).await?;
    let mut repo = BlogPostRepository::new(&mut session);
    let announcements = repo.announcements(blog_post_id).await?;
    repo.commit().await?;
    Ok(Json(announcements))
}

// ========== Category ==========

async fn assign_post_category(
    State(state): State<AppState>,
    Path((blog_post_id, category_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<BlogPost>> {
    let mut session = Session::begin(&state.pool).await?;
    let mut repo = BlogPostRepository::new(&mut session);
    let post = repo.assign_category(blog_post_id, category_id).await?;
    repo.commit().await?;
    Ok(Json(post))
}

async fn read_post_category(
    State(state): State<AppState>,
    Path(blog_post_id): Path<Uuid>,
) -> ApiResult<Json<Category>> {
    let mut session = Session::begin(&state.pool).await?;

    let mut posts = BlogPostRepository::new(&mut session);
    let post = posts
        .find_by_id(blog_post_id)
        .await?
        .ok_or_else(|| ApiError::not_found(BlogPost::KIND, blog_post_id))?;
    let category = posts
        .category(&post)
        .await?
        .ok_or_else(|| ApiError::not_found(Category::KIND, post.category_id))?;
    posts.commit().await?;
    Ok(Json(category))
}

async fn list_post_sections(
    State(state): State<AppState>,
    Path(blog_post_id): Path<Uuid>,
    Query(pagination): Query<Pagination>,
) -> ApiResult<Json<Vec<Section>>> {
    pagination.validate()?;
    let mut session = Session::begin(&state.pool).await?;

    let mut posts = BlogPostRepository::new(&mut session);
    posts
        .find_by_id(blog_post_id)
        .await?
        .ok_or_else(|| ApiError::not_found(BlogPost::KIND, blog_post_id))?;

    let mut sections = SectionRepository::new(&mut session);
    let post_sections = sections
        .find_by_blog_post(blog_post_id, pagination.skip, pagination.limit)
        .await?;
    sections.commit().await?;
    Ok(Json(post_sections))
}
