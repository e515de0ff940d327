//! User REST route handlers
//!
//! - `POST /` - Create a user (password is hashed before persistence)
//! - `GET /` - List users with pagination and optional role/is_active filters
//! - `GET /{id}` - Fetch one user
//! - `PUT /{id}` - Partially update a user's profile
//! - `PUT /{id}/password` - Change a user's password
//! - `PUT /{id}/verify` - Mark a user as verified
//! - `DELETE /{id}` - Delete a user
//!
//! Responses serialize the `User` model, which never exposes `password_hash`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use super::{AppState, Pagination};
use crate::error::{ApiError, ApiResult};
use crate::models::{NewUser, PasswordChange, User, UserChanges, UserRole};
use crate::repositories::UserRepository;
use crate::store::{Entity, Session, Value};

/// Create user router
pub fn users_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route(
            "/:user_id",
            get(read_user).put(update_user).delete(delete_user),
        )
        .route("/:user_id/password", put(change_password))
        .route("/:user_id/verify", put(verify_user))
        .with_state(state)
}

/// Optional exact-match filters for the user listing
#[derive(Debug, Default, Deserialize)]
struct UserFilter {
    #[serde(default)]
    role: Option<UserRole>,
    #[serde(default)]
    is_active: Option<bool>,
}

impl UserFilter {
    fn into_filters(self) -> Vec<(String, Value)> {
        let mut filters = Vec::new();
        if let Some(role) = self.role {
            filters.push(("role".to_string(), Value::from(role.as_str())));
        }
        if let Some(is_active) = self.is_active {
            filters.push(("is_active".to_string(), Value::from(is_active)));
        }
        filters
    }
}

/// Password change request body
#[derive(Debug, Deserialize)]
struct PasswordUpdate {
    current_password: String,
    new_password: String,
}

async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<NewUser>,
) -> ApiResult<(StatusCode, Json<User>)> {
    state.passwords.validate(&payload.password)?;

    let mut session = Session::begin(&state.pool).await?;
    let mut repo = UserRepository::new(&mut session);

    if repo.email_exists(&payload.email).await? {
        return Err(ApiError::Conflict(format!(
            "a user with email {} already exists",
            payload.email
        )));
    }
    if let Some(username) = &payload.username {
        if repo.find_by_username(username).await?.is_some() {
            return Err(ApiError::Conflict(format!(
                "a user with username {} already exists",
                username
            )));
        }
    }

    let password_hash = state.passwords.hash(&payload.password)?;
    let user = repo
        .create_from_fields(payload.fields_with_hash(password_hash))
        .await?;
    repo.commit().await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn read_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<User>> {
    let mut session = Session::begin(&state.pool).await?;
    let mut repo = UserRepository::new(&mut session);
    let user = repo
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found(User::KIND, user_id))?;
    repo.commit().await?;
    Ok(Json(user))
}

async fn list_users(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
    Query(filter): Query<UserFilter>,
) -> ApiResult<Json<Vec<User>>> {
    pagination.validate()?;
    let mut session = Session::begin(&state.pool).await?;
    let mut repo = UserRepository::new(&mut session);
    let users = repo
        .find_all(pagination.skip, pagination.limit, filter.into_filters())
        .await?;
    repo.commit().await?;
    Ok(Json(users))
}

async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(changes): Json<UserChanges>,
) -> ApiResult<Json<User>> {
    let mut session = Session::begin(&state.pool).await?;
    let mut repo = UserRepository::new(&mut session);
    let existing = repo
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found(User::KIND, user_id))?;

    if let Some(email) = &changes.email {
        if !email.eq_ignore_ascii_case(&existing.email) && repo.email_exists(email).await? {
            return Err(ApiError::Conflict(format!(
                "a user with email {} already exists",
                email
            )));
        }
    }
    if let Some(username) = &changes.username {
        if existing.username.as_deref() != Some(username.as_str())
            && repo.find_by_username(username).await?.is_some()
        {
            return Err(ApiError::Conflict(format!(
                "a user with username {} already exists",
                username
            )));
        }
    }

    let updated = repo.update(&existing, &changes).await?;
    repo.commit().await?;
    Ok(Json(updated))
}

async fn change_password(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<PasswordUpdate>,
) -> ApiResult<Json<User>> {
    state.passwords.validate(&payload.new_password)?;

    let mut session = Session::begin(&state.pool).await?;
    let mut repo = UserRepository::new(&mut session);
    let existing = repo
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found(User::KIND, user_id))?;

    if !state
        .passwords
        .verify(&payload.current_password, &existing.password_hash)?
    {
        return Err(ApiError::ValidationError(
            "current password is incorrect".to_string(),
        ));
    }

    let password_hash = state.passwords.hash(&payload.new_password)?;
    let updated = repo
        .update(&existing, &PasswordChange { password_hash })
        .await?;
    repo.commit().await?;
    Ok(Json(updated))
}

async fn verify_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<User>> {
    let mut session = Session::begin(&state.pool).await?;
    let mut repo = UserRepository::new(&mut session);
    let user = repo.mark_verified(user_id).await?;
    repo.commit().await?;
    Ok(Json(user))
}

async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let mut session = Session::begin(&state.pool).await?;
    let mut repo = UserRepository::new(&mut session);
    let existing = repo
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found(User::KIND, user_id))?;
    repo.delete(&existing).await?;
    repo.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}
