//! HTTP route handlers for Inkpress
//!
//! Each aggregate gets its own router. Handlers open one `Session` per
//! request, run their repository calls inside it, and commit on success;
//! bailing out with `?` drops the session, which rolls the transaction back.

pub mod announcements;
pub mod blog_posts;
pub mod categories;
pub mod health;
pub mod sections;
pub mod tags;
pub mod users;

pub use announcements::announcements_router;
pub use blog_posts::blog_posts_router;
pub use categories::categories_router;
pub use health::health_router;
pub use sections::sections_router;
pub use tags::tags_router;
pub use users::users_router;

use std::sync::Arc;

use serde::Deserialize;
use sqlx::PgPool;

use crate::error::{ApiError, ApiResult};
use crate::services::PasswordService;

/// Shared application state for all route handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool; each request begins its own transaction
    pub pool: PgPool,
    /// Password hashing service
    pub passwords: Arc<PasswordService>,
}

impl AppState {
    /// Create application state from a connection pool
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            passwords: Arc::new(PasswordService::new()),
        }
    }
}

/// Skip/limit pagination query parameters
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Pagination {
    /// Records to discard from the front of the stable ordering
    #[serde(default)]
    pub skip: i64,

    /// Maximum records to return
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_limit(),
        }
    }
}

impl Pagination {
    /// Reject negative skip/limit before they reach the store
    pub fn validate(&self) -> ApiResult<()> {
        if self.skip < 0 {
            return Err(ApiError::InvalidQueryParam {
                name: "skip".to_string(),
                reason: "must be non-negative".to_string(),
            });
        }
        if self.limit < 0 {
            return Err(ApiError::InvalidQueryParam {
                name: "limit".to_string(),
                reason: "must be non-negative".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        let pagination = Pagination::default();
        assert_eq!(pagination.skip, 0);
        assert_eq!(pagination.limit, 100);
        assert!(pagination.validate().is_ok());
    }

    #[test]
    fn test_pagination_rejects_negatives() {
        assert!(Pagination { skip: -1, limit: 10 }.validate().is_err());
        assert!(Pagination { skip: 0, limit: -10 }.validate().is_err());
    }
}
