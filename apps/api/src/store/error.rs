//! Typed error type for the persistence layer

use thiserror::Error;
use uuid::Uuid;

/// Errors produced by sessions and repositories.
///
/// `NotFound` carries which entity kind and which id was missing so the HTTP
/// layer can report the failing side of a relation operation. Single-record
/// lookups signal absence through `Option` instead and never produce it.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record required by the operation does not exist
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: Uuid },

    /// A filter referenced a field the entity does not have
    #[error("invalid filter field '{field}' for {kind}")]
    InvalidFilter { kind: &'static str, field: String },

    /// The session was already committed or rolled back
    #[error("session is closed")]
    Closed,

    /// Underlying database failure; the repository rolls the session back
    /// before propagating this
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Create a not-found error for a specific entity kind and id
    pub fn not_found(kind: &'static str, id: Uuid) -> Self {
        Self::NotFound { kind, id }
    }

    /// Whether the underlying database error is a unique-constraint violation
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::Database(sqlx::Error::Database(db)) => db.is_unique_violation(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display_names_kind_and_id() {
        let id = Uuid::nil();
        let err = StoreError::not_found("category", id);
        let message = err.to_string();
        assert!(message.contains("category"));
        assert!(message.contains(&id.to_string()));
    }

    #[test]
    fn test_invalid_filter_display() {
        let err = StoreError::InvalidFilter {
            kind: "tag",
            field: "colour".to_string(),
        };
        assert_eq!(err.to_string(), "invalid filter field 'colour' for tag");
    }
}
