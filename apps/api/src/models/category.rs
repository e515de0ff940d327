//! Blog post categories

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::store::{ChangeSet, CreatePayload, Entity, Field, Value};

/// A category groups blog posts one-to-many
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Category {
    const KIND: &'static str = "category";
    const TABLE: &'static str = "categories";
    const COLUMNS: &'static [&'static str] =
        &["id", "name", "description", "created_at", "updated_at"];

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Creation payload for a category
#[derive(Debug, Clone, Deserialize)]
pub struct NewCategory {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl CreatePayload for NewCategory {
    type Entity = Category;

    fn fields(&self) -> Vec<Field> {
        vec![
            ("name", Value::from(self.name.clone())),
            ("description", Value::from(self.description.clone())),
        ]
    }
}

/// Partial update for a category; absent fields stay unchanged
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryChanges {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ChangeSet for CategoryChanges {
    type Entity = Category;

    fn changes(&self) -> Vec<Field> {
        let mut changes = Vec::new();
        if let Some(name) = &self.name {
            changes.push(("name", Value::from(name.clone())));
        }
        if let Some(description) = &self.description {
            changes.push(("description", Value::from(description.clone())));
        }
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_payload_carries_null_description() {
        let payload = NewCategory {
            name: "Rust".to_string(),
            description: None,
        };
        let fields = payload.fields();
        assert_eq!(fields[0], ("name", Value::Text("Rust".to_string())));
        assert_eq!(fields[1], ("description", Value::Null));
    }

    #[test]
    fn test_empty_changes_from_empty_body() {
        let changes: CategoryChanges = serde_json::from_str("{}").unwrap();
        assert!(changes.changes().is_empty());
    }

    #[test]
    fn test_partial_changes_only_include_present_fields() {
        let changes: CategoryChanges =
            serde_json::from_str(r#"{"description": "systems posts"}"#).unwrap();
        let changes = changes.changes();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].0, "description");
    }
}
