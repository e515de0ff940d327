//! Blog post tags

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::store::{ChangeSet, CreatePayload, Entity, Field, Value};

/// A tag, attached to blog posts many-to-many. Names are unique.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Tag {
    const KIND: &'static str = "tag";
    const TABLE: &'static str = "tags";
    const COLUMNS: &'static [&'static str] = &["id", "name", "created_at", "updated_at"];

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Creation payload for a tag
#[derive(Debug, Clone, Deserialize)]
pub struct NewTag {
    pub name: String,
}

impl CreatePayload for NewTag {
    type Entity = Tag;

    fn fields(&self) -> Vec<Field> {
        vec![("name", Value::from(self.name.clone()))]
    }
}

/// Partial update for a tag
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagChanges {
    #[serde(default)]
    pub name: Option<String>,
}

impl ChangeSet for TagChanges {
    type Entity = Tag;

    fn changes(&self) -> Vec<Field> {
        let mut changes = Vec::new();
        if let Some(name) = &self.name {
            changes.push(("name", Value::from(name.clone())));
        }
        changes
    }
}
