//! Ordered content sections within a blog post

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::store::{ChangeSet, CreatePayload, Entity, Field, Value};

/// One section of a blog post, ordered by `position_order`
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Section {
    pub id: Uuid,
    pub title: String,
    pub image_url: Option<String>,
    pub content: String,
    pub position_order: i32,
    pub blog_post_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Section {
    const KIND: &'static str = "section";
    const TABLE: &'static str = "sections";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "title",
        "image_url",
        "content",
        "position_order",
        "blog_post_id",
        "created_at",
        "updated_at",
    ];

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Creation payload for a section
#[derive(Debug, Clone, Deserialize)]
pub struct NewSection {
    pub title: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub content: String,
    #[serde(default)]
    pub position_order: i32,
    pub blog_post_id: Uuid,
}

impl CreatePayload for NewSection {
    type Entity = Section;

    fn fields(&self) -> Vec<Field> {
        vec![
            ("title", Value::from(self.title.clone())),
            ("image_url", Value::from(self.image_url.clone())),
            ("content", Value::from(self.content.clone())),
            ("position_order", Value::from(self.position_order)),
            ("blog_post_id", Value::from(self.blog_post_id)),
        ]
    }
}

/// Partial update for a section
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SectionChanges {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub position_order: Option<i32>,
    #[serde(default)]
    pub blog_post_id: Option<Uuid>,
}

impl ChangeSet for SectionChanges {
    type Entity = Section;

    fn changes(&self) -> Vec<Field> {
        let mut changes = Vec::new();
        if let Some(title) = &self.title {
            changes.push(("title", Value::from(title.clone())));
        }
        if let Some(image_url) = &self.image_url {
            changes.push(("image_url", Value::from(image_url.clone())));
        }
        if let Some(content) = &self.content {
            changes.push(("content", Value::from(content.clone())));
        }
        if let Some(position_order) = self.position_order {
            changes.push(("position_order", Value::from(position_order)));
        }
        if let Some(blog_post_id) = self.blog_post_id {
            changes.push(("blog_post_id", Value::from(blog_post_id)));
        }
        changes
    }
}
