//! Blog posts and their relation descriptors

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::store::{ChangeSet, CreatePayload, Entity, Field, Relation, Value};

use super::{Announcement, Tag};

/// A blog post. Belongs to one category; carries tags and announcements
/// many-to-many and sections one-to-many.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    /// Publication date, distinct from the record timestamps
    pub date: Option<NaiveDate>,
    pub category_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BlogPost {
    /// Tags attached to a post
    pub const TAGS: Relation<Tag> = Relation::new("tags", "blog_post_tags", "blog_post_id", "tag_id");

    /// Announcements attached to a post
    pub const ANNOUNCEMENTS: Relation<Announcement> = Relation::new(
        "announcements",
        "blog_post_announcements",
        "blog_post_id",
        "announcement_id",
    );
}

impl Entity for BlogPost {
    const KIND: &'static str = "blog post";
    const TABLE: &'static str = "blog_posts";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "title",
        "content",
        "date",
        "category_id",
        "created_at",
        "updated_at",
    ];

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Creation payload for a blog post
#[derive(Debug, Clone, Deserialize)]
pub struct NewBlogPost {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub category_id: Uuid,
}

impl CreatePayload for NewBlogPost {
    type Entity = BlogPost;

    fn fields(&self) -> Vec<Field> {
        vec![
            ("title", Value::from(self.title.clone())),
            ("content", Value::from(self.content.clone())),
            ("date", Value::from(self.date)),
            ("category_id", Value::from(self.category_id)),
        ]
    }
}

/// Partial update for a blog post
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlogPostChanges {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub category_id: Option<Uuid>,
}

impl ChangeSet for BlogPostChanges {
    type Entity = BlogPost;

    fn changes(&self) -> Vec<Field> {
        let mut changes = Vec::new();
        if let Some(title) = &self.title {
            changes.push(("title", Value::from(title.clone())));
        }
        if let Some(content) = &self.content {
            changes.push(("content", Value::from(content.clone())));
        }
        if let Some(date) = self.date {
            changes.push(("date", Value::from(date)));
        }
        if let Some(category_id) = self.category_id {
            changes.push(("category_id", Value::from(category_id)));
        }
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_descriptors() {
        assert_eq!(BlogPost::TAGS.name, "tags");
        assert_eq!(BlogPost::TAGS.link_table, "blog_post_tags");
        assert_eq!(BlogPost::ANNOUNCEMENTS.owner_fk, "blog_post_id");
        assert_eq!(BlogPost::ANNOUNCEMENTS.related_fk, "announcement_id");
    }

    #[test]
    fn test_create_payload_requires_category() {
        let result = serde_json::from_str::<NewBlogPost>(
            r#"{"title": "Hello", "content": "World"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_changes_carry_category_reassignment() {
        let id = Uuid::new_v4();
        let changes = BlogPostChanges {
            category_id: Some(id),
            ..Default::default()
        };
        assert_eq!(changes.changes(), vec![("category_id", Value::Uuid(id))]);
    }
}
