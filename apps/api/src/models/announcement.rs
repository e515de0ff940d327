//! Announcements shown alongside blog posts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::store::{ChangeSet, CreatePayload, Entity, Field, Value};

/// An announcement, attachable to blog posts many-to-many
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Announcement {
    pub id: Uuid,
    pub name: String,
    pub url: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Announcement {
    const KIND: &'static str = "announcement";
    const TABLE: &'static str = "announcements";
    const COLUMNS: &'static [&'static str] =
        &["id", "name", "url", "image_url", "created_at", "updated_at"];

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Creation payload for an announcement
#[derive(Debug, Clone, Deserialize)]
pub struct NewAnnouncement {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl CreatePayload for NewAnnouncement {
    type Entity = Announcement;

    fn fields(&self) -> Vec<Field> {
        vec![
            ("name", Value::from(self.name.clone())),
            ("url", Value::from(self.url.clone())),
            ("image_url", Value::from(self.image_url.clone())),
        ]
    }
}

/// Partial update for an announcement
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnnouncementChanges {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl ChangeSet for AnnouncementChanges {
    type Entity = Announcement;

    fn changes(&self) -> Vec<Field> {
        let mut changes = Vec::new();
        if let Some(name) = &self.name {
            changes.push(("name", Value::from(name.clone())));
        }
        if let Some(url) = &self.url {
            changes.push(("url", Value::from(url.clone())));
        }
        if let Some(image_url) = &self.image_url {
            changes.push(("image_url", Value::from(image_url.clone())));
        }
        changes
    }
}
