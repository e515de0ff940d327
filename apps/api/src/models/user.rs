//! User accounts
//!
//! Passwords are hashed before they reach the store; the plaintext never
//! appears in a persisted field map, and `password_hash` is never serialized
//! into a response.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::store::{ChangeSet, Entity, Field, Value};

/// User role stored as text in the users table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Owner,
    #[default]
    User,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Owner => "owner",
            Self::User => "user",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for UserRole {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "admin" => Ok(Self::Admin),
            "owner" => Ok(Self::Owner),
            "user" => Ok(Self::User),
            other => Err(format!("unknown user role: {}", other)),
        }
    }
}

/// Preferred interface language stored as text in the users table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Es,
    En,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Es => "es",
            Self::En => "en",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Language {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "es" => Ok(Self::Es),
            "en" => Ok(Self::En),
            other => Err(format!("unknown language: {}", other)),
        }
    }
}

/// User account from the users table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,

    /// Email address (unique)
    pub email: String,

    /// Optional unique handle
    pub username: Option<String>,

    /// Full display name
    pub full_name: String,

    /// Argon2id hashed password
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Role (admin, owner, user)
    #[sqlx(try_from = "String")]
    pub role: UserRole,

    /// Short profile text
    pub bio: Option<String>,

    /// URL to the user's avatar image
    pub avatar_url: Option<String>,

    /// Personal website
    pub website: Option<String>,

    /// Free-form location
    pub location: Option<String>,

    /// IANA timezone name
    pub timezone: String,

    /// Preferred interface language
    #[sqlx(try_from = "String")]
    pub language: Language,

    /// Whether the user receives email notifications
    pub email_notifications: bool,

    /// Whether the account is active
    pub is_active: bool,

    /// Whether the account has been verified
    pub is_verified: bool,

    /// Account creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last profile update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Entity for User {
    const KIND: &'static str = "user";
    const TABLE: &'static str = "users";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "email",
        "username",
        "full_name",
        "password_hash",
        "role",
        "bio",
        "avatar_url",
        "website",
        "location",
        "timezone",
        "language",
        "email_notifications",
        "is_active",
        "is_verified",
        "created_at",
        "updated_at",
    ];

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Creation payload for a user account.
///
/// Carries the plaintext password, so it does not implement `CreatePayload`;
/// the route hashes the password and persists the shaped field map through
/// `create_from_fields` instead.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub email: String,
    #[serde(default)]
    pub username: Option<String>,
    pub full_name: String,
    pub password: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default)]
    pub language: Language,
    #[serde(default = "default_true")]
    pub email_notifications: bool,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_true() -> bool {
    true
}

impl NewUser {
    /// Field map for persistence, with the plaintext password replaced by
    /// the given hash
    pub fn fields_with_hash(&self, password_hash: String) -> Vec<Field> {
        vec![
            ("email", Value::from(self.email.to_lowercase())),
            ("username", Value::from(self.username.clone())),
            ("full_name", Value::from(self.full_name.clone())),
            ("password_hash", Value::from(password_hash)),
            ("role", Value::from(self.role.as_str())),
            ("bio", Value::from(self.bio.clone())),
            ("avatar_url", Value::from(self.avatar_url.clone())),
            ("website", Value::from(self.website.clone())),
            ("location", Value::from(self.location.clone())),
            ("timezone", Value::from(self.timezone.clone())),
            ("language", Value::from(self.language.as_str())),
            (
                "email_notifications",
                Value::from(self.email_notifications),
            ),
        ]
    }
}

/// Partial profile update for a user; absent fields stay unchanged
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserChanges {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub language: Option<Language>,
    #[serde(default)]
    pub email_notifications: Option<bool>,
}

impl ChangeSet for UserChanges {
    type Entity = User;

    fn changes(&self) -> Vec<Field> {
        let mut changes = Vec::new();
        if let Some(email) = &self.email {
            changes.push(("email", Value::from(email.to_lowercase())));
        }
        if let Some(username) = &self.username {
            changes.push(("username", Value::from(username.clone())));
        }
        if let Some(full_name) = &self.full_name {
            changes.push(("full_name", Value::from(full_name.clone())));
        }
        if let Some(bio) = &self.bio {
            changes.push(("bio", Value::from(bio.clone())));
        }
        if let Some(avatar_url) = &self.avatar_url {
            changes.push(("avatar_url", Value::from(avatar_url.clone())));
        }
        if let Some(website) = &self.website {
            changes.push(("website", Value::from(website.clone())));
        }
        if let Some(location) = &self.location {
            changes.push(("location", Value::from(location.clone())));
        }
        if let Some(timezone) = &self.timezone {
            changes.push(("timezone", Value::from(timezone.clone())));
        }
        if let Some(language) = self.language {
            changes.push(("language", Value::from(language.as_str())));
        }
        if let Some(email_notifications) = self.email_notifications {
            changes.push(("email_notifications", Value::from(email_notifications)));
        }
        changes
    }
}

/// Internal changeset for replacing a user's password hash
#[derive(Debug, Clone)]
pub struct PasswordChange {
    pub password_hash: String,
}

impl ChangeSet for PasswordChange {
    type Entity = User;

    fn changes(&self) -> Vec<Field> {
        vec![("password_hash", Value::from(self.password_hash.clone()))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [UserRole::Admin, UserRole::Owner, UserRole::User] {
            assert_eq!(UserRole::try_from(role.to_string()).unwrap(), role);
        }
        assert!(UserRole::try_from("root".to_string()).is_err());
    }

    #[test]
    fn test_user_serialization_hides_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            email: "ada@example.com".to_string(),
            username: None,
            full_name: "Ada Lovelace".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            role: UserRole::User,
            bio: None,
            avatar_url: None,
            website: None,
            location: None,
            timezone: "UTC".to_string(),
            language: Language::En,
            email_notifications: true,
            is_active: true,
            is_verified: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("argon2id"));
    }

    #[test]
    fn test_fields_with_hash_excludes_plaintext() {
        let payload: NewUser = serde_json::from_str(
            r#"{"email": "Ada@Example.com", "full_name": "Ada", "password": "hunter2secret"}"#,
        )
        .unwrap();
        let fields = payload.fields_with_hash("hashed".to_string());
        assert!(fields.iter().all(|(column, _)| *column != "password"));
        assert!(fields
            .iter()
            .any(|(column, value)| *column == "password_hash"
                && *value == Value::Text("hashed".to_string())));
        assert!(fields
            .iter()
            .any(|(column, value)| *column == "email"
                && *value == Value::Text("ada@example.com".to_string())));
    }

    #[test]
    fn test_new_user_defaults() {
        let payload: NewUser = serde_json::from_str(
            r#"{"email": "a@b.c", "full_name": "A", "password": "longenough"}"#,
        )
        .unwrap();
        assert_eq!(payload.role, UserRole::User);
        assert_eq!(payload.language, Language::Es);
        assert_eq!(payload.timezone, "UTC");
        assert!(payload.email_notifications);
    }
}
