//! Test fixtures for API integration tests

#![allow(dead_code)]

use serde_json::{json, Value};

/// A valid category creation body
pub fn category_body(name: &str) -> Value {
    json!({ "name": name, "description": "posts about systems" })
}

/// A valid tag creation body
pub fn tag_body(name: &str) -> Value {
    json!({ "name": name })
}

/// A valid announcement creation body
pub fn announcement_body(name: &str) -> Value {
    json!({ "name": name, "url": "https://example.com" })
}

/// A valid user creation body
pub fn user_body(email: &str) -> Value {
    json!({
        "email": email,
        "full_name": "Ada Lovelace",
        "password": "correct horse battery staple",
    })
}
