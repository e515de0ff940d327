//! Owned SQL values for generic query assembly
//!
//! The generic repository receives entity fields as `(column, Value)` pairs,
//! keeping it agnostic of the concrete entity shape while still binding every
//! value through sqlx placeholders.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

/// An owned SQL value that can be bound into a query.
///
/// `Null` is rendered as a SQL `NULL` literal since Postgres cannot infer the
/// type of an untyped null placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Uuid(Uuid),
    Text(String),
    Int(i32),
    Bool(bool),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
    Json(serde_json::Value),
    Null,
}

impl Value {
    /// Push this value onto a query, either as a bind placeholder or as a
    /// `NULL` literal.
    pub(crate) fn push_to(self, builder: &mut QueryBuilder<'_, Postgres>) {
        match self {
            Value::Uuid(v) => {
                builder.push_bind(v);
            }
            Value::Text(v) => {
                builder.push_bind(v);
            }
            Value::Int(v) => {
                builder.push_bind(v);
            }
            Value::Bool(v) => {
                builder.push_bind(v);
            }
            Value::Date(v) => {
                builder.push_bind(v);
            }
            Value::Timestamp(v) => {
                builder.push_bind(v);
            }
            Value::Json(v) => {
                builder.push_bind(v);
            }
            Value::Null => {
                builder.push("NULL");
            }
        }
    }

    /// Whether this value is the SQL null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Uuid(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Json(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_none_becomes_null() {
        let value: Value = Option::<String>::None.into();
        assert!(value.is_null());
    }

    #[test]
    fn test_option_some_unwraps() {
        let value: Value = Some("hello".to_string()).into();
        assert_eq!(value, Value::Text("hello".to_string()));
    }

    #[test]
    fn test_null_renders_as_literal() {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT ");
        Value::Null.push_to(&mut builder);
        assert_eq!(builder.sql(), "SELECT NULL");
    }

    #[test]
    fn test_bound_values_render_as_placeholders() {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT ");
        Value::from(1).push_to(&mut builder);
        builder.push(", ");
        Value::from(true).push_to(&mut builder);
        assert_eq!(builder.sql(), "SELECT $1, $2");
    }
}
