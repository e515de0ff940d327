//! Generic repository with fundamental data-access operations
//!
//! A `Repository<E>` is bound at construction to one entity type and one live
//! `Session`. It never owns the happy-path transaction boundary: the caller
//! decides when the unit of work ends, so several repository calls can
//! compose into one atomic transaction. On a failed write the repository
//! rolls the session back before propagating, so the caller never observes a
//! half-failed transaction.

use std::marker::PhantomData;

use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::store::{ChangeSet, CreatePayload, Entity, Field, Session, StoreError, Value};

/// Generic repository over one entity type and one session
pub struct Repository<'s, E> {
    session: &'s mut Session,
    entity: PhantomData<fn() -> E>,
}

impl<'s, E: Entity> Repository<'s, E> {
    /// Bind a repository to a live session
    pub fn new(session: &'s mut Session) -> Self {
        Self {
            session,
            entity: PhantomData,
        }
    }

    /// Create a new record from a validated creation payload.
    ///
    /// Returns the record as the store synchronized it, with generated id and
    /// timestamps populated. Rolls back and propagates on failure.
    pub async fn create<P>(&mut self, payload: &P) -> Result<E, StoreError>
    where
        P: CreatePayload<Entity = E>,
    {
        self.create_from_fields(payload.fields()).await
    }

    /// Create a new record from an already-shaped field map.
    ///
    /// Used when the caller must transform input before persistence, like
    /// replacing a plaintext password with its hash.
    pub async fn create_from_fields(&mut self, fields: Vec<Field>) -> Result<E, StoreError> {
        let mut builder = build_insert::<E>(fields);
        let result = builder
            .build_query_as::<E>()
            .fetch_one(&mut *self.session.conn()?)
            .await;
        self.finish_write(result).await
    }

    /// Fetch a single record by id; absence is a value, not an error
    pub async fn find_by_id(&mut self, id: Uuid) -> Result<Option<E>, StoreError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = $1",
            select_list::<E>(),
            E::TABLE
        );
        Ok(sqlx::query_as::<_, E>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.session.conn()?)
            .await?)
    }

    /// Fetch a page of records under a stable ordering.
    ///
    /// `filters` restricts results to exact-match equality on named fields; a
    /// filter key that is not a column of the entity is rejected up front
    /// with `InvalidFilter`.
    pub async fn find_all(
        &mut self,
        skip: i64,
        limit: i64,
        filters: Vec<(String, Value)>,
    ) -> Result<Vec<E>, StoreError> {
        let mut builder = build_list::<E>(skip, limit, filters)?;
        Ok(builder
            .build_query_as::<E>()
            .fetch_all(&mut *self.session.conn()?)
            .await?)
    }

    /// Apply a partial update to an existing record.
    ///
    /// Only fields present in the changeset are written (a merge, not a
    /// replace); an empty changeset issues no SQL and returns the record
    /// unchanged. Rolls back and propagates on failure.
    pub async fn update<C>(&mut self, existing: &E, changes: &C) -> Result<E, StoreError>
    where
        C: ChangeSet<Entity = E>,
    {
        let changes = changes.changes();
        if changes.is_empty() {
            return Ok(existing.clone());
        }
        let mut builder = build_update::<E>(existing.id(), changes);
        let result = builder
            .build_query_as::<E>()
            .fetch_one(&mut *self.session.conn()?)
            .await;
        self.finish_write(result).await
    }

    /// Delete a record.
    ///
    /// A foreign-key violation (the record is still referenced) rolls back
    /// and propagates; it is never swallowed.
    pub async fn delete(&mut self, existing: &E) -> Result<(), StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", E::TABLE);
        let result = sqlx::query(&sql)
            .bind(existing.id())
            .execute(&mut *self.session.conn()?)
            .await;
        self.finish_write(result).await?;
        Ok(())
    }

    /// Commit the bound session
    pub async fn commit(&mut self) -> Result<(), StoreError> {
        self.session.commit().await
    }

    /// Roll the bound session back
    pub async fn rollback(&mut self) -> Result<(), StoreError> {
        self.session.rollback().await
    }

    /// Synchronize pending changes without finalizing the transaction
    pub fn flush(&mut self) -> Result<(), StoreError> {
        self.session.flush()
    }

    /// The session this repository is bound to
    pub(crate) fn session(&mut self) -> &mut Session {
        self.session
    }

    /// On a failed write, restore the session to a clean rolled-back state
    /// before handing the failure to the caller.
    pub(crate) async fn finish_write<T, Err>(&mut self, result: Result<T, Err>) -> Result<T, StoreError>
    where
        StoreError: From<Err>,
    {
        match result {
            Ok(value) => Ok(value),
            Err(err) => {
                if let Err(rollback_err) = self.session.rollback().await {
                    tracing::warn!(
                        error = %rollback_err,
                        "rollback after failed write also failed"
                    );
                }
                Err(err.into())
            }
        }
    }
}

/// Select list for an entity
pub(crate) fn select_list<E: Entity>() -> String {
    E::COLUMNS.join(", ")
}

/// Select list with every column qualified by a table alias
pub(crate) fn qualified_select_list<E: Entity>(alias: &str) -> String {
    E::COLUMNS
        .iter()
        .map(|column| format!("{}.{}", alias, column))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Resolve a runtime filter key to its canonical column name, rejecting keys
/// the entity does not have. Only the canonical `&'static str` ever reaches
/// the SQL text.
fn validate_filter_column<E: Entity>(field: &str) -> Result<&'static str, StoreError> {
    E::COLUMNS
        .iter()
        .find(|column| **column == field)
        .copied()
        .ok_or_else(|| StoreError::InvalidFilter {
            kind: E::KIND,
            field: field.to_string(),
        })
}

fn build_insert<E: Entity>(fields: Vec<Field>) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("INSERT INTO ");
    builder.push(E::TABLE);
    if fields.is_empty() {
        builder.push(" DEFAULT VALUES");
    } else {
        builder.push(" (");
        for (i, (column, _)) in fields.iter().enumerate() {
            if i > 0 {
                builder.push(", ");
            }
            builder.push(*column);
        }
        builder.push(") VALUES (");
        for (i, (_, value)) in fields.into_iter().enumerate() {
            if i > 0 {
                builder.push(", ");
            }
            value.push_to(&mut builder);
        }
        builder.push(")");
    }
    builder.push(" RETURNING ");
    builder.push(select_list::<E>());
    builder
}

fn build_list<E: Entity>(
    skip: i64,
    limit: i64,
    filters: Vec<(String, Value)>,
) -> Result<QueryBuilder<'static, Postgres>, StoreError> {
    let mut builder = QueryBuilder::new("SELECT ");
    builder.push(select_list::<E>());
    builder.push(" FROM ");
    builder.push(E::TABLE);
    for (i, (field, value)) in filters.into_iter().enumerate() {
        let column = validate_filter_column::<E>(&field)?;
        builder.push(if i == 0 { " WHERE " } else { " AND " });
        builder.push(column);
        if value.is_null() {
            builder.push(" IS NULL");
        } else {
            builder.push(" = ");
            value.push_to(&mut builder);
        }
    }
    builder.push(" ORDER BY created_at, id LIMIT ");
    builder.push_bind(limit);
    builder.push(" OFFSET ");
    builder.push_bind(skip);
    Ok(builder)
}

fn build_update<E: Entity>(id: Uuid, changes: Vec<Field>) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("UPDATE ");
    builder.push(E::TABLE);
    builder.push(" SET ");
    for (i, (column, value)) in changes.into_iter().enumerate() {
        if i > 0 {
            builder.push(", ");
        }
        builder.push(column);
        builder.push(" = ");
        value.push_to(&mut builder);
    }
    builder.push(", updated_at = now() WHERE id = ");
    builder.push_bind(id);
    builder.push(" RETURNING ");
    builder.push(select_list::<E>());
    builder
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use assert_matches::assert_matches;

    #[test]
    fn test_insert_sql_binds_values_and_renders_nulls() {
        let builder = build_insert::<Category>(vec![
            ("name", Value::from("Rust")),
            ("description", Value::Null),
        ]);
        assert_eq!(
            builder.sql(),
            "INSERT INTO categories (name, description) VALUES ($1, NULL) \
             RETURNING id, name, description, created_at, updated_at"
        );
    }

    #[test]
    fn test_insert_sql_with_no_fields_uses_defaults() {
        let builder = build_insert::<Category>(Vec::new());
        assert_eq!(
            builder.sql(),
            "INSERT INTO categories DEFAULT VALUES \
             RETURNING id, name, description, created_at, updated_at"
        );
    }

    #[test]
    fn test_list_sql_has_stable_order_and_pagination() {
        let builder = build_list::<Category>(20, 10, Vec::new()).unwrap();
        assert_eq!(
            builder.sql(),
            "SELECT id, name, description, created_at, updated_at FROM categories \
             ORDER BY created_at, id LIMIT $1 OFFSET $2"
        );
    }

    #[test]
    fn test_list_sql_with_filters() {
        let builder = build_list::<Category>(
            0,
            100,
            vec![
                ("name".to_string(), Value::from("Rust")),
                ("description".to_string(), Value::Null),
            ],
        )
        .unwrap();
        assert_eq!(
            builder.sql(),
            "SELECT id, name, description, created_at, updated_at FROM categories \
             WHERE name = $1 AND description IS NULL ORDER BY created_at, id LIMIT $2 OFFSET $3"
        );
    }

    #[test]
    fn test_list_rejects_unknown_filter_field() {
        let result = build_list::<Category>(
            0,
            100,
            vec![("colour".to_string(), Value::from("red"))],
        );
        assert_matches!(
            result.map(|_| ()),
            Err(StoreError::InvalidFilter { kind: "category", ref field }) if field == "colour"
        );
    }

    #[test]
    fn test_update_sql_touches_only_named_columns() {
        let builder = build_update::<Category>(Uuid::nil(), vec![("name", Value::from("Rust"))]);
        assert_eq!(
            builder.sql(),
            "UPDATE categories SET name = $1, updated_at = now() WHERE id = $2 \
             RETURNING id, name, description, created_at, updated_at"
        );
    }

    #[test]
    fn test_qualified_select_list() {
        assert_eq!(
            qualified_select_list::<Category>("c"),
            "c.id, c.name, c.description, c.created_at, c.updated_at"
        );
    }
}
