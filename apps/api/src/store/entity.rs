//! The contract entity types implement to be managed by the repository layer
//!
//! Concrete entities (categories, tags, blog posts, ...) stay opaque to the
//! generic repository: all it needs is a table, a column list, an id, and a
//! way to turn creation/update payloads into `(column, Value)` pairs.

use std::marker::PhantomData;

use sqlx::postgres::PgRow;
use sqlx::FromRow;
use uuid::Uuid;

use super::value::Value;

/// One entity field as `(column name, value)`.
///
/// Column names are compile-time constants supplied by payload
/// implementations, so they can be spliced into SQL directly.
pub type Field = (&'static str, Value);

/// A persisted entity type.
///
/// Every Inkpress table carries `id UUID`, `created_at` and `updated_at`
/// columns; `COLUMNS` lists the full select list and doubles as the
/// whitelist for `find_all` filters.
pub trait Entity: Clone + Send + Unpin + for<'r> FromRow<'r, PgRow> {
    /// Human-readable kind used in not-found signals ("category", "tag", ...)
    const KIND: &'static str;

    /// Table name
    const TABLE: &'static str;

    /// Every selectable column, in select-list order
    const COLUMNS: &'static [&'static str];

    /// The record's unique identifier, assigned at creation and immutable
    fn id(&self) -> Uuid;
}

/// A fully-populated creation payload for an entity.
///
/// Validation of the shape happens upstream (serde at the HTTP boundary);
/// `fields` returns every column the insert should carry. Store-generated
/// columns (id, timestamps) are omitted and come back via `RETURNING`.
pub trait CreatePayload {
    type Entity: Entity;

    fn fields(&self) -> Vec<Field>;
}

/// A presence-aware partial update for an entity.
///
/// `changes` returns only the fields explicitly present in the payload; an
/// absent field leaves the stored value untouched. An empty change list makes
/// the update a no-op.
pub trait ChangeSet {
    type Entity: Entity;

    fn changes(&self) -> Vec<Field>;
}

/// Const descriptor of a named many-to-many relation from an owning entity
/// to related entities of type `R`, stored in a link table with a composite
/// primary key over the two foreign keys.
#[derive(Debug)]
pub struct Relation<R> {
    /// Relation name as exposed by the owner ("tags", "announcements")
    pub name: &'static str,

    /// Link table holding the `(owner, related)` pairs
    pub link_table: &'static str,

    /// Link-table column referencing the owner
    pub owner_fk: &'static str,

    /// Link-table column referencing the related entity
    pub related_fk: &'static str,

    related: PhantomData<fn() -> R>,
}

impl<R: Entity> Relation<R> {
    /// Define a relation; intended for `const` items on the owning model
    pub const fn new(
        name: &'static str,
        link_table: &'static str,
        owner_fk: &'static str,
        related_fk: &'static str,
    ) -> Self {
        Self {
            name,
            link_table,
            owner_fk,
            related_fk,
            related: PhantomData,
        }
    }
}
