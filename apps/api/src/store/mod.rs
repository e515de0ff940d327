//! Persistence layer primitives for Inkpress
//!
//! This module provides the building blocks the repository layer is made of:
//! - `Session`: one transaction per request, with explicit boundary control
//! - `Entity` / `CreatePayload` / `ChangeSet`: the contract an entity type
//!   implements to be managed by the generic repository
//! - `Value`: an owned SQL value used to carry opaque field maps to the store
//! - `StoreError`: the persistence-layer error taxonomy

pub mod entity;
pub mod error;
pub mod session;
pub mod value;

pub use entity::{ChangeSet, CreatePayload, Entity, Field, Relation};
pub use error::StoreError;
pub use session::Session;
pub use value::Value;
