//! Per-request unit of work
//!
//! The transport layer opens one `Session` per incoming request, hands it to
//! the repositories it constructs, and commits when the request succeeds.
//! Dropping an uncommitted session rolls the transaction back, so error paths
//! that bail with `?` leave no partial state behind.

use sqlx::postgres::PgConnection;
use sqlx::{PgPool, Postgres, Transaction};

use super::error::StoreError;

/// A single database transaction with explicit boundary control.
///
/// Sessions are not `Clone` and must not be shared across requests; each
/// repository instance borrows the session it was constructed with.
pub struct Session {
    tx: Option<Transaction<'static, Postgres>>,
}

impl Session {
    /// Begin a new transaction from the pool
    pub async fn begin(pool: &PgPool) -> Result<Self, StoreError> {
        Ok(Self {
            tx: Some(pool.begin().await?),
        })
    }

    /// Commit the transaction. The session is closed afterwards; further
    /// operations fail with `StoreError::Closed`.
    pub async fn commit(&mut self) -> Result<(), StoreError> {
        match self.tx.take() {
            Some(tx) => Ok(tx.commit().await?),
            None => Err(StoreError::Closed),
        }
    }

    /// Roll the transaction back and close the session
    pub async fn rollback(&mut self) -> Result<(), StoreError> {
        match self.tx.take() {
            Some(tx) => Ok(tx.rollback().await?),
            None => Err(StoreError::Closed),
        }
    }

    /// Synchronize pending changes with the store without finalizing the
    /// transaction.
    ///
    /// Statements execute eagerly inside the transaction and inserts return
    /// store-generated values via `RETURNING`, so there is nothing buffered
    /// to send; this only verifies the session is still open.
    pub fn flush(&mut self) -> Result<(), StoreError> {
        self.conn().map(|_| ())
    }

    /// Whether the session can still execute statements
    pub fn is_open(&self) -> bool {
        self.tx.is_some()
    }

    /// The live connection, or `Closed` when the transaction has finished
    pub(crate) fn conn(&mut self) -> Result<&mut PgConnection, StoreError> {
        self.tx.as_deref_mut().ok_or(StoreError::Closed)
    }
}
