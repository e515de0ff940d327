//! Many-to-many relation management on top of the generic repository
//!
//! Relations are described by `Relation<R>` constants on the owning model and
//! stored in link tables whose composite primary key makes each pair a set
//! member: adding a present pair and removing an absent one are both no-ops.
//! None of these operations commit; the caller owns the transaction boundary.

use uuid::Uuid;

use super::base::{qualified_select_list, Repository};
use crate::store::{Entity, Relation, StoreError};

impl<'s, E: Entity> Repository<'s, E> {
    /// Add a related entity to one of the owner's relation collections.
    ///
    /// Fails with a not-found condition naming the missing side when either
    /// the owner or the related record does not exist. Returns the (possibly
    /// unchanged) owner.
    pub async fn add_related<R: Entity>(
        &mut self,
        owner_id: Uuid,
        related_id: Uuid,
        relation: &Relation<R>,
    ) -> Result<E, StoreError> {
        let owner = self.require_owner(owner_id).await?;
        self.ensure_exists::<R>(related_id).await?;

        let sql = format!(
            "INSERT INTO {} ({}, {}) VALUES ($1, $2) ON CONFLICT DO NOTHING",
            relation.link_table, relation.owner_fk, relation.related_fk
        );
        let result = sqlx::query(&sql)
            .bind(owner_id)
            .bind(related_id)
            .execute(&mut *self.session().conn()?)
            .await;
        self.finish_write(result).await?;
        Ok(owner)
    }

    /// Remove a related entity from one of the owner's relation collections.
    ///
    /// Same existence checks as `add_related`; removing a pair that was never
    /// added is a no-op. Returns the owner.
    pub async fn remove_related<R: Entity>(
        &mut self,
        owner_id: Uuid,
        related_id: Uuid,
        relation: &Relation<R>,
    ) -> Result<E, StoreError> {
        let owner = self.require_owner(owner_id).await?;
        self.ensure_exists::<R>(related_id).await?;

        let sql = format!(
            "DELETE FROM {} WHERE {} = $1 AND {} = $2",
            relation.link_table, relation.owner_fk, relation.related_fk
        );
        let result = sqlx::query(&sql)
            .bind(owner_id)
            .bind(related_id)
            .execute(&mut *self.session().conn()?)
            .await;
        self.finish_write(result).await?;
        Ok(owner)
    }

    /// List the current contents of one of the owner's relation collections
    pub async fn list_related<R: Entity>(
        &mut self,
        owner_id: Uuid,
        relation: &Relation<R>,
    ) -> Result<Vec<R>, StoreError> {
        self.require_owner(owner_id).await?;

        let sql = format!(
            "SELECT {} FROM {} r INNER JOIN {} l ON l.{} = r.id \
             WHERE l.{} = $1 ORDER BY r.created_at, r.id",
            qualified_select_list::<R>("r"),
            R::TABLE,
            relation.link_table,
            relation.related_fk,
            relation.owner_fk
        );
        Ok(sqlx::query_as::<_, R>(&sql)
            .bind(owner_id)
            .fetch_all(&mut *self.session().conn()?)
            .await?)
    }

    /// Load the owning record, signalling which kind and id was missing
    async fn require_owner(&mut self, owner_id: Uuid) -> Result<E, StoreError> {
        self.find_by_id(owner_id)
            .await?
            .ok_or_else(|| StoreError::not_found(E::KIND, owner_id))
    }

    /// Probe a record of another entity kind by id
    pub(crate) async fn ensure_exists<R: Entity>(&mut self, id: Uuid) -> Result<(), StoreError> {
        let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)", R::TABLE);
        let exists: bool = sqlx::query_scalar(&sql)
            .bind(id)
            .fetch_one(&mut *self.session().conn()?)
            .await?;
        if exists {
            Ok(())
        } else {
            Err(StoreError::not_found(R::KIND, id))
        }
    }
}
