//! Section-specific repository operations

use uuid::Uuid;

use super::base::{select_list, Repository};
use crate::models::Section;
use crate::store::{Entity, StoreError};

impl<'s> Repository<'s, Section> {
    /// All sections of a blog post, in reading order
    pub async fn find_by_blog_post(
        &mut self,
        blog_post_id: Uuid,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Section>, StoreError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE blog_post_id = $1 \
             ORDER BY position_order, created_at, id LIMIT $2 OFFSET $3",
            select_list::<Section>(),
            Section::TABLE
        );
        Ok(sqlx::query_as::<_, Section>(&sql)
            .bind(blog_post_id)
            .bind(limit)
            .bind(skip)
            .fetch_all(&mut *self.session().conn()?)
            .await?)
    }
}
