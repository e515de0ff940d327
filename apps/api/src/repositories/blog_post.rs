//! Blog-post-specific repository operations
//!
//! The generic CRUD surface comes from `Repository<BlogPost>`; this module
//! adds the tag/announcement relation helpers and category handling the blog
//! post routes need.

use uuid::Uuid;

use super::base::{select_list, Repository};
use crate::models::{Announcement, BlogPost, BlogPostChanges, Category, Tag};
use crate::store::{Entity, StoreError, Value};

impl<'s> Repository<'s, BlogPost> {
    /// Attach a tag to a post; idempotent
    pub async fn add_tag(&mut self, blog_post_id: Uuid, tag_id: Uuid) -> Result<BlogPost, StoreError> {
        self.add_related(blog_post_id, tag_id, &BlogPost::TAGS).await
    }

    /// Detach a tag from a post; a never-attached tag is a no-op
    pub async fn remove_tag(
        &mut self,
        blog_post_id: Uuid,
        tag_id: Uuid,
    ) -> Result<BlogPost, StoreError> {
        self.remove_related(blog_post_id, tag_id, &BlogPost::TAGS)
            .await
    }

    /// All tags attached to a post
    pub async fn tags(&mut self, blog_post_id: Uuid) -> Result<Vec<Tag>, StoreError> {
        self.list_related(blog_post_id, &BlogPost::TAGS).await
    }

    /// Attach an announcement to a post; idempotent
    pub async fn add_announcement(
        &mut self,
        blog_post_id: Uuid,
        announcement_id: Uuid,
    ) -> Result<BlogPost, StoreError> {
        self.add_related(blog_post_id, announcement_id, &BlogPost::ANNOUNCEMENTS)
            .await
    }

    /// Detach an announcement from a post
    pub async fn remove_announcement(
        &mut self,
        blog_post_id: Uuid,
        announcement_id: Uuid,
    ) -> Result<BlogPost, StoreError> {
        self.remove_related(blog_post_id, announcement_id, &BlogPost::ANNOUNCEMENTS)
            .await
    }

    /// All announcements attached to a post
    pub async fn announcements(
        &mut self,
        blog_post_id: Uuid,
    ) -> Result<Vec<Announcement>, StoreError> {
        self.list_related(blog_post_id, &BlogPost::ANNOUNCEMENTS)
            .await
    }

    /// Reassign a post to another category.
    ///
    /// Both sides are checked; the not-found condition names whichever one is
    /// missing. Does not commit.
    pub async fn assign_category(
        &mut self,
        blog_post_id: Uuid,
        category_id: Uuid,
    ) -> Result<BlogPost, StoreError> {
        let post = self
            .find_by_id(blog_post_id)
            .await?
            .ok_or_else(|| StoreError::not_found(BlogPost::KIND, blog_post_id))?;
        self.ensure_exists::<Category>(category_id).await?;

        let changes = BlogPostChanges {
            category_id: Some(category_id),
            ..Default::default()
        };
        self.update(&post, &changes).await
    }

    /// The category a post belongs to, `None` when the referenced row is gone
    pub async fn category(&mut self, post: &BlogPost) -> Result<Option<Category>, StoreError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = $1",
            select_list::<Category>(),
            Category::TABLE
        );
        Ok(sqlx::query_as::<_, Category>(&sql)
            .bind(post.category_id)
            .fetch_optional(&mut *self.session().conn()?)
            .await?)
    }

    /// All posts belonging to a category, paginated
    pub async fn find_by_category(
        &mut self,
        category_id: Uuid,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<BlogPost>, StoreError> {
        self.find_all(
            skip,
            limit,
            vec![("category_id".to_string(), Value::from(category_id))],
        )
        .await
    }
}
