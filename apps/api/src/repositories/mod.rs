//! Database repository layer for Inkpress
//!
//! This module provides the data access layer, centralizing all database
//! operations into a generic, entity-agnostic repository. This pattern:
//! - Gives every entity the same create/read/update/delete contract
//! - Keeps transaction semantics (rollback on failure, caller-owned commit)
//!   consistent across the codebase
//! - Makes the per-entity repositories thin: an alias plus whatever
//!   entity-specific queries the routes need

pub mod base;
pub mod blog_post;
pub mod relations;
pub mod section;
pub mod user;

pub use base::Repository;

use crate::models::{Announcement, BlogPost, Category, Section, Tag, User};

/// Repository over categories
pub type CategoryRepository<'s> = Repository<'s, Category>;

/// Repository over tags
pub type TagRepository<'s> = Repository<'s, Tag>;

/// Repository over blog posts, including tag/announcement relation management
pub type BlogPostRepository<'s> = Repository<'s, BlogPost>;

/// Repository over blog post sections
pub type SectionRepository<'s> = Repository<'s, Section>;

/// Repository over announcements
pub type AnnouncementRepository<'s> = Repository<'s, Announcement>;

/// Repository over user accounts
pub type UserRepository<'s> = Repository<'s, User>;
