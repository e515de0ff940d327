//! Database models for Inkpress
//!
//! Each entity module holds the persisted struct, its creation payload
//! (`New*`) and its presence-aware partial update (`*Changes`), together with
//! the `Entity`/`CreatePayload`/`ChangeSet` impls the repository layer
//! operates on.

pub mod announcement;
pub mod blog_post;
pub mod category;
pub mod section;
pub mod tag;
pub mod user;

pub use announcement::{Announcement, AnnouncementChanges, NewAnnouncement};
pub use blog_post::{BlogPost, BlogPostChanges, NewBlogPost};
pub use category::{Category, CategoryChanges, NewCategory};
pub use section::{NewSection, Section, SectionChanges};
pub use tag::{NewTag, Tag, TagChanges};
pub use user::{Language, NewUser, PasswordChange, User, UserChanges, UserRole};
