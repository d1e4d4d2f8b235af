//! The idea store: every read and write of ideas, posts, tags and users.
//!
//! All operations take the caller's user id and scope themselves to it.
//! Records that are missing or belong to someone else are treated the same
//! way: reads come back empty and writes change nothing.

pub mod error;
pub mod ideas;
pub mod tags;
pub mod users;

pub use error::StoreError;
pub use ideas::{
    create_idea, delete_idea, delete_post, get_idea, ideas_for_user, posts_for_idea, update_idea,
    IdeaUpdate, UpdateOutcome,
};
pub use tags::{add_tag, delete_tag, link_tag, tags_for_idea, tags_for_user, unlink_tag, LinkChange};
pub use users::{
    authenticate, create_user, delete_user, find_user_by_username, taken, user_exists, NewUser,
};
