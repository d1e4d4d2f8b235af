pub mod user;
pub mod idea;
pub mod post;
pub mod tag;
pub mod dates;

pub use user::{SessionUser, User};
pub use idea::{Idea, IdeaSummary, Stage};
pub use post::Post;
pub use tag::{Tag, TagWithCount};

/// Cut `s` down to at most `max` characters, never splitting a character.
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}
