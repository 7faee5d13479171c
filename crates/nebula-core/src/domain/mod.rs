//! Domain entities - the core business objects.

mod category;
mod comment;
mod draft;
mod filter;
mod post;

pub use category::Category;
pub use comment::{Comment, GUEST_AUTHOR, NewComment, avatar_url};
pub use draft::{NewPost, PostDraft, PostUpdate};
pub use filter::{CategoryFilter, PostFilter};
pub use post::{Post, now_millis};
