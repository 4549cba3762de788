pub mod error;
pub mod loader;
pub mod post;

pub use error::BlogError;
pub use loader::{load_posts, post_by_slug};
pub use post::BlogPost;
