pub mod catalog;
pub mod client;
pub mod error;
pub mod normalize;
pub mod parse;
pub mod types;

pub use catalog::{is_aviation_experience, FeedCatalog};
pub use client::FeedClient;
pub use error::FeedError;
pub use normalize::{add_utm_params, normalize_item};
pub use parse::parse_shop_feed;
pub use types::{RawItem, RawVariant};
