pub mod api;
pub mod client;
pub mod error;
pub mod feed;
pub mod http;
pub mod models;
pub mod paths;
mod serde_utils;
pub mod shell;
pub mod views;

pub mod prelude {
    pub use crate::api::ArticleBackend;
    pub use crate::client::ArticleService;
    pub use crate::feed::{FeedFilter, TagFilter};
    pub use crate::models::{Article, ArticleId, Category};
    pub use crate::shell::{Shell, View};
}
