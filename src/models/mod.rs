mod article;
mod listing;

pub use article::{Article, ArticleId, Category};
pub use listing::{normalize_listing, ArticleListing};
