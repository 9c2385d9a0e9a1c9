mod articles;

pub use articles::{CreateRequest, DeleteRequest};

use crate::{
    error::ClientError,
    models::{Article, ArticleId},
};

/// The three calls the article service answers.
///
/// Implemented by [`crate::client::ArticleService`] over HTTP. The shell only
/// talks to the service through this trait.
#[async_trait::async_trait]
pub trait ArticleBackend: Send + Sync {
    /// Every article the service currently holds, normalized.
    async fn list_articles(&self) -> Result<Vec<Article>, ClientError>;

    /// The response body is not inspected.
    async fn create_article(&self, article: &Article) -> Result<(), ClientError>;

    async fn delete_article(&self, id: &ArticleId) -> Result<(), ClientError>;
}
