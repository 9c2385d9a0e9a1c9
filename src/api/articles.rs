use serde::Serialize;
use tracing::info;

use super::ArticleBackend;
use crate::{
    client::ArticleService,
    error::ClientError,
    http::{HttpClient, HttpRequest},
    models::{normalize_listing, Article, ArticleId},
};

/// Body of `POST {"method": "create", "article": ...}`.
#[derive(Debug, Serialize)]
#[serde(tag = "method", rename = "create")]
pub struct CreateRequest<'a> {
    pub article: &'a Article,
}

/// Body of `POST {"method": "delete", "id": ...}`.
#[derive(Debug, Serialize)]
#[serde(tag = "method", rename = "delete")]
pub struct DeleteRequest<'a> {
    pub id: &'a ArticleId,
}

impl ArticleService {
    pub async fn articles(&self) -> Result<Vec<Article>, ClientError> {
        let body = self
            .request_json(HttpRequest::get().header("Accept", "application/json"))
            .await?;
        let articles = normalize_listing(body);
        info!(count = articles.len(), "Fetched article listing");
        Ok(articles)
    }

    pub async fn create(&self, article: &Article) -> Result<(), ClientError> {
        self.request_empty(HttpRequest::post().json(&CreateRequest { article })?)
            .await?;
        info!(id = ?article.id, "Article created");
        Ok(())
    }

    pub async fn delete(&self, id: &ArticleId) -> Result<(), ClientError> {
        self.request_empty(HttpRequest::post().json(&DeleteRequest { id })?)
            .await?;
        info!(%id, "Article deleted");
        Ok(())
    }
}

#[async_trait::async_trait]
impl ArticleBackend for ArticleService {
    async fn list_articles(&self) -> Result<Vec<Article>, ClientError> {
        self.articles().await
    }

    async fn create_article(&self, article: &Article) -> Result<(), ClientError> {
        self.create(article).await
    }

    async fn delete_article(&self, id: &ArticleId) -> Result<(), ClientError> {
        self.delete(id).await
    }
}
