use async_trait::async_trait;
use std::fmt;
use crate::types::Article;
use crate::Result;

#[async_trait]
pub trait NewsScraper: Send + Sync + fmt::Debug {
    /// Human readable name used in logs
    fn name(&self) -> &str;

    /// Search every source the scraper knows about, filtered by the user's interests
    async fn search_news(&self, query: &str, interests: &[String]) -> Result<Vec<Article>>;

    /// Pull the full text of a single article
    async fn extract_article_content(&self, url: &str) -> Result<String>;
}

#[async_trait]
pub trait NewsAggregator: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Fetch aggregated articles matching a query
    async fn fetch_news(&self, query: &str) -> Result<Vec<Article>>;
}
