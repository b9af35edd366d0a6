use std::fmt;
use serde_json::json;
use nd_core::{Article, NewsAggregator, NewsScraper, Result};

/// Offline stand-in for the scraper service. Answers are derived from the
/// input so runs stay deterministic.
pub struct DummyScraper;

impl fmt::Debug for DummyScraper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyScraper").finish()
    }
}

impl DummyScraper {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DummyScraper {
    fn default() -> Self {
        Self::new()
    }
}

fn dummy_article(topic: &str, slug: &str) -> Article {
    Article::new(json!({
        "title": format!("Latest on {}", topic),
        "url": format!("https://news.example/{}", slug),
        "source": "dummy",
        "summary": format!("A placeholder story about {}.", topic),
    }))
}

fn slugify(text: &str) -> String {
    text.split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

#[async_trait::async_trait]
impl NewsScraper for DummyScraper {
    fn name(&self) -> &str {
        "Dummy scraper"
    }

    async fn search_news(&self, query: &str, interests: &[String]) -> Result<Vec<Article>> {
        let mut articles = vec![dummy_article(query, &slugify(query))];
        articles.extend(interests.iter().map(|interest| {
            let topic = format!("{} ({})", query, interest);
            dummy_article(&topic, &format!("{}/{}", slugify(query), slugify(interest)))
        }));
        Ok(articles)
    }

    async fn extract_article_content(&self, url: &str) -> Result<String> {
        Ok(format!(
            "Placeholder article body for {}. The dummy scraper does not fetch pages.",
            url
        ))
    }
}

/// Offline stand-in for the aggregator service.
pub struct DummyAggregator;

impl fmt::Debug for DummyAggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyAggregator").finish()
    }
}

impl DummyAggregator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DummyAggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl NewsAggregator for DummyAggregator {
    fn name(&self) -> &str {
        "Dummy aggregator"
    }

    async fn fetch_news(&self, query: &str) -> Result<Vec<Article>> {
        let slug = slugify(query);
        Ok(vec![
            dummy_article(query, &format!("{}/1", slug)),
            dummy_article(&format!("{}, analysis", query), &format!("{}/2", slug)),
        ])
    }
}
