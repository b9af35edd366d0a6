use std::fmt;
use std::sync::Arc;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use url::Url;
use nd_core::{Article, Error, NewsAggregator, NewsScraper, Result};

#[derive(Serialize)]
struct SearchPayload<'a> {
    query: &'a str,
    interests: &'a [String],
}

#[derive(Serialize)]
struct ExtractPayload<'a> {
    url: &'a str,
}

#[derive(Serialize)]
struct FetchPayload<'a> {
    query: &'a str,
}

#[derive(Deserialize)]
struct ArticlesResponse {
    articles: Vec<Article>,
}

#[derive(Deserialize)]
struct ContentResponse {
    content: String,
}

fn normalize_base_url(base_url: &str) -> Result<String> {
    let parsed = Url::parse(base_url)
        .map_err(|e| Error::Config(format!("Invalid service URL {}: {}", base_url, e)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::Config(format!("Unsupported scheme for service URL: {}", base_url)));
    }
    Ok(base_url.trim_end_matches('/').to_string())
}

/// Pulls `message` out of an upstream error body, if it has one.
fn upstream_message(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

async fn post_json<B, R>(
    client: &Client,
    url: &str,
    payload: &B,
    service: &str,
    failure: fn(String) -> Error,
) -> Result<R>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    debug!("➡️ POST {}", url);
    let response = client.post(url).json(payload).send().await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = upstream_message(&body)
            .unwrap_or_else(|| format!("{} returned {}", service, status));
        return Err(failure(message));
    }
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Client for the multi-source scraper service.
pub struct RemoteScraper {
    client: Arc<Client>,
    base_url: String,
}

impl RemoteScraper {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(Arc::new(Client::new()), base_url)
    }

    pub fn with_client(client: Arc<Client>, base_url: &str) -> Result<Self> {
        Ok(Self {
            client,
            base_url: normalize_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl fmt::Debug for RemoteScraper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteScraper")
            .field("client", &"<reqwest::Client>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl NewsScraper for RemoteScraper {
    fn name(&self) -> &str {
        "scraper"
    }

    async fn search_news(&self, query: &str, interests: &[String]) -> Result<Vec<Article>> {
        let response: ArticlesResponse = post_json(
            &self.client,
            &format!("{}/search", self.base_url),
            &SearchPayload { query, interests },
            self.name(),
            Error::Scraping,
        )
        .await?;
        Ok(response.articles)
    }

    async fn extract_article_content(&self, url: &str) -> Result<String> {
        let response: ContentResponse = post_json(
            &self.client,
            &format!("{}/extract", self.base_url),
            &ExtractPayload { url },
            self.name(),
            Error::Scraping,
        )
        .await?;
        Ok(response.content)
    }
}

/// Client for the news aggregator service.
pub struct RemoteAggregator {
    client: Arc<Client>,
    base_url: String,
}

impl RemoteAggregator {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(Arc::new(Client::new()), base_url)
    }

    pub fn with_client(client: Arc<Client>, base_url: &str) -> Result<Self> {
        Ok(Self {
            client,
            base_url: normalize_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl fmt::Debug for RemoteAggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteAggregator")
            .field("client", &"<reqwest::Client>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl NewsAggregator for RemoteAggregator {
    fn name(&self) -> &str {
        "aggregator"
    }

    async fn fetch_news(&self, query: &str) -> Result<Vec<Article>> {
        let response: ArticlesResponse = post_json(
            &self.client,
            &format!("{}/fetch", self.base_url),
            &FetchPayload { query },
            self.name(),
            Error::Aggregation,
        )
        .await?;
        Ok(response.articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::json;

    async fn spawn_upstream(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_base_url_validation() {
        assert_eq!(RemoteScraper::new("http://localhost:4001/").unwrap().base_url(), "http://localhost:4001");
        assert!(matches!(RemoteScraper::new("localhost:4001"), Err(Error::Config(_))));
        assert!(matches!(RemoteAggregator::new("ftp://news.example"), Err(Error::Config(_))));
    }

    #[test]
    fn test_upstream_message() {
        assert_eq!(upstream_message(r#"{"message": "quota exceeded"}"#).as_deref(), Some("quota exceeded"));
        assert_eq!(upstream_message(r#"{"message": ""}"#), None);
        assert_eq!(upstream_message("<html>bad gateway</html>"), None);
    }

    #[tokio::test]
    async fn test_remote_scraper_round_trip() {
        let upstream = Router::new()
            .route(
                "/search",
                post(|Json(body): Json<Value>| async move {
                    let mut articles = vec![json!({"title": body["query"]})];
                    for interest in body["interests"].as_array().cloned().unwrap_or_default() {
                        articles.push(json!({"title": interest}));
                    }
                    Json(json!({ "articles": articles }))
                }),
            )
            .route(
                "/extract",
                post(|Json(body): Json<Value>| async move {
                    Json(json!({ "content": format!("text of {}", body["url"].as_str().unwrap_or_default()) }))
                }),
            );
        let base = spawn_upstream(upstream).await;
        let scraper = RemoteScraper::new(&base).unwrap();

        let articles = scraper
            .search_news("elections", &["economy".to_string()])
            .await
            .unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].field("title"), Some("elections"));
        assert_eq!(articles[1].field("title"), Some("economy"));

        let content = scraper.extract_article_content("https://example.com/a").await.unwrap();
        assert_eq!(content, "text of https://example.com/a");
    }

    #[tokio::test]
    async fn test_remote_aggregator_maps_upstream_failure() {
        let upstream = Router::new().route(
            "/fetch",
            post(|| async {
                (StatusCode::BAD_GATEWAY, Json(json!({ "message": "all sources down" })))
            }),
        );
        let base = spawn_upstream(upstream).await;
        let aggregator = RemoteAggregator::new(&base).unwrap();

        match aggregator.fetch_news("elections").await {
            Err(Error::Aggregation(message)) => assert_eq!(message, "all sources down"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_remote_scraper_rejects_malformed_reply() {
        let upstream = Router::new().route("/extract", post(|| async { Json(json!({ "text": "wrong field" })) }));
        let base = spawn_upstream(upstream).await;
        let scraper = RemoteScraper::new(&base).unwrap();

        let result = scraper.extract_article_content("https://example.com/a").await;
        assert!(matches!(result, Err(Error::Serialization(_))));
    }
}
