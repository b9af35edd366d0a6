use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap},
    Json,
};
use std::sync::Arc;
use tracing::{error, info};
use nd_core::{AggregateRequest, ExtractRequest, RequestBody, SearchRequest};

use crate::envelope::{AggregateData, Envelope, ExtractData, HealthReport, SearchData};
use crate::error::ApiError;
use crate::AppState;

pub const SEARCH_FAILED: &str = "Error searching news";
pub const AGGREGATE_FAILED: &str = "Error aggregating news";
pub const EXTRACT_FAILED: &str = "Error extracting article content";
pub const HEALTH_FAILED: &str = "Error checking the service";

/// Only bodies declared as `application/json` are read; anything else counts
/// as an empty body.
fn json_payload<'a>(headers: &HeaderMap, body: &'a [u8]) -> &'a [u8] {
    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"));
    if is_json {
        body
    } else {
        &[]
    }
}

fn parse<T: RequestBody>(headers: &HeaderMap, body: &[u8]) -> Result<T, ApiError> {
    T::from_slice(json_payload(headers, body)).map_err(|e| {
        info!("🚫 Rejected request: {}", e);
        ApiError::from(e)
    })
}

/// POST /search
pub async fn search_news(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Envelope<SearchData>>, ApiError> {
    let request: SearchRequest = parse(&headers, &body)?;
    let interests = request.interest_terms();
    let SearchRequest { query, user_interests } = request;

    info!("📰 Searching news: \"{}\" | interests: [{}]", query, interests.join(", "));

    let articles = state
        .scraper
        .search_news(&query, &interests)
        .await
        .map_err(|e| {
            error!("Error in search_news: {}", e);
            ApiError::collaborator(&e, SEARCH_FAILED)
        })?;

    info!("✅ Found {} articles", articles.len());

    Ok(Json(Envelope::success(SearchData {
        count: articles.len(),
        articles,
        query,
        user_interests,
    })))
}

/// POST /aggregate
pub async fn aggregate_news(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Envelope<AggregateData>>, ApiError> {
    let AggregateRequest { query } = parse(&headers, &body)?;

    info!("📰 Aggregating news: \"{}\"", query);

    let articles = state.aggregator.fetch_news(&query).await.map_err(|e| {
        error!("Error in aggregate_news: {}", e);
        ApiError::collaborator(&e, AGGREGATE_FAILED)
    })?;

    info!("✅ Aggregated {} articles", articles.len());

    Ok(Json(Envelope::success(AggregateData {
        count: articles.len(),
        articles,
        query,
    })))
}

/// POST /extract
pub async fn extract_content(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Envelope<ExtractData>>, ApiError> {
    let ExtractRequest { url } = parse(&headers, &body)?;

    info!("📄 Extracting content from: {}", url);

    let content = state
        .scraper
        .extract_article_content(&url)
        .await
        .map_err(|e| {
            error!("Error in extract_content: {}", e);
            ApiError::collaborator(&e, EXTRACT_FAILED)
        })?;

    // UTF-16 code units, the unit web clients measure string length in
    let content_length = content.encode_utf16().count();
    info!("✅ Extracted {} characters", content_length);

    Ok(Json(Envelope::success(ExtractData {
        url,
        content,
        content_length,
    })))
}

/// GET /health
pub async fn health() -> Json<HealthReport> {
    Json(HealthReport::available())
}
