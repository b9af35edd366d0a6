use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod envelope;
pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

use error::PanicEnvelope;

/// Prefix the news routes are served under.
pub const API_PREFIX: &str = "/api/news";

/// The four news routes, relative to wherever they get mounted.
pub fn news_router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/search",
            post(handlers::search_news).layer(CatchPanicLayer::custom(PanicEnvelope(handlers::SEARCH_FAILED))),
        )
        .route(
            "/aggregate",
            post(handlers::aggregate_news).layer(CatchPanicLayer::custom(PanicEnvelope(handlers::AGGREGATE_FAILED))),
        )
        .route(
            "/extract",
            post(handlers::extract_content).layer(CatchPanicLayer::custom(PanicEnvelope(handlers::EXTRACT_FAILED))),
        )
        .route(
            "/health",
            get(handlers::health).layer(CatchPanicLayer::custom(PanicEnvelope(handlers::HEALTH_FAILED))),
        )
}

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .nest(API_PREFIX, news_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use nd_clients::{DummyAggregator, DummyScraper};
    use tower::ServiceExt;

    async fn explode() -> &'static str {
        panic!("kaboom")
    }

    #[tokio::test]
    async fn test_routes_are_mounted_under_prefix() {
        let app = create_app(AppState::new(Arc::new(DummyScraper::new()), Arc::new(DummyAggregator::new())));

        let resp = app
            .clone()
            .oneshot(Request::builder().uri("/api/news/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_panicking_handler_becomes_error_envelope() {
        let app: Router = Router::new().route(
            "/boom",
            get(explode).layer(CatchPanicLayer::custom(PanicEnvelope(handlers::HEALTH_FAILED))),
        );

        let resp = app
            .oneshot(Request::builder().uri("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], handlers::HEALTH_FAILED);
    }
}
