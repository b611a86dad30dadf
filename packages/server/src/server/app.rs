//! Application setup and server configuration.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, HeaderName, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use timeline::{
    GeminiClient, MemorySearchHistory, MemoryStore, PostgresStore, SearchHistory,
    TimelineGenerator, TimelineService, TimelineStore, UnsplashClient, WikipediaClient,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::server::routes::{
    add_history_handler, health_handler, history_handler, search_handler, USER_ID_HEADER,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub timelines: Arc<TimelineService>,
    pub history: Arc<dyn SearchHistory>,
}

impl AppState {
    pub fn new(timelines: TimelineService, history: Arc<dyn SearchHistory>) -> Self {
        Self {
            timelines: Arc::new(timelines),
            history,
        }
    }

    /// Wire the production providers and cache from configuration.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let store: Arc<dyn TimelineStore> = match &config.database_url {
            Some(url) => {
                tracing::info!("Connecting to timeline cache database...");
                Arc::new(
                    PostgresStore::new(url)
                        .await
                        .context("Failed to connect to database")?,
                )
            }
            None => {
                tracing::warn!("DATABASE_URL not set, caching timelines in memory");
                Arc::new(MemoryStore::new())
            }
        };

        let wikipedia = WikipediaClient::new()
            .context("Failed to create Wikipedia client")?
            .with_api_url(config.wikipedia_api_url.clone());
        let gemini = GeminiClient::new(config.gemini_api_key.clone())
            .with_model(config.gemini_model.clone());
        let unsplash = UnsplashClient::new(config.unsplash_access_key.clone());

        let timelines = TimelineService::new(
            store,
            Arc::new(wikipedia),
            Arc::new(TimelineGenerator::new(gemini)),
            Arc::new(unsplash),
        );
        tracing::info!(source = %timelines.generated_label(), "Timeline providers configured");

        Ok(Self::new(timelines, Arc::new(MemorySearchHistory::new())))
    }
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE, HeaderName::from_static(USER_ID_HEADER)]);

    if allowed_origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
}

/// Build the Axum application router
pub fn build_app(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/search", get(search_handler))
        .route("/api/users/search-history", post(add_history_handler))
        .route("/api/users/search-history/:user_id", get(history_handler))
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(state))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
}
