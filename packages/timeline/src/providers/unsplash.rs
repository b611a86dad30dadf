//! Unsplash image provider.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Result, TimelineError};
use crate::security::ApiKey;
use crate::traits::images::{ImageProvider, IMAGE_PAGE_SIZE};
use crate::types::{best_effort::BestEffort, event::Image};

const DEFAULT_BASE_URL: &str = "https://api.unsplash.com";
const PROVIDER: &str = "unsplash";

/// Unsplash photo search client.
#[derive(Clone)]
pub struct UnsplashClient {
    client: reqwest::Client,
    access_key: ApiKey,
    base_url: String,
    per_page: usize,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    urls: PhotoUrls,
    #[serde(default)]
    alt_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    small: String,
}

impl UnsplashClient {
    pub fn new(access_key: impl Into<ApiKey>) -> Self {
        Self {
            client: reqwest::Client::new(),
            access_key: access_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            per_page: IMAGE_PAGE_SIZE,
        }
    }

    /// Set a custom base URL (proxies, tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Fewer results per query. Clamped to the provider-wide cap.
    pub fn with_per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page.min(IMAGE_PAGE_SIZE);
        self
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    async fn search(&self, query: &str) -> Result<Vec<Image>> {
        let url = format!("{}/search/photos", self.base_url.trim_end_matches('/'));
        let per_page = self.per_page.to_string();

        let response = self
            .client
            .get(url)
            .header("Authorization", self.access_key.authorization("Client-ID"))
            .header("Accept-Version", "v1")
            .query(&[("query", query), ("per_page", per_page.as_str())])
            .send()
            .await
            .map_err(|e| TimelineError::provider(PROVIDER, e))?;

        if !response.status().is_success() {
            return Err(TimelineError::provider(
                PROVIDER,
                format!("API error {}", response.status()),
            ));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| TimelineError::provider(PROVIDER, e))?;

        Ok(images_from_response(query, body, self.per_page))
    }
}

#[async_trait]
impl ImageProvider for UnsplashClient {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn fetch_images(&self, query: &str) -> BestEffort<Vec<Image>> {
        match self.search(query).await {
            Ok(images) => {
                if images.is_empty() {
                    debug!(query, "No images found on Unsplash");
                } else {
                    debug!(query, count = images.len(), "Fetched images from Unsplash");
                }
                BestEffort::Ok(images)
            }
            Err(e) => {
                warn!(query, error = %e, "Error fetching images from Unsplash");
                BestEffort::degraded(e)
            }
        }
    }
}

fn images_from_response(query: &str, response: SearchResponse, limit: usize) -> Vec<Image> {
    response
        .results
        .into_iter()
        .take(limit)
        .map(|photo| {
            let alt = photo
                .alt_description
                .filter(|alt| !alt.is_empty())
                .unwrap_or_else(|| Image::fallback_alt(query));
            Image::new(photo.urls.small, alt)
        })
        .collect()
}
