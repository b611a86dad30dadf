//! Image provider trait.

use async_trait::async_trait;

use crate::types::{best_effort::BestEffort, event::Image};

/// Maximum number of images fetched per query.
pub const IMAGE_PAGE_SIZE: usize = 20;

/// Fetches images relevant to a query.
///
/// Best-effort: any failure degrades to an empty list. Results are capped at
/// [`IMAGE_PAGE_SIZE`].
#[async_trait]
pub trait ImageProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn fetch_images(&self, query: &str) -> BestEffort<Vec<Image>>;
}
