//! The search orchestrator.
//!
//! Resolves one query through the cache or the provider chain:
//!
//! ```text
//! START ─► cache check ─┬─ HIT ──────────────────────────────────────────► DONE
//!                       └─ MISS ─► extract ─┬─ NOT_FOUND ─────────────────► DONE
//!                                           └─ FOUND ─► generate ─► sort/clean
//!                                                 ─► images ─► persist ─► DONE
//! ```
//!
//! No step is retried. Provider calls run strictly in order.

use std::sync::Arc;

use chrono::{Datelike, Utc};
use tracing::{debug, info, instrument, warn};

use crate::error::{Result, TimelineError};
use crate::pipeline::inflight::InFlight;
use crate::pipeline::normalize::{drop_unresolved, sort_events};
use crate::traits::{
    extract::ExtractProvider, generator::EventGenerator, images::ImageProvider,
    store::TimelineStore,
};
use crate::types::{
    record::TimelineRecord,
    response::{SearchResponse, Source, Stage},
};
use crate::years::YearRange;

/// Cache-aware timeline search.
///
/// Collaborators are injected once at startup; swap any of them for the
/// mocks in [`crate::testing`] in tests.
pub struct TimelineService {
    store: Arc<dyn TimelineStore>,
    extracts: Arc<dyn ExtractProvider>,
    generator: Arc<dyn EventGenerator>,
    images: Arc<dyn ImageProvider>,
    in_flight: InFlight,
}

impl TimelineService {
    pub fn new(
        store: Arc<dyn TimelineStore>,
        extracts: Arc<dyn ExtractProvider>,
        generator: Arc<dyn EventGenerator>,
        images: Arc<dyn ImageProvider>,
    ) -> Self {
        Self {
            store,
            extracts,
            generator,
            images,
            in_flight: InFlight::new(),
        }
    }

    /// Label used as the `source` of freshly generated responses.
    pub fn generated_label(&self) -> String {
        format!("{} + {}", self.extracts.name(), self.generator.name())
    }

    /// Search a topic, optionally restricted to a year range.
    ///
    /// Range bounds are free-form labels (`"500 BC"`, `"1945"`); see
    /// [`YearRange::resolve`] for the defaulting rules.
    ///
    /// An empty or whitespace-only query fails with
    /// [`TimelineError::InvalidQuery`] before the cache or any provider is
    /// touched.
    pub async fn search(
        &self,
        query: &str,
        start_year: Option<&str>,
        end_year: Option<&str>,
    ) -> Result<SearchResponse> {
        self.search_in_year(query, start_year, end_year, Utc::now().year())
            .await
    }

    /// [`search`](Self::search) as if the current calendar year were `current_year`.
    #[instrument(skip(self), fields(source = tracing::field::Empty))]
    pub async fn search_in_year(
        &self,
        query: &str,
        start_year: Option<&str>,
        end_year: Option<&str>,
        current_year: i32,
    ) -> Result<SearchResponse> {
        let range = YearRange::resolve(start_year, end_year, current_year);

        if query.trim().is_empty() {
            return Err(TimelineError::InvalidQuery {
                reason: "query must not be empty".to_string(),
            });
        }

        let key = TimelineRecord::normalize_query(query);

        if let Some(record) = self.store.get(&key).await? {
            info!(query = %key, "Found timeline in cache");
            return Ok(cached_response(record, range));
        }

        // Another request may be resolving the same key; wait for it and
        // re-check before doing any provider work
        let _guard = self.in_flight.acquire(&key).await;
        if let Some(record) = self.store.get(&key).await? {
            info!(query = %key, "Timeline cached by concurrent request");
            return Ok(cached_response(record, range));
        }

        let extract = self.extracts.fetch_extract(query).await?;
        if extract.missing {
            info!(query = %key, provider = self.extracts.name(), "Topic not found");
            tracing::Span::current().record("source", Source::NotFound.as_str());
            return Ok(SearchResponse::not_found(extract.text));
        }

        let mut degraded = Vec::new();

        let generated = self.generator.generate_events(&extract.text).await;
        if generated.is_degraded() {
            degraded.push(Stage::Generation);
        }
        let generated = generated.into_value();
        let generated_count = generated.len();
        let events = drop_unresolved(sort_events(generated));
        if events.len() < generated_count {
            debug!(
                dropped = generated_count - events.len(),
                "Dropped events without a resolvable year"
            );
        }

        let images = self.images.fetch_images(query).await;
        if images.is_degraded() {
            warn!(provider = self.images.name(), reason = ?images.reason(), "Image fetch degraded");
            degraded.push(Stage::Images);
        }
        let images = images.into_value();

        info!(
            query = %key,
            events = events.len(),
            images = images.len(),
            "Generated timeline"
        );

        let record = TimelineRecord::new(key, extract.text, events, images);
        self.store.put(&record).await?;
        info!(query = %record.query, "Saved timeline to cache");

        let source = Source::Generated(self.generated_label());
        tracing::Span::current().record("source", source.as_str());

        let timeline_events = match range {
            Some(range) => range.apply(&record.timeline_events),
            None => record.timeline_events,
        };

        Ok(SearchResponse {
            extract: record.full_text,
            timeline_events,
            images: record.images,
            source,
            degraded,
        })
    }
}

fn cached_response(record: TimelineRecord, range: Option<YearRange>) -> SearchResponse {
    tracing::Span::current().record("source", Source::Cache.as_str());

    let timeline_events = match range {
        Some(range) => range.apply(&record.timeline_events),
        None => record.timeline_events,
    };

    SearchResponse {
        extract: record.full_text,
        timeline_events,
        images: record.images,
        source: Source::Cache,
        degraded: Vec::new(),
    }
}
