//! Testing utilities including mock implementations.
//!
//! These let applications exercise the search pipeline without network
//! calls. Every mock records its calls for assertions.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::error::{Result, TimelineError};
use crate::traits::{
    extract::{Extract, ExtractProvider},
    generator::{EventGenerator, LanguageModel},
    images::ImageProvider,
    store::TimelineStore,
};
use crate::types::{
    best_effort::BestEffort,
    event::{Event, Image},
    record::TimelineRecord,
};

// =============================================================================
// Extract provider
// =============================================================================

/// Mock extract provider.
///
/// Returns the configured extract for a query; unknown queries are reported
/// as missing unless [`with_default`](Self::with_default) is set.
#[derive(Default)]
pub struct MockExtractProvider {
    extracts: RwLock<HashMap<String, Extract>>,
    default: RwLock<Option<Extract>>,
    failure: Option<String>,
    latency: Option<Duration>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockExtractProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider whose every call fails with a transport-style error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Default::default()
        }
    }

    /// Found extract for a query (matched exactly, case-sensitive).
    pub fn with_extract(self, query: impl Into<String>, text: impl Into<String>) -> Self {
        self.extracts
            .write()
            .unwrap()
            .insert(query.into(), Extract::found(text));
        self
    }

    /// Missing topic for a query.
    pub fn with_missing(self, query: impl Into<String>) -> Self {
        let query = query.into();
        let placeholder = format!("No exact match found for \"{}\".", query);
        self.extracts
            .write()
            .unwrap()
            .insert(query, Extract::missing(placeholder));
        self
    }

    /// Extract returned for any query without an explicit entry.
    pub fn with_default(self, text: impl Into<String>) -> Self {
        *self.default.write().unwrap() = Some(Extract::found(text));
        self
    }

    /// Sleep this long on every call, after recording it.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Queries this provider was called with.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl ExtractProvider for MockExtractProvider {
    fn name(&self) -> &str {
        "mock-extract"
    }

    async fn fetch_extract(&self, query: &str) -> Result<Extract> {
        self.calls.write().unwrap().push(query.to_string());

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        if let Some(message) = &self.failure {
            return Err(TimelineError::provider("mock-extract", message.clone()));
        }

        if let Some(extract) = self.extracts.read().unwrap().get(query) {
            return Ok(extract.clone());
        }

        Ok(self
            .default
            .read()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Extract::missing(format!("No exact match found for \"{}\".", query))))
    }
}

// =============================================================================
// Language model
// =============================================================================

/// Mock language model returning queued raw responses.
///
/// Once the queue is drained it keeps returning the last response
/// (or `"[]"` if none was queued).
#[derive(Default)]
pub struct MockLanguageModel {
    responses: RwLock<VecDeque<String>>,
    last: RwLock<Option<String>>,
    failure: Option<String>,
    prompts: Arc<RwLock<Vec<String>>>,
}

impl MockLanguageModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// A model whose every call fails.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Default::default()
        }
    }

    /// Queue a raw response.
    pub fn with_response(self, raw: impl Into<String>) -> Self {
        self.responses.write().unwrap().push_back(raw.into());
        self
    }

    /// Prompts this model received.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.read().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for MockLanguageModel {
    fn name(&self) -> &str {
        "mock-model"
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts.write().unwrap().push(prompt.to_string());

        if let Some(message) = &self.failure {
            return Err(TimelineError::provider("mock-model", message.clone()));
        }

        let next = self.responses.write().unwrap().pop_front();
        let mut last = self.last.write().unwrap();
        if let Some(raw) = next {
            *last = Some(raw);
        }
        Ok(last.clone().unwrap_or_else(|| "[]".to_string()))
    }
}

// =============================================================================
// Event generator
// =============================================================================

/// Mock event generator with a fixed outcome.
pub struct MockEventGenerator {
    outcome: BestEffort<Vec<Event>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl Default for MockEventGenerator {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl MockEventGenerator {
    /// Always generate these events.
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            outcome: BestEffort::Ok(events),
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Always degrade with this reason.
    pub fn degraded(reason: impl Into<String>) -> Self {
        Self {
            outcome: BestEffort::degraded(reason.into()),
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Extracts this generator was called with.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl EventGenerator for MockEventGenerator {
    fn name(&self) -> &str {
        "mock-generator"
    }

    async fn generate_events(&self, text: &str) -> BestEffort<Vec<Event>> {
        self.calls.write().unwrap().push(text.to_string());
        self.outcome.clone()
    }
}

// =============================================================================
// Image provider
// =============================================================================

/// Mock image provider with a fixed outcome.
pub struct MockImageProvider {
    outcome: BestEffort<Vec<Image>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl Default for MockImageProvider {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl MockImageProvider {
    pub fn new(images: Vec<Image>) -> Self {
        Self {
            outcome: BestEffort::Ok(images),
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn degraded(reason: impl Into<String>) -> Self {
        Self {
            outcome: BestEffort::degraded(reason.into()),
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl ImageProvider for MockImageProvider {
    fn name(&self) -> &str {
        "mock-images"
    }

    async fn fetch_images(&self, query: &str) -> BestEffort<Vec<Image>> {
        self.calls.write().unwrap().push(query.to_string());
        self.outcome.clone()
    }
}

// =============================================================================
// Stores
// =============================================================================

/// Store whose reads and/or writes fail.
#[derive(Default)]
pub struct FailingStore {
    fail_reads: bool,
}

impl FailingStore {
    /// Reads succeed (always empty), writes fail.
    pub fn writes() -> Self {
        Self { fail_reads: false }
    }

    /// Every operation fails.
    pub fn all() -> Self {
        Self { fail_reads: true }
    }
}

#[async_trait]
impl TimelineStore for FailingStore {
    async fn get(&self, _query: &str) -> Result<Option<TimelineRecord>> {
        if self.fail_reads {
            return Err(TimelineError::storage("store unavailable"));
        }
        Ok(None)
    }

    async fn put(&self, _record: &TimelineRecord) -> Result<()> {
        Err(TimelineError::storage("store unavailable"))
    }
}
