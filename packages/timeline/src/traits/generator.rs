//! Event generation traits.
//!
//! Split in two like the rest of the AI plumbing:
//! - `LanguageModel`: infrastructure, raw prompt in, raw text out
//! - `EventGenerator`: domain, extract in, events out (best effort)

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{best_effort::BestEffort, event::Event};

/// A generative text model.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Short model/provider name (e.g. "gemini").
    fn name(&self) -> &str;

    /// Complete a prompt (returns raw text response).
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Turns an extract into dated events.
///
/// Generation is best-effort: transport errors and malformed output come
/// back as [`BestEffort::Degraded`], never as a request failure. Date format
/// compliance is not checked here.
#[async_trait]
pub trait EventGenerator: Send + Sync {
    fn name(&self) -> &str;

    async fn generate_events(&self, text: &str) -> BestEffort<Vec<Event>>;
}
