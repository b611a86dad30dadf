//! Timeline pipeline.
//!
//! - `normalize`: sort/filter events by resolved year
//! - `prompts`: generation prompt and response parsing
//! - `generate`: `EventGenerator` over any `LanguageModel`
//! - `inflight`: per-key single-flight guard
//! - `search`: the cache-aware search orchestrator

pub mod generate;
pub mod inflight;
pub mod normalize;
pub mod prompts;
pub mod search;

pub use generate::TimelineGenerator;
pub use inflight::InFlight;
pub use normalize::{drop_unresolved, filter_by_year, sort_events};
pub use prompts::{parse_events_response, timeline_prompt};
pub use search::TimelineService;
