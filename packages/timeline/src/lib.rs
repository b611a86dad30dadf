//! Historical Timeline Acquisition Library
//!
//! Turns a free-text topic ("Rome", "World War II") into a chronologically
//! ordered set of dated events, an explanatory extract, and a handful of
//! illustrative images, caching the result under the lower-cased query.
//!
//! # Pipeline
//!
//! ```text
//! query ─► cache ─hit─► range filter ─► response
//!            │
//!           miss
//!            ▼
//!        extract provider ─missing─► "not found" response (nothing cached)
//!            │
//!          found
//!            ▼
//!        event generator ─► sort + drop unresolved years ─► image provider
//!            ▼
//!        persist record ─► range filter ─► response
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use timeline::{GeminiClient, MemoryStore, TimelineGenerator, TimelineService, UnsplashClient, WikipediaClient};
//!
//! let service = TimelineService::new(
//!     Arc::new(MemoryStore::new()),
//!     Arc::new(WikipediaClient::new()?),
//!     Arc::new(TimelineGenerator::new(GeminiClient::new(gemini_key))),
//!     Arc::new(UnsplashClient::new(unsplash_key)),
//! );
//!
//! let response = service.search("Rome", Some("500 BC"), Some("500")).await?;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Collaborator seams (providers, stores, search history)
//! - [`types`] - Events, images, cached records, responses
//! - [`years`] - Year extraction and year-range resolution
//! - [`pipeline`] - Normalization, generation parsing, and the search orchestrator
//! - [`providers`] - Wikipedia, Gemini and Unsplash clients
//! - [`stores`] - Storage implementations (MemoryStore, etc.)
//! - [`testing`] - Mock collaborators for testing

pub mod error;
pub mod pipeline;
pub mod providers;
pub mod security;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;
pub mod years;

// Re-export core types at crate root
pub use error::{Result, TimelineError};
pub use traits::{
    extract::{Extract, ExtractProvider},
    generator::{EventGenerator, LanguageModel},
    history::SearchHistory,
    images::ImageProvider,
    store::TimelineStore,
};
pub use types::{
    best_effort::BestEffort,
    event::{Event, Image},
    record::TimelineRecord,
    response::{SearchResponse, Source, Stage},
};
pub use years::{extract_year, YearRange, DEFAULT_START_YEAR};

pub use pipeline::{
    drop_unresolved, filter_by_year, parse_events_response, sort_events, timeline_prompt,
    TimelineGenerator, TimelineService,
};

pub use providers::{GeminiClient, UnsplashClient, WikipediaClient};
pub use security::ApiKey;

// Re-export stores
pub use stores::{MemorySearchHistory, MemoryStore, HISTORY_LIMIT};

#[cfg(feature = "sqlite")]
pub use stores::SqliteStore;

#[cfg(feature = "postgres")]
pub use stores::PostgresStore;
