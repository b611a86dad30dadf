// Timeline Search - API Core
//
// HTTP surface over the `timeline` pipeline: topic search with year-range
// filtering, plus per-user search history.

pub mod config;
pub mod server;

pub use config::*;
