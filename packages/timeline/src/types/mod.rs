//! Domain types for timelines.

pub mod best_effort;
pub mod event;
pub mod record;
pub mod response;
