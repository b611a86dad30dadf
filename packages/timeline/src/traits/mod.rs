//! Collaborator seams for the timeline pipeline.
//!
//! The orchestrator only talks to these traits. Concrete providers live in
//! [`crate::providers`], stores in [`crate::stores`], and mocks in
//! [`crate::testing`].

pub mod extract;
pub mod generator;
pub mod history;
pub mod images;
pub mod store;
