//! Dated events and illustrative images.

use serde::{Deserialize, Serialize};

use crate::years::extract_year;

/// A single dated occurrence derived from an extract.
///
/// `date` is expected in one of two canonical forms, `"YYYY"` or
/// `"YYYY BC"`. Anything else is a generator contract violation and is
/// dropped before a record is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub date: String,
    pub summary: String,
}

impl Event {
    pub fn new(date: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            summary: summary.into(),
        }
    }

    /// Signed year for this event (BC negative), if the date resolves.
    pub fn year(&self) -> Option<i32> {
        extract_year(&self.date)
    }
}

/// An image relevant to a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Image URL
    pub src: String,

    /// Descriptive text
    pub alt: String,
}

impl Image {
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
        }
    }

    /// Caption used when a provider supplies no description.
    pub fn fallback_alt(query: &str) -> String {
        format!("Image of {}", query)
    }
}
