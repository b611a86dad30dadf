//! Cached timeline records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::event::{Event, Image};

/// One cached timeline, keyed by the normalized (lower-cased) query.
///
/// Records are created once on a successful cache miss and never updated.
/// `timeline_events` only holds events with a resolvable year, sorted
/// ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineRecord {
    /// Normalized query (unique key)
    pub query: String,

    /// The extract the events were generated from
    pub full_text: String,

    pub timeline_events: Vec<Event>,

    pub images: Vec<Image>,

    pub created_at: DateTime<Utc>,
}

impl TimelineRecord {
    /// Create a new record stamped with the current time.
    pub fn new(
        query: impl Into<String>,
        full_text: impl Into<String>,
        timeline_events: Vec<Event>,
        images: Vec<Image>,
    ) -> Self {
        Self {
            query: query.into(),
            full_text: full_text.into(),
            timeline_events,
            images,
            created_at: Utc::now(),
        }
    }

    /// Normalize a user query into a cache key.
    pub fn normalize_query(query: &str) -> String {
        query.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_query_lowercases_only() {
        assert_eq!(TimelineRecord::normalize_query("Roman Empire"), "roman empire");
        assert_eq!(TimelineRecord::normalize_query(" WWII "), " wwii ");
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let record = TimelineRecord::new("rome", "Rome is...", vec![], vec![]);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["fullText"], "Rome is...");
        assert!(json["timelineEvents"].as_array().unwrap().is_empty());
        assert!(json.get("createdAt").is_some());
    }
}
