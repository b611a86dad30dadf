//! The composed search response.

use serde::{Serialize, Serializer};
use std::fmt;

use super::event::{Event, Image};

/// Where a response's data came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Served from a cached record
    Cache,

    /// The extract provider has no such topic; nothing was cached
    NotFound,

    /// Freshly fetched and generated. Carries the provider label,
    /// e.g. `"wikipedia + gemini"`.
    Generated(String),
}

impl Source {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Cache => "cache",
            Self::NotFound => "not found",
            Self::Generated(label) => label,
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, Self::Generated(_))
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Source {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A best-effort pipeline stage that fell back to an empty result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Generation,
    Images,
}

/// Response for one search.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub extract: String,

    /// Events after the optional year-range filter
    pub timeline_events: Vec<Event>,

    pub images: Vec<Image>,

    pub source: Source,

    /// Stages that degraded while building this response
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub degraded: Vec<Stage>,
}

impl SearchResponse {
    /// Response for a topic the extract provider doesn't know.
    pub fn not_found(extract: impl Into<String>) -> Self {
        Self {
            extract: extract.into(),
            timeline_events: Vec::new(),
            images: Vec::new(),
            source: Source::NotFound,
            degraded: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_serializes_as_tag() {
        assert_eq!(serde_json::to_value(Source::Cache).unwrap(), "cache");
        assert_eq!(serde_json::to_value(Source::NotFound).unwrap(), "not found");
        assert_eq!(
            serde_json::to_value(Source::Generated("wikipedia + gemini".into())).unwrap(),
            "wikipedia + gemini"
        );
    }

    #[test]
    fn test_degraded_omitted_when_empty() {
        let response = SearchResponse::not_found("No exact match");
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("degraded").is_none());
        assert_eq!(json["source"], "not found");
        assert_eq!(json["timelineEvents"], serde_json::json!([]));

        let mut degraded = response.clone();
        degraded.degraded.push(Stage::Images);
        let json = serde_json::to_value(&degraded).unwrap();
        assert_eq!(json["degraded"], serde_json::json!(["images"]));
    }
}
