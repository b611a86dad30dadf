//! Extract provider trait (encyclopedia-style text source).

use async_trait::async_trait;

use crate::error::Result;

/// Plain-text summary for a topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extract {
    /// The extract, or a human-readable placeholder.
    pub text: String,

    /// The source has no such topic.
    pub missing: bool,
}

impl Extract {
    /// A topic that exists (possibly with placeholder text for an empty extract).
    pub fn found(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            missing: false,
        }
    }

    /// A topic the source doesn't know.
    pub fn missing(placeholder: impl Into<String>) -> Self {
        Self {
            text: placeholder.into(),
            missing: true,
        }
    }
}

/// Fetches a plain-text extract for a query.
///
/// Must distinguish "no such topic" (`missing = true`) from "topic exists
/// but has no content" (`missing = false`, placeholder text). Transport and
/// parse errors are fatal and propagate to the caller.
#[async_trait]
pub trait ExtractProvider: Send + Sync {
    /// Short provider name, used in the response's source tag.
    fn name(&self) -> &str;

    async fn fetch_extract(&self, query: &str) -> Result<Extract>;
}
