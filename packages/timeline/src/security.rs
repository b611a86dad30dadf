//! Provider API keys.
//!
//! Keys live in a [`secrecy::SecretString`] and only leave it when a request
//! header is built. Formatting shows a short masked hint (`****WXYZ`) so
//! logs can tell which key was loaded without revealing it.

use secrecy::{ExposeSecret, SecretBox, SecretString};
use std::fmt;

/// Characters of the key kept in the masked hint.
const HINT_LEN: usize = 4;

/// Keys shorter than this are fully masked.
const MIN_HINTED_LEN: usize = 12;

/// An API key for one of the timeline providers.
pub struct ApiKey(SecretString);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(value.into().into_boxed_str()))
    }

    /// A key from a raw value, or `None` when it is blank.
    ///
    /// Surrounding whitespace (a common `.env` artifact) is trimmed.
    pub fn non_blank(value: &str) -> Option<Self> {
        let value = value.trim();
        (!value.is_empty()).then(|| Self::new(value))
    }

    /// The raw key. Only call this when building the outgoing request.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    /// `Authorization` header value using the given scheme, e.g. `Client-ID <key>`.
    pub fn authorization(&self, scheme: &str) -> String {
        format!("{} {}", scheme, self.expose())
    }

    /// Masked form safe for logs.
    pub fn hint(&self) -> String {
        let key = self.expose();
        let chars = key.chars().count();
        if chars < MIN_HINTED_LEN {
            return "****".to_string();
        }
        let tail: String = key.chars().skip(chars - HINT_LEN).collect();
        format!("****{}", tail)
    }
}

impl Clone for ApiKey {
    fn clone(&self) -> Self {
        Self::new(self.expose())
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&self.hint()).finish()
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hint())
    }
}

impl From<String> for ApiKey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ApiKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
