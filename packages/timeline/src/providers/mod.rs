//! HTTP-backed provider implementations.
//!
//! - `WikipediaClient` - extract provider (MediaWiki query API)
//! - `GeminiClient` - language model (Generative Language API)
//! - `UnsplashClient` - image provider (Unsplash search API)

pub mod gemini;
pub mod unsplash;
pub mod wikipedia;

pub use gemini::GeminiClient;
pub use unsplash::UnsplashClient;
pub use wikipedia::WikipediaClient;
