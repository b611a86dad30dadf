use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use timeline::security::ApiKey;

const DEFAULT_PORT: u16 = 4000;
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_WIKIPEDIA_API_URL: &str = "https://en.wikipedia.org/w/api.php";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Postgres cache; the in-memory store is used when unset
    pub database_url: Option<String>,
    pub gemini_api_key: ApiKey,
    pub gemini_model: String,
    pub unsplash_access_key: ApiKey,
    pub wikipedia_api_url: String,
    /// Empty means any origin
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: match env::var("PORT") {
                Ok(port) => port.parse().context("PORT must be a valid number")?,
                Err(_) => DEFAULT_PORT,
            },
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            gemini_api_key: required_key("GEMINI_API_KEY")?,
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            unsplash_access_key: required_key("UNSPLASH_ACCESS_KEY")?,
            wikipedia_api_url: env::var("WIKIPEDIA_API_URL")
                .unwrap_or_else(|_| DEFAULT_WIKIPEDIA_API_URL.to_string()),
            allowed_origins: parse_origins(&env::var("ALLOWED_ORIGINS").unwrap_or_default()),
        })
    }
}

/// A provider key that must be set and non-blank.
fn required_key(var: &str) -> Result<ApiKey> {
    env::var(var)
        .ok()
        .as_deref()
        .and_then(ApiKey::non_blank)
        .with_context(|| format!("{} must be set", var))
}

/// Split a comma-separated origin list, dropping blanks.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}
