use crate::error::{NotionError, Result};
use std::fmt;

pub const API_KEY_ENV: &str = "NOTION_API_KEY";
pub const BASE_URL_ENV: &str = "NOTION_API_BASE_URL";
pub const DEFAULT_BASE_URL: &str = "https://api.notion.com/v1";
pub const NOTION_VERSION: &str = "2022-06-28";

/// Connection settings for the Notion API
#[derive(Clone)]
pub struct NotionConfig {
    pub api_key: String,
    pub base_url: String,
    pub notion_version: String,
}

impl NotionConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            notion_version: NOTION_VERSION.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Read `NOTION_API_KEY` (required) and `NOTION_API_BASE_URL` (optional)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key =
            non_empty(lookup(API_KEY_ENV)).ok_or(NotionError::MissingApiKey(API_KEY_ENV))?;
        let mut config = Self::new(api_key);
        if let Some(base_url) = non_empty(lookup(BASE_URL_ENV)) {
            config.base_url = base_url;
        }
        log::debug!("Notion API at {} (version {})", config.base_url, config.notion_version);
        Ok(config)
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

fn non_empty(raw: Option<String>) -> Option<String> {
    raw.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl fmt::Debug for NotionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotionConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("notion_version", &self.notion_version)
            .finish()
    }
}
