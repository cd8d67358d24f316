use std::time::Duration;

use anyhow::{Context, bail};
use peekr_core::types::ImageSize;
use peekr_metadata::cache::{CachePolicy, CachingProvider};
use peekr_metadata::tmdb::{self, AuthMode, TmdbConfig};
use url::Url;

/// Everything the server needs, read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub tmdb: TmdbConfig,
    pub cache_policy: CachePolicy,
    /// Upper bound on cached provider records.
    pub cache_max_entries: u64,
    pub render: RenderConfig,
    pub log_json: bool,
}

/// Knobs for the preview page itself.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Poster size for the Open Graph / Twitter image.
    pub card_image_size: ImageSize,
    /// Poster size for the on-page rendering.
    pub page_image_size: ImageSize,
    /// Public origin used for `og:url`, e.g. `https://peekr.app`.
    pub public_url: Option<Url>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            card_image_size: ImageSize::W500,
            page_image_size: ImageSize::W780,
            public_url: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| {
            lookup(key).and_then(|value| {
                let trimmed = value.trim().to_string();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed)
                }
            })
        };

        let auth = match var("PEEKR_TMDB_AUTH").as_deref().unwrap_or("api_key") {
            "api_key" => AuthMode::ApiKeyInQuery(
                var("PEEKR_TMDB_API_KEY").context("PEEKR_TMDB_API_KEY is not set")?,
            ),
            "bearer" => AuthMode::BearerHeader(
                var("PEEKR_TMDB_TOKEN").context("PEEKR_TMDB_TOKEN is not set")?,
            ),
            other => bail!("PEEKR_TMDB_AUTH must be 'api_key' or 'bearer', got '{other}'"),
        };

        let timeout = match var("PEEKR_TMDB_TIMEOUT_SECS") {
            Some(v) => {
                let secs: u64 = v
                    .parse()
                    .with_context(|| format!("invalid PEEKR_TMDB_TIMEOUT_SECS '{v}'"))?;
                if secs == 0 {
                    bail!("PEEKR_TMDB_TIMEOUT_SECS must be greater than zero");
                }
                Duration::from_secs(secs)
            }
            None => tmdb::DEFAULT_TIMEOUT,
        };

        let cache_policy = match var("PEEKR_CACHE_SECS") {
            Some(v) => CachePolicy::from_secs(
                v.parse()
                    .with_context(|| format!("invalid PEEKR_CACHE_SECS '{v}'"))?,
            ),
            None => CachePolicy::default(),
        };

        let cache_max_entries = match var("PEEKR_CACHE_MAX_ENTRIES") {
            Some(v) => v
                .parse()
                .with_context(|| format!("invalid PEEKR_CACHE_MAX_ENTRIES '{v}'"))?,
            None => CachingProvider::DEFAULT_MAX_ENTRIES,
        };

        let public_url = match var("PEEKR_PUBLIC_URL") {
            Some(v) => {
                let url =
                    Url::parse(&v).with_context(|| format!("invalid PEEKR_PUBLIC_URL '{v}'"))?;
                if url.cannot_be_a_base() {
                    bail!("PEEKR_PUBLIC_URL must be an http(s) origin, got '{v}'");
                }
                Some(url)
            }
            None => None,
        };

        let defaults = RenderConfig::default();
        let card_image_size = match var("PEEKR_CARD_IMAGE_SIZE") {
            Some(v) => v.parse::<ImageSize>().map_err(anyhow::Error::msg)?,
            None => defaults.card_image_size,
        };
        let page_image_size = match var("PEEKR_PAGE_IMAGE_SIZE") {
            Some(v) => v.parse::<ImageSize>().map_err(anyhow::Error::msg)?,
            None => defaults.page_image_size,
        };

        Ok(Self {
            bind_addr: var("PEEKR_BIND").unwrap_or_else(|| "0.0.0.0:3000".to_string()),
            tmdb: TmdbConfig {
                auth,
                base_url: var("PEEKR_TMDB_BASE_URL").unwrap_or_else(|| tmdb::BASE_URL.to_string()),
                timeout,
            },
            cache_policy,
            cache_max_entries,
            render: RenderConfig {
                card_image_size,
                page_image_size,
                public_url,
            },
            log_json: var("PEEKR_LOG_FORMAT").is_some_and(|f| f.eq_ignore_ascii_case("json")),
        })
    }
}
