pub mod cache;
pub mod display;
pub mod provider;
pub mod tmdb;

use thiserror::Error;

pub use display::{DisplayMetadata, derive_metadata};
pub use provider::TitleProvider;

/// Product name shown whenever no provider data is available.
pub const FALLBACK_TITLE: &str = "Peekr";
/// Generic description paired with [`FALLBACK_TITLE`].
pub const FALLBACK_DESCRIPTION: &str = "Discover movies & TV shows on Peekr";

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("provider returned status {0}")]
    Status(u16),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("invalid provider base URL: {0}")]
    BaseUrl(String),
}

impl From<reqwest::Error> for MetadataError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_decode() {
            Self::Parse(e.to_string())
        } else {
            Self::Network(e.to_string())
        }
    }
}

/// The subset of a provider title document the renderer reads.
///
/// Every field is optional; a field with an unexpected JSON type is treated
/// as missing rather than failing the whole record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TitleRecord {
    pub title: Option<String>,
    pub name: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
}

impl TitleRecord {
    pub fn from_json(data: &serde_json::Value) -> Self {
        Self {
            title: data["title"].as_str().map(|s| s.to_string()),
            name: data["name"].as_str().map(|s| s.to_string()),
            overview: data["overview"].as_str().map(|s| s.to_string()),
            poster_path: data["poster_path"].as_str().map(|s| s.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_reads_known_fields() {
        let json = serde_json::json!({
            "id": 27205,
            "title": "Inception",
            "overview": "A thief who steals corporate secrets...",
            "poster_path": "/abc.jpg",
            "vote_average": 8.4
        });

        let record = TitleRecord::from_json(&json);
        assert_eq!(record.title.as_deref(), Some("Inception"));
        assert_eq!(record.name, None);
        assert_eq!(record.poster_path.as_deref(), Some("/abc.jpg"));
    }

    #[test]
    fn record_tolerates_wrong_types_and_null() {
        let json = serde_json::json!({
            "title": 42,
            "name": "Game of Thrones",
            "overview": null,
            "poster_path": ["/nope.jpg"]
        });

        let record = TitleRecord::from_json(&json);
        assert_eq!(record.title, None);
        assert_eq!(record.name.as_deref(), Some("Game of Thrones"));
        assert_eq!(record.overview, None);
        assert_eq!(record.poster_path, None);
    }

    #[test]
    fn record_from_non_object_is_empty() {
        assert_eq!(
            TitleRecord::from_json(&serde_json::json!("oops")),
            TitleRecord::default()
        );
    }
}
