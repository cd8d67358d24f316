//! Display metadata derivation from provider records.
//!
//! Rules:
//! 1. Title: first non-empty of `title`, `name`, else the product name.
//! 2. Description: non-empty `overview`, else the generic description.
//! 3. Image: CDN base + size segment + `poster_path`, absent without a path.
//!
//! Blank strings count as missing. No record at all yields the fallback pair.

use peekr_core::types::ImageSize;

use crate::tmdb::IMAGE_BASE;
use crate::{FALLBACK_DESCRIPTION, FALLBACK_TITLE, TitleRecord};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DisplayMetadata {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    /// `false` when built from the fallback constants.
    pub found: bool,
}

impl DisplayMetadata {
    pub fn fallback() -> Self {
        Self {
            title: FALLBACK_TITLE.to_string(),
            description: FALLBACK_DESCRIPTION.to_string(),
            image_url: None,
            found: false,
        }
    }
}

pub fn derive_metadata(record: Option<&TitleRecord>, size: ImageSize) -> DisplayMetadata {
    let Some(record) = record else {
        return DisplayMetadata::fallback();
    };

    let title = non_blank(&record.title)
        .or_else(|| non_blank(&record.name))
        .unwrap_or(FALLBACK_TITLE);
    let description = non_blank(&record.overview).unwrap_or(FALLBACK_DESCRIPTION);

    DisplayMetadata {
        title: title.to_string(),
        description: description.to_string(),
        image_url: non_blank(&record.poster_path).map(|p| image_url(p, size)),
        found: true,
    }
}

/// Absolute poster URL for a provider path fragment such as `/abc.jpg`.
pub fn image_url(poster_path: &str, size: ImageSize) -> String {
    let poster_path = poster_path.trim();
    if poster_path.starts_with('/') {
        format!("{IMAGE_BASE}/{size}{poster_path}")
    } else {
        format!("{IMAGE_BASE}/{size}/{poster_path}")
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}
