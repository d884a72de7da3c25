//! Content feeds as published by the site.
//!
//! A feed is a JSON document with an `items` array. Video feeds and music
//! feeds use slightly different keys for the same concepts; both parse into
//! [`ContentItem`].
//!
//! Fetching the document is the caller's concern: this module only parses
//! text that is already in hand (or a local file).
//!
//! # Example
//!
//! ```rust
//! use embedres::content::ContentFeed;
//!
//! let feed = ContentFeed::from_json(r#"{
//!     "items": [
//!         { "id": 7, "slug": "intro", "title": "Intro", "src": "/videos/intro.mp4" }
//!     ]
//! }"#).unwrap();
//!
//! assert_eq!(feed.find("intro").unwrap().title, "Intro");
//! assert_eq!(feed.find("7").unwrap().title, "Intro");
//! ```

pub mod item;

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

pub use item::{ContentItem, ItemId};

/// Content loading errors
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ContentError>;

#[derive(Debug, Deserialize)]
struct FeedFile {
    #[serde(default)]
    items: serde_json::Value,
}

/// Parsed list of content items.
#[derive(Debug, Clone, Default)]
pub struct ContentFeed {
    pub items: Vec<ContentItem>,
}

impl ContentFeed {
    /// Parse a feed document. A missing or non-array `items` yields an
    /// empty feed, and records that do not parse are skipped.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: FeedFile = serde_json::from_str(json)?;
        let items = match file.items {
            serde_json::Value::Array(values) => values
                .into_iter()
                .enumerate()
                .filter_map(|(index, value)| match serde_json::from_value(value) {
                    Ok(item) => Some(item),
                    Err(e) => {
                        tracing::warn!("Skipping feed item {index}: {e}");
                        None
                    }
                })
                .collect(),
            serde_json::Value::Null => Vec::new(),
            _ => {
                tracing::warn!("Feed `items` is not an array, treating as empty");
                Vec::new()
            }
        };

        Ok(Self { items })
    }

    /// Read and parse a feed from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let feed = Self::from_json(&json)?;
        tracing::debug!("Loaded {} items from {}", feed.items.len(), path.display());
        Ok(feed)
    }

    /// Find an item by slug, falling back to a numeric id match when
    /// `slug` is a number.
    pub fn find(&self, slug: &str) -> Option<&ContentItem> {
        if let Some(item) = self.items.iter().find(|i| i.slug.as_deref() == Some(slug)) {
            return Some(item);
        }

        let wanted: i64 = slug.trim().parse().ok()?;
        self.items
            .iter()
            .find(|i| i.id.as_ref().and_then(ItemId::as_number) == Some(wanted))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
