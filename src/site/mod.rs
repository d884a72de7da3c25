//! Platform-specific embed URL recognition.
//!
//! Some video platforms expose two kinds of URL for the same video: a
//! human-facing watch page and a machine-facing player page meant for an
//! `<iframe>`. A platform implementation knows both shapes and can build
//! either one from a [`PlatformVideo`].
//!
//! # Architecture
//!
//! - [`EmbedPlatform`]: Trait for recognizing and building a platform's URLs
//! - [`PlatformRouter`]: Dispatches parsed URLs to the first matching platform
//! - [`PlatformId`]: Closed set of platforms a descriptor may name directly
//!
//! # Example
//!
//! ```rust
//! use embedres::site::{PlatformRouter, UrlMatch};
//! use url::Url;
//!
//! let router = PlatformRouter::new();
//! let url = Url::parse("https://www.bilibili.com/video/BV1xx411c7mD?p=2").unwrap();
//!
//! if let Some((_, UrlMatch::WatchPage(video))) = router.classify(&url) {
//!     assert_eq!(video.id, "BV1xx411c7mD");
//!     assert_eq!(video.page, 2);
//! }
//! ```

pub mod bilibili;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::EmbedConfig;

pub use bilibili::Bilibili;

/// Platforms a descriptor can reference by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformId {
    Bilibili,
}

impl PlatformId {
    /// Lowercase identifier as used in content files.
    pub fn as_str(self) -> &'static str {
        match self {
            PlatformId::Bilibili => "bilibili",
        }
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlatformId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bilibili" => Ok(PlatformId::Bilibili),
            other => Err(format!("unknown platform: {other}")),
        }
    }
}

/// A single video (and page within a multi-part video) on a platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlatformVideo {
    /// Platform video id, used verbatim.
    pub id: String,
    /// 1-based part number.
    pub page: u32,
}

impl PlatformVideo {
    /// Create a video reference; a page of 0 is clamped to 1.
    pub fn new(id: impl Into<String>, page: u32) -> Self {
        Self {
            id: id.into(),
            page: page.max(1),
        }
    }
}

/// How a parsed URL relates to a platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlMatch {
    /// The URL is the platform's human-facing watch page.
    WatchPage(PlatformVideo),
    /// The URL is already on the platform's player host. The video is
    /// `None` when the URL does not name one.
    Player(Option<PlatformVideo>),
}

/// A video platform whose watch and player URLs are understood.
pub trait EmbedPlatform: Send + Sync {
    /// Which platform this is.
    fn id(&self) -> PlatformId;

    /// Classify a parsed URL. Watch pages take precedence over player URLs.
    fn classify(&self, url: &Url) -> Option<UrlMatch>;

    /// URL to place in an embedded frame.
    fn player_url(&self, video: &PlatformVideo) -> String;

    /// Canonical watch page URL.
    fn page_url(&self, video: &PlatformVideo) -> String;
}

/// Routes parsed URLs to registered platforms.
///
/// Platforms are checked in registration order. First match wins.
pub struct PlatformRouter {
    platforms: Vec<Box<dyn EmbedPlatform>>,
}

impl PlatformRouter {
    /// Create a router with all platforms at their default hosts.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&EmbedConfig::default())
    }

    /// Create a router with platform hosts taken from `config`.
    #[must_use]
    pub fn from_config(config: &EmbedConfig) -> Self {
        let platforms: Vec<Box<dyn EmbedPlatform>> =
            vec![Box::new(Bilibili::new(config.bilibili.host.clone()))];

        Self { platforms }
    }

    /// Look up a platform by id.
    pub fn get(&self, id: PlatformId) -> Option<&dyn EmbedPlatform> {
        self.platforms
            .iter()
            .find(|p| p.id() == id)
            .map(|p| &**p)
    }

    /// Find the first platform recognizing `url`.
    pub fn classify(&self, url: &Url) -> Option<(&dyn EmbedPlatform, UrlMatch)> {
        self.platforms.iter().find_map(|platform| {
            platform.classify(url).map(|m| {
                tracing::debug!("Matched embed platform: {}", platform.id());
                (&**platform, m)
            })
        })
    }
}

impl Default for PlatformRouter {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a page number from the first query key (in `keys` order) that has
/// a non-empty value.
///
/// Anything other than a positive integer yields 1. Later keys are not
/// consulted once a non-empty value is found.
pub(crate) fn page_from_query(url: &Url, keys: &[&str]) -> u32 {
    let value = keys.iter().find_map(|key| {
        url.query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
            .filter(|v| !v.is_empty())
    });

    value
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|&p| p > 0)
        .unwrap_or(1)
}
