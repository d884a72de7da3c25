//! Bilibili watch-page and player URL handling.
//!
//! Bilibili serves the same video from two hosts:
//!
//! - `https://www.bilibili.com/video/BV1xx411c7mD?p=2` (watch page)
//! - `https://player.bilibili.com/player.html?bvid=BV1xx411c7mD&page=2` (player)
//!
//! Multi-part videos select the part with `p` on the watch page and `page`
//! on the player, though either name shows up in the wild on both.
//!
//! # Example
//!
//! ```rust
//! use embedres::site::{Bilibili, EmbedPlatform, PlatformVideo};
//!
//! let bilibili = Bilibili::default();
//! let video = PlatformVideo::new("BV1xx411c7mD", 3);
//!
//! assert_eq!(
//!     bilibili.page_url(&video),
//!     "https://www.bilibili.com/video/BV1xx411c7mD?p=3"
//! );
//! ```

use url::Url;

use super::{page_from_query, EmbedPlatform, PlatformId, PlatformVideo, UrlMatch};

/// Default registrable domain.
pub const DEFAULT_HOST: &str = "bilibili.com";

/// Every BV id starts with this prefix.
const BVID_PREFIX: &str = "BV";

/// Bilibili platform, parameterized by its registrable domain.
#[derive(Debug, Clone)]
pub struct Bilibili {
    host: String,
    player_host: String,
    watch_base: Url,
    player_base: Url,
}

impl Bilibili {
    /// Create a platform rooted at `host` (e.g. `"bilibili.com"`).
    ///
    /// A host that cannot appear in a URL falls back to [`DEFAULT_HOST`].
    pub fn new(host: impl Into<String>) -> Self {
        let host = host.into().trim().trim_matches('.').to_ascii_lowercase();
        Self::with_host(&host).unwrap_or_else(|e| {
            tracing::warn!("Invalid bilibili host {host:?} ({e}), using {DEFAULT_HOST}");
            Self::with_host(DEFAULT_HOST).expect("default bilibili host is valid")
        })
    }

    fn with_host(host: &str) -> Result<Self, url::ParseError> {
        let player_host = format!("player.{host}");
        let watch_base = Url::parse(&format!("https://www.{host}/"))?;
        let player_base = Url::parse(&format!("https://{player_host}/player.html"))?;
        Ok(Self {
            host: host.to_string(),
            player_host,
            watch_base,
            player_base,
        })
    }

    /// Registrable domain this platform answers for.
    pub fn host(&self) -> &str {
        &self.host
    }

    fn is_platform_host(&self, host: &str) -> bool {
        host == self.host
            || host
                .strip_suffix(self.host.as_str())
                .is_some_and(|rest| rest.ends_with('.'))
    }

    /// Extract the BV id from a `/video/<id>` path.
    fn watch_page_id(&self, url: &Url) -> Option<String> {
        let host = url.host_str()?;
        if !self.is_platform_host(host) {
            return None;
        }

        let mut segments = url.path_segments()?;
        if !segments.next()?.eq_ignore_ascii_case("video") {
            return None;
        }

        let segment = segments.next()?;
        let id_len = segment
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(segment.len());
        let id = &segment[..id_len];

        let has_prefix = id
            .get(..BVID_PREFIX.len())
            .is_some_and(|p| p.eq_ignore_ascii_case(BVID_PREFIX));

        (has_prefix && id.len() > BVID_PREFIX.len()).then(|| id.to_string())
    }
}

impl Default for Bilibili {
    fn default() -> Self {
        Self::new(DEFAULT_HOST)
    }
}

impl EmbedPlatform for Bilibili {
    fn id(&self) -> PlatformId {
        PlatformId::Bilibili
    }

    fn classify(&self, url: &Url) -> Option<UrlMatch> {
        if let Some(id) = self.watch_page_id(url) {
            let page = page_from_query(url, &["p", "page"]);
            return Some(UrlMatch::WatchPage(PlatformVideo::new(id, page)));
        }

        if url.host_str()? == self.player_host {
            let bvid = url
                .query_pairs()
                .find(|(k, _)| k == "bvid")
                .map(|(_, v)| v.into_owned())
                .filter(|v| !v.is_empty());
            let page = page_from_query(url, &["page", "p"]);
            return Some(UrlMatch::Player(
                bvid.map(|id| PlatformVideo::new(id, page)),
            ));
        }

        None
    }

    fn player_url(&self, video: &PlatformVideo) -> String {
        let mut url = self.player_base.clone();
        url.query_pairs_mut()
            .append_pair("bvid", &video.id)
            .append_pair("page", &video.page.to_string());
        url.into()
    }

    fn page_url(&self, video: &PlatformVideo) -> String {
        let mut url = self.watch_base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.clear().push("video").push(&video.id);
        }
        if video.page > 1 {
            url.query_pairs_mut()
                .append_pair("p", &video.page.to_string());
        }
        url.into()
    }
}
