//! Descriptor normalization.
//!
//! Turns an [`EmbedDescriptor`] into a [`ResolvedEmbed`]. Resolution never
//! fails: input that cannot be understood degrades to a passthrough of the
//! raw URL, and missing input degrades to [`ResolvedEmbed::Unresolved`].

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use super::{EmbedDescriptor, ResolvedEmbed};
use crate::config::EmbedConfig;
use crate::site::{EmbedPlatform, PlatformRouter, PlatformVideo, UrlMatch};

static DEFAULT_RESOLVER: LazyLock<Resolver> = LazyLock::new(Resolver::new);

static IFRAME_SRC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)src=["']([^"']+)["']"#).unwrap());

/// Normalize `descriptor` using the default platform hosts.
///
/// `direct_media_url` does not influence the result; it is accepted so a
/// record's fields can be passed through as-is.
///
/// Player URLs and iframe `src` values are trimmed before they are
/// classified. A value that still does not parse as a URL is returned as
/// the player URL exactly as the descriptor gave it, surrounding
/// whitespace included.
///
/// ```rust
/// use embedres::{normalize, EmbedDescriptor, ResolvedEmbed};
///
/// let resolved = normalize(Some(&EmbedDescriptor::bilibili("BV1xx411c7mD", Some(3))), None);
/// assert_eq!(
///     resolved.page_url(),
///     Some("https://www.bilibili.com/video/BV1xx411c7mD?p=3")
/// );
/// ```
pub fn normalize(
    descriptor: Option<&EmbedDescriptor>,
    direct_media_url: Option<&str>,
) -> ResolvedEmbed {
    DEFAULT_RESOLVER.normalize(descriptor, direct_media_url)
}

/// Resolves descriptors against a fixed set of platforms.
///
/// Immutable after construction; safe to share between threads.
pub struct Resolver {
    router: PlatformRouter,
}

impl Resolver {
    #[must_use]
    pub fn new() -> Self {
        Self {
            router: PlatformRouter::new(),
        }
    }

    #[must_use]
    pub fn from_config(config: &EmbedConfig) -> Self {
        Self {
            router: PlatformRouter::from_config(config),
        }
    }

    pub fn router(&self) -> &PlatformRouter {
        &self.router
    }

    /// Resolve a descriptor. See [`normalize`].
    pub fn normalize(
        &self,
        descriptor: Option<&EmbedDescriptor>,
        direct_media_url: Option<&str>,
    ) -> ResolvedEmbed {
        let _ = direct_media_url;

        let raw = match descriptor {
            None => return ResolvedEmbed::Unresolved,
            Some(EmbedDescriptor::PlatformRef {
                platform,
                video_id,
                page,
            }) => {
                let Some(platform_impl) = self.router.get(*platform) else {
                    tracing::warn!("No embed platform registered for {platform}");
                    return ResolvedEmbed::Unresolved;
                };
                let video = PlatformVideo::new(video_id.as_str(), page.unwrap_or(1));
                return embed_video(platform_impl, &video);
            }
            Some(EmbedDescriptor::PlayerUrl { url }) => Some(url.as_str()),
            Some(EmbedDescriptor::IframeSnippet { html }) => extract_iframe_src(html),
        };

        let Some(original) = raw.filter(|s| !s.trim().is_empty()) else {
            return ResolvedEmbed::Unresolved;
        };

        self.resolve_url(original, upgrade_protocol_relative(original.trim()).into_owned())
    }

    /// Classify `raw`, the trimmed and upgraded form of `original`.
    fn resolve_url(&self, original: &str, raw: String) -> ResolvedEmbed {
        let url = match Url::parse(&raw) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!("Embed URL {original:?} did not parse ({e}), passing through");
                return passthrough(original.to_string());
            }
        };

        match self.router.classify(&url) {
            Some((platform, UrlMatch::WatchPage(video))) => embed_video(platform, &video),
            Some((platform, UrlMatch::Player(video))) => ResolvedEmbed::Embeddable {
                page_url: video.map(|v| platform.page_url(&v)),
                player_url: raw,
            },
            None => passthrough(raw),
        }
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

fn embed_video(platform: &dyn EmbedPlatform, video: &PlatformVideo) -> ResolvedEmbed {
    ResolvedEmbed::Embeddable {
        player_url: platform.player_url(video),
        page_url: Some(platform.page_url(video)),
    }
}

fn passthrough(raw: String) -> ResolvedEmbed {
    ResolvedEmbed::Embeddable {
        player_url: raw,
        page_url: None,
    }
}

/// Prefix a protocol-relative URL (`//host/path`) with `https:`.
pub fn upgrade_protocol_relative(raw: &str) -> Cow<'_, str> {
    match raw.strip_prefix("//") {
        Some(rest) => Cow::Owned(format!("https://{rest}")),
        None => Cow::Borrowed(raw),
    }
}

/// Value of the first `src="..."` or `src='...'` attribute in `html`.
pub fn extract_iframe_src(html: &str) -> Option<&str> {
    IFRAME_SRC
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn embeddable(player_url: &str, page_url: Option<&str>) -> ResolvedEmbed {
        ResolvedEmbed::Embeddable {
            player_url: player_url.to_string(),
            page_url: page_url.map(str::to_string),
        }
    }

    #[test]
    fn platform_ref_first_page() {
        let d = EmbedDescriptor::bilibili("BV1xx411c7mD", Some(1));
        assert_eq!(
            normalize(Some(&d), None),
            embeddable(
                "https://player.bilibili.com/player.html?bvid=BV1xx411c7mD&page=1",
                Some("https://www.bilibili.com/video/BV1xx411c7mD"),
            )
        );
    }

    #[test]
    fn platform_ref_later_page() {
        let d = EmbedDescriptor::bilibili("BV1xx411c7mD", Some(3));
        let resolved = normalize(Some(&d), None);
        assert_eq!(
            resolved.player_url(),
            Some("https://player.bilibili.com/player.html?bvid=BV1xx411c7mD&page=3")
        );
        assert!(resolved.page_url().unwrap().ends_with("?p=3"));
    }

    #[test]
    fn platform_ref_without_page_defaults_to_one() {
        let resolved = normalize(Some(&EmbedDescriptor::bilibili("BV1ab", None)), None);
        assert_eq!(
            resolved.player_url(),
            Some("https://player.bilibili.com/player.html?bvid=BV1ab&page=1")
        );
    }

    #[test]
    fn protocol_relative_player_url_is_upgraded() {
        let d = EmbedDescriptor::player_url("//player.bilibili.com/player.html?bvid=BV1yy&page=2");
        assert_eq!(
            normalize(Some(&d), None),
            embeddable(
                "https://player.bilibili.com/player.html?bvid=BV1yy&page=2",
                Some("https://www.bilibili.com/video/BV1yy?p=2"),
            )
        );
    }

    #[test]
    fn iframe_snippet_uses_quoted_src() {
        let d = EmbedDescriptor::iframe(
            "<iframe src='https://player.bilibili.com/player.html?bvid=BV1zz'></iframe>",
        );
        assert_eq!(
            normalize(Some(&d), None),
            embeddable(
                "https://player.bilibili.com/player.html?bvid=BV1zz",
                Some("https://www.bilibili.com/video/BV1zz"),
            )
        );
    }

    #[test]
    fn iframe_snippet_with_protocol_relative_double_quoted_src() {
        let d = EmbedDescriptor::iframe(
            r#"<iframe SRC="//player.bilibili.com/player.html?bvid=BV1zz&p=4" allowfullscreen></iframe>"#,
        );
        assert_eq!(
            normalize(Some(&d), None),
            embeddable(
                "https://player.bilibili.com/player.html?bvid=BV1zz&p=4",
                Some("https://www.bilibili.com/video/BV1zz?p=4"),
            )
        );
    }

    #[test]
    fn iframe_without_src_is_unresolved() {
        let d = EmbedDescriptor::iframe("<iframe allowfullscreen></iframe>");
        assert_eq!(normalize(Some(&d), None), ResolvedEmbed::Unresolved);
    }

    #[test]
    fn watch_page_url_is_rewritten_to_player() {
        let d = EmbedDescriptor::player_url("https://www.bilibili.com/video/BV1xx411c7mD/?p=2");
        assert_eq!(
            normalize(Some(&d), None),
            embeddable(
                "https://player.bilibili.com/player.html?bvid=BV1xx411c7mD&page=2",
                Some("https://www.bilibili.com/video/BV1xx411c7mD?p=2"),
            )
        );
    }

    #[test]
    fn player_host_without_bvid_has_no_page_url() {
        let d = EmbedDescriptor::player_url("https://player.bilibili.com/player.html?aid=170001");
        assert_eq!(
            normalize(Some(&d), None),
            embeddable("https://player.bilibili.com/player.html?aid=170001", None)
        );
    }

    #[test]
    fn malformed_url_passes_through() {
        let d = EmbedDescriptor::player_url("not a valid url");
        assert_eq!(normalize(Some(&d), None), embeddable("not a valid url", None));

        let d = EmbedDescriptor::player_url("https://exa mple.com/player");
        assert_eq!(
            normalize(Some(&d), None),
            embeddable("https://exa mple.com/player", None)
        );
    }

    #[test]
    fn malformed_url_passes_through_untrimmed() {
        let d = EmbedDescriptor::player_url(" not a url ");
        assert_eq!(normalize(Some(&d), None), embeddable(" not a url ", None));

        let d = EmbedDescriptor::iframe("<iframe src=' /relative/player '></iframe>");
        assert_eq!(
            normalize(Some(&d), None),
            embeddable(" /relative/player ", None)
        );
    }

    #[test]
    fn parseable_url_is_trimmed() {
        let d = EmbedDescriptor::player_url("  //player.bilibili.com/player.html?aid=1 \n");
        assert_eq!(
            normalize(Some(&d), None),
            embeddable("https://player.bilibili.com/player.html?aid=1", None)
        );
    }

    #[test]
    fn unrecognized_url_passes_through() {
        let d = EmbedDescriptor::player_url("https://www.youtube.com/embed/dQw4w9WgXcQ");
        assert_eq!(
            normalize(Some(&d), None),
            embeddable("https://www.youtube.com/embed/dQw4w9WgXcQ", None)
        );
    }

    #[test]
    fn absent_or_blank_input_is_unresolved() {
        assert_eq!(normalize(None, None), ResolvedEmbed::Unresolved);
        assert_eq!(normalize(None, Some("/videos/a.mp4")), ResolvedEmbed::Unresolved);
        let d = EmbedDescriptor::player_url("   ");
        assert_eq!(normalize(Some(&d), None), ResolvedEmbed::Unresolved);
    }

    #[test]
    fn direct_media_does_not_affect_resolution() {
        let d = EmbedDescriptor::player_url("https://x.test/player");
        assert_eq!(
            normalize(Some(&d), Some("/videos/a.mp4")),
            normalize(Some(&d), None)
        );
    }

    #[test]
    fn normalize_is_deterministic() {
        let d = EmbedDescriptor::player_url("//player.bilibili.com/player.html?bvid=BV1yy&page=2");
        assert_eq!(normalize(Some(&d), None), normalize(Some(&d), None));
    }

    #[test]
    fn custom_host_from_config() {
        let config =
            EmbedConfig::from_toml_str("[bilibili]\nhost = \"bilibili.example\"\n").unwrap();
        let resolver = Resolver::from_config(&config);

        let resolved = resolver.normalize(Some(&EmbedDescriptor::bilibili("BV1ab", Some(2))), None);
        assert_eq!(
            resolved.player_url(),
            Some("https://player.bilibili.example/player.html?bvid=BV1ab&page=2")
        );
        assert_eq!(
            resolved.page_url(),
            Some("https://www.bilibili.example/video/BV1ab?p=2")
        );

        // The default host is no longer special.
        let d = EmbedDescriptor::player_url("https://www.bilibili.com/video/BV1ab");
        assert_eq!(resolver.normalize(Some(&d), None).page_url(), None);
    }

    #[test]
    fn upgrade_leaves_absolute_urls_alone() {
        assert_eq!(upgrade_protocol_relative("https://a.test/x"), "https://a.test/x");
        assert_eq!(upgrade_protocol_relative("/videos/a.mp4"), "/videos/a.mp4");
        assert_eq!(upgrade_protocol_relative("//a.test/x"), "https://a.test/x");
    }

    #[test]
    fn extract_takes_first_src() {
        let html = r#"<iframe src="https://a.test/1"></iframe><iframe src="https://b.test/2">"#;
        assert_eq!(extract_iframe_src(html), Some("https://a.test/1"));
        assert_eq!(extract_iframe_src("<div></div>"), None);
    }
}
