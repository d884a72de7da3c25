//! Embed descriptor shapes.
//!
//! [`EmbedDescriptor`] is the typed form consumed by the resolver.
//! [`RawEmbed`] is the loose object content files actually contain, where
//! any combination of keys may be present.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::site::PlatformId;

/// How a content item's video is embedded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EmbedDescriptor {
    /// A video on a known platform, by id.
    PlatformRef {
        platform: PlatformId,
        video_id: String,
        /// 1-based part number; absent means the first part.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        page: Option<u32>,
    },
    /// A URL believed to point at an embeddable player.
    PlayerUrl { url: String },
    /// A raw HTML fragment containing an `<iframe>`.
    IframeSnippet { html: String },
}

impl EmbedDescriptor {
    /// Reference a bilibili video by BV id.
    pub fn bilibili(video_id: impl Into<String>, page: Option<u32>) -> Self {
        EmbedDescriptor::PlatformRef {
            platform: PlatformId::Bilibili,
            video_id: video_id.into(),
            page,
        }
    }

    pub fn player_url(url: impl Into<String>) -> Self {
        EmbedDescriptor::PlayerUrl { url: url.into() }
    }

    pub fn iframe(html: impl Into<String>) -> Self {
        EmbedDescriptor::IframeSnippet { html: html.into() }
    }
}

/// Embed object as written in content files.
///
/// ```json
/// { "bilibili": "BV1xx411c7mD", "page": 2 }
/// { "playerUrl": "//player.bilibili.com/player.html?bvid=BV1xx411c7mD" }
/// { "iframe": "<iframe src=\"...\"></iframe>" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEmbed {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bilibili: Option<String>,
    /// Part number; numeric strings (`"2"`) are accepted, anything else
    /// that is not a positive integer counts as absent.
    #[serde(
        default,
        deserialize_with = "loose_page",
        skip_serializing_if = "Option::is_none"
    )]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iframe: Option<String>,
}

impl RawEmbed {
    /// Pick the descriptor this object describes.
    ///
    /// Keys are considered in the order `bilibili`, `playerUrl`, `iframe`;
    /// blank values count as absent.
    pub fn to_descriptor(&self) -> Option<EmbedDescriptor> {
        if let Some(id) = non_blank(self.bilibili.as_deref()) {
            return Some(EmbedDescriptor::bilibili(id.trim(), self.page));
        }
        if let Some(url) = non_blank(self.player_url.as_deref()) {
            return Some(EmbedDescriptor::player_url(url));
        }
        non_blank(self.iframe.as_deref()).map(EmbedDescriptor::iframe)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn loose_page<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let page = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(page.filter(|&p| p > 0))
}
