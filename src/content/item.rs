//! A single video or music record.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::embed::{EmbedDescriptor, RawEmbed};
use crate::view::PlayableRecord;

static BLANK_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").unwrap());

/// Record id; feeds use both numbers and strings.
///
/// Numbers that are not integers (`1.5`) are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum ItemId {
    Number(i64),
    Text(String),
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Number(n) => Ok(match n.as_i64() {
                Some(n) => ItemId::Number(n),
                None => ItemId::Text(n.to_string()),
            }),
            Value::String(s) => Ok(ItemId::Text(s)),
            other => Err(serde::de::Error::custom(format!(
                "expected a number or string id, got {other}"
            ))),
        }
    }
}

impl ItemId {
    /// Numeric value, parsing textual ids when possible.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            ItemId::Number(n) => Some(*n),
            ItemId::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Number(n) => write!(f, "{n}"),
            ItemId::Text(s) => f.write_str(s),
        }
    }
}

/// One entry of a video or music feed.
///
/// Music feeds call the poster `cover`, the embed `video` and the excerpt
/// `hottitle`; those names are accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentItem {
    pub id: Option<ItemId>,
    pub slug: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(alias = "cover")]
    pub poster: Option<String>,
    #[serde(alias = "video")]
    pub embed: Option<RawEmbed>,
    /// Self-hosted media file.
    pub src: Option<String>,
    #[serde(alias = "hottitle")]
    pub excerpt: Option<String>,
    pub body: Option<String>,
    pub duration: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

/// Treat an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ContentItem {
    /// Typed descriptor for this item's embed, if any.
    pub fn descriptor(&self) -> Option<EmbedDescriptor> {
        self.embed.as_ref().and_then(RawEmbed::to_descriptor)
    }

    pub fn direct_media_url(&self) -> Option<&str> {
        self.src.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// Poster URL, or `placeholder` when the record has none.
    pub fn poster_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        self.poster
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(placeholder)
    }

    /// Stable key for the record: slug, else id.
    ///
    /// Records with neither are keyed on what they play (title, embed and
    /// media file), so two anonymous records only share a key when they
    /// would present identically.
    pub fn identity(&self) -> String {
        if let Some(slug) = self.slug.as_deref().filter(|s| !s.is_empty()) {
            return slug.to_string();
        }
        if let Some(id) = &self.id {
            return id.to_string();
        }

        let embed = self
            .descriptor()
            .map(|d| format!("{d:?}"))
            .unwrap_or_default();
        format!(
            "{}|{embed}|{}",
            self.title,
            self.direct_media_url().unwrap_or_default()
        )
    }

    /// Body text split on blank lines, trimmed, empty paragraphs dropped.
    pub fn body_paragraphs(&self) -> Vec<&str> {
        self.body
            .as_deref()
            .map(|body| {
                BLANK_LINE
                    .split(body)
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl PlayableRecord for ContentItem {
    fn identity(&self) -> String {
        ContentItem::identity(self)
    }

    fn embed(&self) -> Option<EmbedDescriptor> {
        self.descriptor()
    }

    fn direct_media_url(&self) -> Option<&str> {
        ContentItem::direct_media_url(self)
    }

    fn poster_url(&self) -> Option<&str> {
        self.poster.as_deref().filter(|p| !p.trim().is_empty())
    }

    fn title(&self) -> &str {
        &self.title
    }
}
