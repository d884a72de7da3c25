//! Render-mode selection and the deferred playback trigger.
//!
//! Nothing is loaded until the viewer asks for it: a [`PlaybackTrigger`]
//! stays inactive for each newly shown item until it is activated, and the
//! [`RenderMode`] decides what gets mounted once it is.

use serde::Serialize;

use crate::embed::ResolvedEmbed;

/// Which playback surface to mount.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "mode", content = "src", rename_all = "snake_case")]
pub enum RenderMode {
    /// Embedded frame pointing at the player URL.
    UseIframe(String),
    /// Native media element playing a self-hosted file.
    UseNativeMedia(String),
    /// Neither an embed nor a media file is available.
    NoPlayableSource,
}

impl RenderMode {
    pub fn is_playable(&self) -> bool {
        !matches!(self, RenderMode::NoPlayableSource)
    }
}

/// Choose a render mode.
///
/// A resolved embed always wins over a self-hosted file, even when both
/// exist. A blank `direct_media_url` counts as absent.
pub fn select_render_mode(resolved: &ResolvedEmbed, direct_media_url: Option<&str>) -> RenderMode {
    match (resolved, direct_media_url.filter(|u| !u.trim().is_empty())) {
        (ResolvedEmbed::Embeddable { player_url, .. }, _) => RenderMode::UseIframe(player_url.clone()),
        (ResolvedEmbed::Unresolved, Some(src)) => RenderMode::UseNativeMedia(src.to_string()),
        (ResolvedEmbed::Unresolved, None) => RenderMode::NoPlayableSource,
    }
}

/// Two-state "has the viewer pressed play" flag, scoped to one item.
///
/// `K` identifies the displayed item. Showing a different item resets the
/// trigger; there is no way to deactivate it otherwise.
#[derive(Debug, Clone)]
pub struct PlaybackTrigger<K> {
    item: Option<K>,
    active: bool,
}

impl<K: PartialEq> PlaybackTrigger<K> {
    /// A trigger with nothing displayed.
    pub fn new() -> Self {
        Self {
            item: None,
            active: false,
        }
    }

    /// A trigger already showing `item`, inactive.
    pub fn for_item(item: K) -> Self {
        Self {
            item: Some(item),
            active: false,
        }
    }

    /// Display `item`. Returns `true` if the identity changed and the
    /// trigger was reset.
    pub fn show(&mut self, item: K) -> bool {
        if self.item.as_ref() == Some(&item) {
            return false;
        }
        self.item = Some(item);
        self.active = false;
        true
    }

    /// Record a play gesture. Returns `true` only on the transition from
    /// inactive to active; ignored when nothing is displayed.
    pub fn activate(&mut self) -> bool {
        if self.active || self.item.is_none() {
            return false;
        }
        self.active = true;
        true
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn item(&self) -> Option<&K> {
        self.item.as_ref()
    }
}

impl<K: PartialEq> Default for PlaybackTrigger<K> {
    fn default() -> Self {
        Self::new()
    }
}
