//! Player state for a detail view.
//!
//! Glues the resolver, the render-mode selector and the playback trigger
//! together for whichever record is currently on screen. The presentation
//! layer calls [`PlayerState::show`] when the displayed record changes,
//! [`PlayerState::activate`] on the play gesture, and mounts whatever
//! [`PlayerState::surface`] returns.
//!
//! # Example
//!
//! ```rust
//! use embedres::content::ContentFeed;
//! use embedres::view::{PlayerState, Surface};
//!
//! let feed = ContentFeed::from_json(r#"{"items": [
//!     {"slug": "a", "title": "A", "embed": {"bilibili": "BV1ab"}}
//! ]}"#).unwrap();
//!
//! let mut player = PlayerState::default();
//! player.show(feed.find("a").unwrap());
//! assert!(matches!(player.surface(), Surface::Poster { .. }));
//!
//! player.activate();
//! assert!(matches!(player.surface(), Surface::Frame { .. }));
//! assert_eq!(player.external_link(), Some("https://www.bilibili.com/video/BV1ab"));
//! ```

use serde::Serialize;

use crate::config::EmbedConfig;
use crate::embed::{EmbedDescriptor, ResolvedEmbed, Resolver};
use crate::playback::{select_render_mode, PlaybackTrigger, RenderMode};

/// A record that can be presented in a player.
pub trait PlayableRecord {
    /// Key that changes exactly when the displayed record changes.
    fn identity(&self) -> String;

    fn embed(&self) -> Option<EmbedDescriptor>;

    fn direct_media_url(&self) -> Option<&str>;

    fn poster_url(&self) -> Option<&str>;

    fn title(&self) -> &str;
}

/// Everything derived from the displayed record, computed once per record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Presentation {
    pub identity: String,
    pub title: String,
    pub poster_url: String,
    pub resolved: ResolvedEmbed,
    pub render_mode: RenderMode,
}

impl Presentation {
    /// Resolve `record` with `resolver`.
    pub fn build<R: PlayableRecord + ?Sized>(
        resolver: &Resolver,
        record: &R,
        placeholder_poster: &str,
    ) -> Self {
        let direct = record.direct_media_url();
        let resolved = resolver.normalize(record.embed().as_ref(), direct);
        let render_mode = select_render_mode(&resolved, direct);

        Self {
            identity: record.identity(),
            title: record.title().to_string(),
            poster_url: record
                .poster_url()
                .unwrap_or(placeholder_poster)
                .to_string(),
            resolved,
            render_mode,
        }
    }
}

/// What the presentation layer should mount right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface<'a> {
    /// No record is displayed.
    Empty,
    /// Poster with a play affordance; nothing has been loaded yet.
    Poster { poster_url: &'a str, title: &'a str },
    /// Embedded frame.
    Frame { src: &'a str, title: &'a str },
    /// Native media element, started immediately.
    Native { src: &'a str, poster_url: &'a str },
    /// Played, but there is nothing to play.
    Unavailable,
}

/// Player state scoped to the displayed record.
pub struct PlayerState {
    resolver: Resolver,
    placeholder_poster: String,
    trigger: PlaybackTrigger<String>,
    current: Option<Presentation>,
}

impl PlayerState {
    pub fn new(config: &EmbedConfig) -> Self {
        Self {
            resolver: Resolver::from_config(config),
            placeholder_poster: config.content.placeholder_poster.clone(),
            trigger: PlaybackTrigger::new(),
            current: None,
        }
    }

    /// Display `record`.
    ///
    /// Resolution happens only when the record identity changes, which also
    /// resets playback. Returns `true` in that case.
    pub fn show<R: PlayableRecord + ?Sized>(&mut self, record: &R) -> bool {
        let identity = record.identity();
        if !self.trigger.show(identity.clone()) && self.current.is_some() {
            return false;
        }

        let presentation = Presentation::build(&self.resolver, record, &self.placeholder_poster);
        tracing::debug!("Showing {identity}: {:?}", presentation.render_mode);
        self.current = Some(presentation);
        true
    }

    /// Handle the play gesture. Returns `true` on the first activation for
    /// the current record.
    pub fn activate(&mut self) -> bool {
        let activated = self.trigger.activate();
        if activated {
            tracing::debug!("Playback activated for {:?}", self.trigger.item());
        }
        activated
    }

    pub fn is_active(&self) -> bool {
        self.trigger.is_active()
    }

    pub fn presentation(&self) -> Option<&Presentation> {
        self.current.as_ref()
    }

    pub fn surface(&self) -> Surface<'_> {
        let Some(p) = &self.current else {
            return Surface::Empty;
        };

        if !self.trigger.is_active() {
            return Surface::Poster {
                poster_url: &p.poster_url,
                title: &p.title,
            };
        }

        match &p.render_mode {
            RenderMode::UseIframe(src) => Surface::Frame {
                src: src.as_str(),
                title: &p.title,
            },
            RenderMode::UseNativeMedia(src) => Surface::Native {
                src: src.as_str(),
                poster_url: &p.poster_url,
            },
            RenderMode::NoPlayableSource => Surface::Unavailable,
        }
    }

    /// "Open on the original platform" link, when known.
    pub fn external_link(&self) -> Option<&str> {
        self.current.as_ref().and_then(|p| p.resolved.page_url())
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new(&EmbedConfig::default())
    }
}
