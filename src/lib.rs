//! `embedres` - Video embed resolution
//!
//! Content items describe their video in whatever shape was convenient
//! when the record was written: a platform id, a player URL, a watch page
//! URL, a pasted `<iframe>`, or a self-hosted file. This crate turns any of
//! those into something a page can render.
//!
//! # Features
//!
//! - **Normalization**: [`normalize`] maps an [`EmbedDescriptor`] to a
//!   [`ResolvedEmbed`] (frame URL + canonical watch page)
//! - **Render mode**: [`select_render_mode`] picks frame, native media, or
//!   nothing
//! - **Deferred playback**: [`PlaybackTrigger`] keeps third-party frames
//!   unloaded until the viewer presses play
//! - **Content feeds**: typed video/music records parsed from JSON
//!
//! # Example
//!
//! ```rust
//! use embedres::{normalize, select_render_mode, EmbedDescriptor, RenderMode};
//!
//! let descriptor = EmbedDescriptor::player_url("//player.bilibili.com/player.html?bvid=BV1yy&page=2");
//! let resolved = normalize(Some(&descriptor), None);
//!
//! assert_eq!(resolved.page_url(), Some("https://www.bilibili.com/video/BV1yy?p=2"));
//! assert_eq!(
//!     select_render_mode(&resolved, Some("/videos/fallback.mp4")),
//!     RenderMode::UseIframe("https://player.bilibili.com/player.html?bvid=BV1yy&page=2".into())
//! );
//! ```

pub mod config;
pub mod content;
pub mod embed;
pub mod playback;
pub mod site;
pub mod view;

pub use config::EmbedConfig;
pub use content::{ContentError, ContentFeed, ContentItem};
pub use embed::{normalize, EmbedDescriptor, RawEmbed, ResolvedEmbed, Resolver};
pub use playback::{select_render_mode, PlaybackTrigger, RenderMode};
pub use site::{EmbedPlatform, PlatformId, PlatformRouter};
pub use view::{PlayableRecord, PlayerState, Surface};

/// Version of embedres
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
