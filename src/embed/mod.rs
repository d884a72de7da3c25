//! Embed descriptor resolution.
//!
//! A content item may describe its video as a platform reference, a player
//! URL, or a pasted `<iframe>` snippet. [`normalize`] collapses all of
//! these into a single [`ResolvedEmbed`]: the URL to put in a frame plus,
//! when the platform is recognized, the canonical watch page.

pub mod descriptor;
pub mod normalize;

use serde::Serialize;

pub use descriptor::{EmbedDescriptor, RawEmbed};
pub use normalize::{extract_iframe_src, normalize, upgrade_protocol_relative, Resolver};

/// Outcome of normalizing a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResolvedEmbed {
    /// A frame can be constructed.
    Embeddable {
        /// URL for the frame's `src`.
        player_url: String,
        /// Watch page on the origin platform, if recognized.
        page_url: Option<String>,
    },
    /// No frame could be constructed.
    Unresolved,
}

impl ResolvedEmbed {
    pub fn is_embeddable(&self) -> bool {
        matches!(self, ResolvedEmbed::Embeddable { .. })
    }

    pub fn player_url(&self) -> Option<&str> {
        match self {
            ResolvedEmbed::Embeddable { player_url, .. } => Some(player_url),
            ResolvedEmbed::Unresolved => None,
        }
    }

    pub fn page_url(&self) -> Option<&str> {
        match self {
            ResolvedEmbed::Embeddable { page_url, .. } => page_url.as_deref(),
            ResolvedEmbed::Unresolved => None,
        }
    }
}
