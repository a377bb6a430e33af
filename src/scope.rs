//! List Scopes
//!
//! The grouping context a list is fetched and ordered in. Each scope maps to
//! a key for the drag engine and to the form field the backend expects on a
//! position update.

use leptos_dragdrop::{DragPolicy, VirtualBucketPolicy, UNCLASSIFIED_SCOPE_KEY};

/// Scope key of the unfiltered "everything" view
pub const ALL_SCOPE_KEY: &str = "all";

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Items carrying one tag, ordered within that tag
    Tag(String),
    /// Virtual bucket of items with no tag
    Untagged,
    /// Unfiltered view
    #[default]
    All,
    /// The pinned-tag sidebar itself
    PinnedTags,
    /// Songs of one playlist
    Playlist(String),
}

impl Scope {
    pub fn key(&self) -> String {
        match self {
            Scope::Tag(name) => format!("tag:{}", name),
            Scope::Untagged => UNCLASSIFIED_SCOPE_KEY.to_string(),
            Scope::All => ALL_SCOPE_KEY.to_string(),
            Scope::PinnedTags => "pinned-tags".to_string(),
            Scope::Playlist(uuid) => format!("playlist:{}", uuid),
        }
    }

    /// `(field, value)` discriminating the scope in a position update
    pub fn form_field(&self) -> Option<(&'static str, String)> {
        match self {
            Scope::Tag(name) => Some(("tag", name.clone())),
            Scope::Playlist(uuid) => Some(("playlist_uuid", uuid.clone())),
            _ => None,
        }
    }

    /// Tag the list is currently filtered by
    pub fn active_tag(&self) -> Option<&str> {
        match self {
            Scope::Tag(name) => Some(name),
            _ => None,
        }
    }

    /// Views without meaningful positions; their contents can change under
    /// the user (items gaining or losing tags elsewhere)
    pub fn is_zero_position(&self) -> bool {
        matches!(self, Scope::Untagged | Scope::All)
    }

    pub fn label(&self) -> String {
        match self {
            Scope::Tag(name) => format!("#{}", name),
            Scope::Untagged => "Untagged".to_string(),
            Scope::All => "All".to_string(),
            Scope::PinnedTags => "Pinned tags".to_string(),
            Scope::Playlist(_) => "Playlist".to_string(),
        }
    }
}

/// Dragging is off in the untagged bucket and in the unfiltered view
pub fn drag_policy() -> VirtualBucketPolicy {
    VirtualBucketPolicy::new([UNCLASSIFIED_SCOPE_KEY, ALL_SCOPE_KEY])
}

pub fn is_drag_enabled(scope: &Scope) -> bool {
    drag_policy().is_drag_enabled(&scope.key())
}
