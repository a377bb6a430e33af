//! Frontend Data Models
//!
//! Rows of the four sortable features, as returned by the list endpoints.

use leptos_dragdrop::Ordered;
use serde::{Deserialize, Serialize};

/// A saved link
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub uuid: String,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub sort_order: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub sort_order: u32,
}

/// A tag pinned to the sidebar. Reordering addresses it by name, tag
/// assignment by numeric id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PinnedTag {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub sort_order: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaylistSong {
    pub uuid: String,
    pub title: String,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub sort_order: u32,
}

macro_rules! impl_ordered {
    ($ty:ty, $id:ident) => {
        impl Ordered for $ty {
            fn item_id(&self) -> &str {
                &self.$id
            }

            fn sort_order(&self) -> u32 {
                self.sort_order
            }

            fn set_sort_order(&mut self, sort_order: u32) {
                self.sort_order = sort_order;
            }
        }
    };
}

impl_ordered!(Bookmark, uuid);
impl_ordered!(Todo, uuid);
impl_ordered!(PinnedTag, name);
impl_ordered!(PlaylistSong, uuid);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bookmark_defaults_missing_fields() {
        let json = r#"[{"uuid":"b1","name":"Rust","url":"https://rust-lang.org"}]"#;
        let bookmarks: Vec<Bookmark> = serde_json::from_str(json).unwrap();
        assert_eq!(bookmarks[0].sort_order, 0);
        assert_eq!(bookmarks[0].thumbnail_url, None);
        assert_eq!(bookmarks[0].item_id(), "b1");
    }

    #[test]
    fn test_pinned_tag_is_keyed_by_name() {
        let tag = PinnedTag { id: 7, name: "personal".into(), count: 3, sort_order: 2 };
        assert_eq!(tag.item_id(), "personal");
        assert_eq!(tag.sort_order(), 2);
    }
}
