//! UI Components
//!
//! Leptos components for the four sortable features.

mod sortable_list;
mod bookmark_list;
mod todo_list;
mod pinned_tags;
mod song_table;
mod toast_host;

pub use bookmark_list::BookmarkList;
pub use todo_list::TodoList;
pub use pinned_tags::PinnedTags;
pub use song_table::ActivePlaylist;
pub use toast_host::ToastHost;
