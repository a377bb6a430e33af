//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::scope::Scope;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Filter of the bookmark and todo lists
    pub active_scope: Scope,
    /// Playlist shown in the song table
    pub active_playlist: Option<String>,
}

impl AppState {
    pub fn new(active_playlist: Option<String>) -> Self {
        Self {
            active_playlist,
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Switch the list filter; selecting the active tag again clears it
pub fn store_toggle_scope(store: &AppStore, scope: Scope) {
    let next = if store.active_scope().get_untracked() == scope {
        Scope::All
    } else {
        scope
    };
    tracing::debug!(scope = %next.key(), "active scope");
    store.active_scope().set(next);
}

