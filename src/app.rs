//! Stash Frontend App
//!
//! Pinned-tag sidebar next to the bookmark, todo and playlist lists.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::{ActivePlaylist, BookmarkList, PinnedTags, TodoList, ToastHost};
use crate::config::AppConfig;
use crate::context::{Api, AppContext};
use crate::store::AppState;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let (reload_trigger, set_reload_trigger) = signal(0u32);

    // Provide context to all children
    provide_context(Store::new(AppState::new(config.playlist_uuid.clone())));
    provide_context(Api::new(&config));
    provide_context(AppContext::new((reload_trigger, set_reload_trigger), config));

    view! {
        <div class="app-layout">
            <PinnedTags />
            <main class="main-content">
                <BookmarkList />
                <TodoList />
                <ActivePlaylist />
            </main>
            <ToastHost />
        </div>
    }
}
