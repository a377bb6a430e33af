//! Bookmark List Component
//!
//! Bookmarks of the active scope. Rows reorder within the scope and can be
//! dragged onto a pinned tag to retag them.

use leptos::prelude::*;
use leptos_dragdrop::{bind_sortable, create_sortable, OrderedStore};

use super::sortable_list::sortable_rows;
use crate::commands::ListKind;
use crate::context::{use_api, use_app_context};
use crate::dnd::{load_list, sync_reorder};
use crate::models::Bookmark;
use crate::refresh::RefreshGate;
use crate::scope::drag_policy;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn BookmarkList() -> impl IntoView {
    let ctx = use_app_context();
    let api = use_api();
    let store = use_app_store();

    let scope = move || store.active_scope().get();
    let sortable = create_sortable(
        OrderedStore::<Bookmark>::new(store.active_scope().get_untracked().key(), Vec::new()),
        &drag_policy(),
        ctx.with_config(|c| c.drag_threshold_px),
    );

    {
        let api = api.clone();
        bind_sortable(sortable, move |commit| {
            sync_reorder(ctx, api.clone(), sortable, ListKind::Bookmarks, store.active_scope().get_untracked(), commit);
        });
    }

    let gate = StoredValue::new(RefreshGate::default());
    {
        let api = api.clone();
        Effect::new(move |_| {
            let _ = ctx.reload_trigger.get();
            let scope = scope();
            let generation = gate.try_update_value(|g| g.bump()).unwrap_or_default();
            let is_current = move || gate.try_with_value(|g| g.is_current(generation)).unwrap_or(false);
            load_list(ctx, api.clone(), sortable, ListKind::Bookmarks, scope, is_current);
        });
    }

    let render = move |bookmark: Bookmark| {
        let url = bookmark.url.clone();
        view! {
            <div class="bookmark-row">
                {bookmark.thumbnail_url.map(|src| view! { <img class="bookmark-thumb" src=src draggable="false" /> })}
                <a
                    class="bookmark-link"
                    href=url
                    target="_blank"
                    rel="noopener"
                    draggable="false"
                    on:click=move |ev| {
                        // Trailing click of a pointer drag
                        if sortable.drag_just_ended.get_untracked() {
                            ev.prevent_default();
                        }
                    }
                >
                    {bookmark.name}
                </a>
            </div>
        }
    };

    view! {
        <section class="bookmark-list">
            <h2>"Bookmarks " <small>{move || scope().label()}</small></h2>
            {sortable_rows(sortable, Some(ctx.coordinator()), render)}
        </section>
    }
}
