//! Pinned Tags Sidebar
//!
//! Pinned tags select the bookmark/todo filter, reorder among themselves,
//! and accept bookmarks dropped from the list. The fixed "Untagged" row is a
//! virtual bucket: dropping on it removes the active filter tag.

use leptos::prelude::*;
use leptos_dragdrop::{
    bind_sortable, create_sortable, make_on_bucket_drop, on_bucket_dragover, Bucket, DropTarget, OrderedStore,
};

use super::sortable_list::sortable_rows;
use crate::commands::ListKind;
use crate::context::{use_api, use_app_context, Api, AppContext};
use crate::dnd::{drop_on_target, load_list, sync_reorder};
use crate::models::PinnedTag;
use crate::refresh::RefreshGate;
use crate::scope::{drag_policy, Scope};
use crate::store::{store_toggle_scope, use_app_store, AppStateStoreFields, AppStore};

/// Native drop handler for one bucket row
fn bucket_drop_handler(
    ctx: AppContext,
    api: Api,
    store: AppStore,
    bucket: Bucket,
) -> impl Fn(web_sys::DragEvent) + Clone + 'static {
    make_on_bucket_drop(ctx.coordinator(), bucket, move |item_id: String, target: DropTarget| {
        let active_filter = store.active_scope().get_untracked().active_tag().map(str::to_string);
        drop_on_target(ctx, api.clone(), target, item_id, active_filter);
    })
}

#[component]
pub fn PinnedTags() -> impl IntoView {
    let ctx = use_app_context();
    let api = use_api();
    let store = use_app_store();

    let sortable = create_sortable(
        OrderedStore::<PinnedTag>::new(Scope::PinnedTags.key(), Vec::new()),
        &drag_policy(),
        ctx.with_config(|c| c.drag_threshold_px),
    );

    {
        let api = api.clone();
        bind_sortable(sortable, move |commit| {
            sync_reorder(ctx, api.clone(), sortable, ListKind::PinnedTags, Scope::PinnedTags, commit);
        });
    }

    let gate = StoredValue::new(RefreshGate::default());
    {
        let api = api.clone();
        Effect::new(move |_| {
            let _ = ctx.reload_trigger.get();
            let generation = gate.try_update_value(|g| g.bump()).unwrap_or_default();
            let is_current = move || gate.try_with_value(|g| g.is_current(generation)).unwrap_or(false);
            load_list(ctx, api.clone(), sortable, ListKind::PinnedTags, Scope::PinnedTags, is_current);
        });
    }

    let is_active = move |scope: &Scope| store.active_scope().with(|s| s == scope);

    let render = {
        let api = api.clone();
        move |tag: PinnedTag| {
            let scope = Scope::Tag(tag.name.clone());
            let selected = {
                let scope = scope.clone();
                move || is_active(&scope)
            };
            let bucket = Bucket::Classified {
                id: tag.id.to_string(),
                name: tag.name.clone(),
            };
            view! {
                <div
                    class="pinned-tag"
                    class:selected=selected
                    on:click=move |_| {
                        if !sortable.drag_just_ended.get_untracked() {
                            store_toggle_scope(&store, scope.clone());
                        }
                    }
                    on:dragover=on_bucket_dragover
                    on:drop=bucket_drop_handler(ctx, api.clone(), store, bucket)
                >
                    <span class="pinned-tag-name">"#" {tag.name}</span>
                    <span class="pinned-tag-count">{tag.count}</span>
                </div>
            }
        }
    };

    view! {
        <aside class="pinned-tags">
            <div
                class="pinned-tag virtual"
                class:selected=move || is_active(&Scope::All)
                on:click=move |_| store_toggle_scope(&store, Scope::All)
            >
                "All"
            </div>
            {sortable_rows(sortable, None, render)}
            <div
                class="pinned-tag virtual"
                class:selected=move || is_active(&Scope::Untagged)
                on:click=move |_| store_toggle_scope(&store, Scope::Untagged)
                on:dragover=on_bucket_dragover
                on:drop=bucket_drop_handler(ctx, api, store, Bucket::Unclassified)
            >
                "Untagged"
            </div>
        </aside>
    }
}
