//! Todo List Component
//!
//! Todos of the active scope. Views without positions (untagged and
//! unfiltered) are polled, since todos drift in and out of them as they are
//! tagged elsewhere.

use leptos::prelude::*;
use leptos_dragdrop::{bind_sortable, create_sortable, OrderedStore};

use super::sortable_list::sortable_rows;
use crate::commands::ListKind;
use crate::context::{use_api, use_app_context};
use crate::dnd::{load_list, sync_reorder};
use crate::models::Todo;
use crate::refresh::AutoRefresh;
use crate::scope::drag_policy;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn TodoList() -> impl IntoView {
    let ctx = use_app_context();
    let api = use_api();
    let store = use_app_store();

    let scope = move || store.active_scope().get();
    let sortable = create_sortable(
        OrderedStore::<Todo>::new(store.active_scope().get_untracked().key(), Vec::new()),
        &drag_policy(),
        ctx.with_config(|c| c.drag_threshold_px),
    );

    {
        let api = api.clone();
        bind_sortable(sortable, move |commit| {
            sync_reorder(ctx, api.clone(), sortable, ListKind::Todos, store.active_scope().get_untracked(), commit);
        });
    }

    let refresh = AutoRefresh::new();
    let interval_ms = ctx.with_config(|c| c.refresh_interval_ms);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let scope = scope();

        let every = (scope.is_zero_position() && interval_ms > 0).then_some(interval_ms);
        let tick = {
            let api = api.clone();
            let scope = scope.clone();
            move |generation: u64| {
                tracing::debug!(scope = %scope.key(), generation, "auto-refresh");
                let is_current = move || refresh.is_current(generation);
                load_list(ctx, api.clone(), sortable, ListKind::Todos, scope.clone(), is_current);
            }
        };
        let generation = refresh.restart(every, tick);

        let is_current = move || refresh.is_current(generation);
        load_list(ctx, api.clone(), sortable, ListKind::Todos, scope, is_current);
    });

    let render = move |todo: Todo| {
        view! {
            <div class="todo-row">
                {todo.priority.map(|p| view! { <span class="todo-priority">{p}</span> })}
                <span class="todo-name">{todo.name}</span>
            </div>
        }
    };

    view! {
        <section class="todo-list">
            <h2>"Todos " <small>{move || scope().label()}</small></h2>
            {sortable_rows(sortable, None, render)}
        </section>
    }
}
