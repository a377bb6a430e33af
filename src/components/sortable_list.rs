//! Sortable List Component
//!
//! Rows of one sortable list with a drag handle, keyboard sorting, and a
//! floating copy of the dragged row. Rows can optionally leave the list as
//! native drags toward foreign drop targets.

use leptos::prelude::*;
use leptos_dragdrop::{
    make_on_handle_mousedown, make_on_native_dragend, make_on_native_dragstart, make_on_row_keydown, DragCoordinator,
    DragPhase, Ordered, Sortable,
};

/// Render the rows of `sortable`. `native` makes rows cross-tree drag
/// sources. Dragging is wired only while the list's scope allows it.
pub fn sortable_rows<T, F, V>(sortable: Sortable<T>, native: Option<DragCoordinator>, render: F) -> impl IntoView
where
    T: Ordered + Send + Sync + 'static,
    F: Fn(T) -> V + Clone + Send + Sync + 'static,
    V: IntoView + 'static,
{
    let enabled = move || sortable.is_drag_enabled();
    let overlay_render = render.clone();

    let row = move |item: T| {
        let row_id = item.item_id().to_string();
        let dragging = {
            let id = row_id.clone();
            move || sortable.list.with(|l| l.item_phase(&id) == DragPhase::Dragging)
        };
        let over = {
            let id = row_id.clone();
            move || sortable.over_id().as_deref() == Some(id.as_str()) && sortable.dragging_id().as_deref() != Some(id.as_str())
        };
        let handle_id = row_id.clone();
        let handle = move || {
            enabled().then(|| {
                let on_mousedown = make_on_handle_mousedown(sortable, handle_id.clone());
                view! { <span class="drag-handle" title="Drag to reorder" on:mousedown=on_mousedown>"⠿"</span> }
            })
        };

        let native_start = native.clone().map(|c| make_on_native_dragstart(c, row_id.clone()));
        let native_end = native.clone().map(make_on_native_dragend);
        let has_native = native.is_some();

        view! {
            <div
                class="sortable-row"
                class:dragging=dragging
                class:drop-over=over
                data-sortable-id=row_id.clone()
                tabindex=move || if enabled() { "0" } else { "-1" }
                draggable=move || if has_native && enabled() { "true" } else { "false" }
                on:keydown=make_on_row_keydown(sortable, row_id.clone())
                on:dragstart=move |ev: web_sys::DragEvent| {
                    let Some(start) = &native_start else { return };
                    if sortable.list.with_untracked(|l| l.is_drag_enabled()) {
                        start(ev);
                    } else {
                        // Links and images inside the row are draggable on their own
                        ev.prevent_default();
                    }
                }
                on:dragend=move |ev: web_sys::DragEvent| {
                    if let Some(end) = &native_end {
                        end(ev);
                    }
                }
            >
                {handle}
                {render(item)}
            </div>
        }
    };

    let overlay = move || {
        let (x, y) = sortable.pointer.get()?;
        let id = sortable.dragging_id()?;
        let item = sortable.list.with(|l| l.store().get(&id).cloned())?;
        Some(view! {
            <div
                class="drag-overlay"
                style=format!("position: fixed; left: {}px; top: {}px; pointer-events: none;", x + 8.0, y + 8.0)
            >
                {overlay_render(item)}
            </div>
        })
    };

    view! {
        <div class="sortable-list" class:drag-disabled=move || !enabled() node_ref=sortable.container>
            <For
                each=move || sortable.list.with(|l| l.items().to_vec())
                key=move |item: &T| sortable.row_key(item)
                children=row
            />
            {overlay}
        </div>
    }
}
