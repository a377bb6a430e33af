//! DOM Bindings
//!
//! Wires the sensors and the sortable engine to browser events. Pointer
//! sorting uses mouse events on a drag handle; cross-tree drags use native
//! HTML5 drag events so foreign drop targets can see them.

use leptos::ev;
use leptos::html::Div;
use leptos::prelude::*;
use std::time::Duration;
use wasm_bindgen::JsCast;

use crate::channel::DragCoordinator;
use crate::collision::{closest_center, Rect};
use crate::policy::DragPolicy;
use crate::sensor::{DragKey, KeyboardSensor, PointerSensor, SensorEvent};
use crate::session::{Bucket, DragOutcome, DropTarget, MoveCommit};
use crate::sortable::SortableList;
use crate::store::{Ordered, OrderedStore};

/// Attribute each sortable row carries so collision detection can find it
pub const ROW_ID_ATTR: &str = "data-sortable-id";

/// MIME type used for the native data-transfer channel. Foreign text or
/// links dragged in from elsewhere never carry it.
pub const TRANSFER_FORMAT: &str = "application/x-sortable-item";

/// Reactive handle over one sortable list
pub struct Sortable<T: Ordered + Send + Sync + 'static> {
    pub list: RwSignal<SortableList<T>>,
    /// Pointer position while dragging, for the overlay
    pub pointer: RwSignal<Option<(f64, f64)>>,
    /// Set briefly after a drop so the trailing click can be ignored
    pub drag_just_ended: RwSignal<bool>,
    /// Element whose `[data-sortable-id]` descendants are the drop rows
    pub container: NodeRef<Div>,
    pointer_sensor: StoredValue<PointerSensor>,
    keyboard_sensor: StoredValue<KeyboardSensor>,
    on_commit: StoredValue<Option<Callback<MoveCommit<T>>>>,
}

impl<T: Ordered + Send + Sync + 'static> Clone for Sortable<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Ordered + Send + Sync + 'static> Copy for Sortable<T> {}

pub fn create_sortable<T>(
    store: OrderedStore<T>,
    policy: &impl DragPolicy,
    threshold_px: f64,
) -> Sortable<T>
where
    T: Ordered + Send + Sync + 'static,
{
    Sortable {
        list: RwSignal::new(SortableList::new(store, policy)),
        pointer: RwSignal::new(None),
        drag_just_ended: RwSignal::new(false),
        container: NodeRef::new(),
        pointer_sensor: StoredValue::new(PointerSensor::new(threshold_px)),
        keyboard_sensor: StoredValue::new(KeyboardSensor::default()),
        on_commit: StoredValue::new(None),
    }
}

impl<T: Ordered + Send + Sync + 'static> Sortable<T> {
    /// Replace the list contents after a fetch or scope change
    pub fn refresh(&self, scope_key: impl Into<String>, items: Vec<T>, policy: &impl DragPolicy) {
        self.reset_sensors();
        self.pointer.set(None);
        self.list.update(|l| l.replace(scope_key, items, policy));
    }

    pub fn is_drag_enabled(&self) -> bool {
        self.list.with(|l| l.is_drag_enabled())
    }

    pub fn dragging_id(&self) -> Option<String> {
        self.list.with(|l| l.session().map(|s| s.active_item_id.clone()))
    }

    /// Current 1-indexed position of a row, tracked
    pub fn position_of(&self, item_id: &str) -> Option<u32> {
        self.list.with(|l| l.store().get(item_id).map(|i| i.sort_order()))
    }

    /// Row identity for keyed rendering: the id, plus the load count so a
    /// re-fetch rebuilds rows while local moves keep them (and their focus)
    pub fn row_key(&self, item: &T) -> (String, u64) {
        let loads = self.list.with_untracked(|l| l.store().loads());
        (item.item_id().to_string(), loads)
    }

    pub fn over_id(&self) -> Option<String> {
        self.list.with(|l| l.session().and_then(|s| s.over_item_id.clone()))
    }

    /// Try to undo a failed reorder; false if the list moved on since
    pub fn rollback(&self, commit: &MoveCommit<T>) -> bool {
        self.list.try_update(|l| l.rollback(commit)).unwrap_or(false)
    }

    fn reset_sensors(&self) {
        self.pointer_sensor.update_value(|s| {
            s.cancel();
        });
        self.keyboard_sensor.update_value(|k| {
            k.cancel();
        });
    }

    fn dispatch(&self, event: SensorEvent) {
        match event {
            SensorEvent::Start(id) => {
                let started = self.list.try_update(|l| l.drag_start(&id)).unwrap_or(false);
                if !started {
                    self.reset_sensors();
                }
            }
            SensorEvent::Motion { x, y } => {
                self.pointer.set(Some((x, y)));
                let over = self.row_under((x, y));
                let current = self
                    .list
                    .with_untracked(|l| l.session().and_then(|s| s.over_item_id.clone()));
                if over != current {
                    self.list.update(|l| l.drag_over(over.as_deref()));
                }
            }
            SensorEvent::Over(id) => self.list.update(|l| l.drag_over(Some(&id))),
            SensorEvent::Release => {
                let outcome = self.list.try_update(|l| l.drop_at_current());
                self.end_drag();
                let Some(commit) = outcome.and_then(DragOutcome::commit) else {
                    return;
                };
                match self.on_commit.get_value() {
                    Some(on_commit) => on_commit.run(commit),
                    None => tracing::warn!(item = %commit.request.item_id, "reorder applied with no commit handler bound"),
                }
            }
            SensorEvent::Cancel => {
                self.list.update(|l| {
                    l.drag_cancel();
                });
                self.end_drag();
            }
        }
    }

    /// Nearest row centre, or None when the pointer left the list
    fn row_under(&self, point: (f64, f64)) -> Option<String> {
        let container = self.container.get_untracked()?;
        if !Rect::from_dom(&container.get_bounding_client_rect()).contains(point) {
            return None;
        }
        let nodes = container.query_selector_all(&format!("[{}]", ROW_ID_ATTR)).ok()?;
        let rows = (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
            .filter_map(|el| {
                let id = el.get_attribute(ROW_ID_ATTR)?;
                Some((id, Rect::from_dom(&el.get_bounding_client_rect())))
            });
        closest_center(point, rows)
    }

    fn end_drag(&self) {
        self.pointer.set(None);
        self.drag_just_ended.set(true);
        let clear = self.drag_just_ended;
        set_timeout(move || clear.set(false), Duration::from_millis(100));
    }
}

/// Mousedown on a row's drag handle. Records a pending drag; it only becomes
/// a drag once the pointer travels past the threshold.
pub fn make_on_handle_mousedown<T>(sortable: Sortable<T>, item_id: String) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    T: Ordered + Send + Sync + 'static,
{
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        // Ignore if target is input or button
        if let Some(target) = ev.target() {
            if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
            if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
        }
        if !sortable.list.with_untracked(|l| l.is_drag_enabled()) {
            return;
        }
        // Keeps the browser from starting a native drag or a text selection
        ev.prevent_default();
        let (x, y) = (ev.client_x() as f64, ev.client_y() as f64);
        sortable.pointer_sensor.update_value(|s| s.press(&item_id, x, y));
    }
}

/// Keyboard sorting on a focused row
pub fn make_on_row_keydown<T>(sortable: Sortable<T>, item_id: String) -> impl Fn(web_sys::KeyboardEvent) + Clone + 'static
where
    T: Ordered + Send + Sync + 'static,
{
    move |ev: web_sys::KeyboardEvent| {
        let Some(key) = DragKey::from_key(&ev.key()) else {
            return;
        };
        if !sortable.list.with_untracked(|l| l.is_drag_enabled()) {
            return;
        }
        let order = sortable.list.with_untracked(|l| l.store().ids());
        let mut event = None;
        sortable.keyboard_sensor.update_value(|k| event = k.key(key, &item_id, &order));
        if let Some(event) = event {
            ev.prevent_default();
            sortable.dispatch(event);
        }
    }
}

/// Bind window-level mousemove/mouseup/Escape for one sortable list and
/// register the handler for applied reorders. Listeners are removed when the
/// owning component unmounts.
pub fn bind_sortable<T, F>(sortable: Sortable<T>, on_commit: F)
where
    T: Ordered + Send + Sync + 'static,
    F: Fn(MoveCommit<T>) + Send + Sync + 'static,
{
    sortable.on_commit.set_value(Some(Callback::new(on_commit)));

    let on_move = window_event_listener(ev::mousemove, move |ev: web_sys::MouseEvent| {
        let (x, y) = (ev.client_x() as f64, ev.client_y() as f64);
        let mut event = None;
        sortable.pointer_sensor.update_value(|s| event = s.motion(x, y));
        if let Some(event) = event {
            sortable.dispatch(event);
        }
    });

    let on_up = window_event_listener(ev::mouseup, move |_ev: web_sys::MouseEvent| {
        let mut event = None;
        sortable.pointer_sensor.update_value(|s| event = s.release());
        if let Some(event) = event {
            sortable.dispatch(event);
        }
        // Not dragging: the click fires naturally on the element
    });

    let on_escape = window_event_listener(ev::keydown, move |ev: web_sys::KeyboardEvent| {
        if DragKey::from_key(&ev.key()) != Some(DragKey::Escape) {
            return;
        }
        let mut event = None;
        sortable.pointer_sensor.update_value(|s| event = s.cancel());
        if let Some(event) = event {
            sortable.dispatch(event);
        }
    });

    on_cleanup(move || {
        on_move.remove();
        on_up.remove();
        on_escape.remove();
    });
}

// ========================
// Native (cross-tree) drag
// ========================

/// dragstart on a row that can leave its own list
pub fn make_on_native_dragstart(coordinator: DragCoordinator, item_id: String) -> impl Fn(web_sys::DragEvent) + Clone + 'static {
    move |ev: web_sys::DragEvent| {
        coordinator.begin(&item_id);
        if let Some(dt) = ev.data_transfer() {
            let _ = dt.set_data(TRANSFER_FORMAT, &item_id);
            dt.set_effect_allowed("copyMove");
        }
    }
}

/// dragend fires whether or not a drop happened
pub fn make_on_native_dragend(coordinator: DragCoordinator) -> impl Fn(web_sys::DragEvent) + Clone + 'static {
    move |_ev: web_sys::DragEvent| coordinator.finish()
}

/// A foreign target only receives `drop` if dragover is cancelled
pub fn on_bucket_dragover(ev: web_sys::DragEvent) {
    ev.prevent_default();
    if let Some(dt) = ev.data_transfer() {
        dt.set_drop_effect("copy");
    }
}

/// drop on `bucket`; `on_drop` receives the dragged item id and the target
pub fn make_on_bucket_drop<F>(coordinator: DragCoordinator, bucket: Bucket, on_drop: F) -> impl Fn(web_sys::DragEvent) + Clone + 'static
where
    F: Fn(String, DropTarget) + Clone + 'static,
{
    move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        let transfer = ev
            .data_transfer()
            .and_then(|dt| dt.get_data(TRANSFER_FORMAT).ok());
        if let Some(item_id) = coordinator.take_drop(transfer.as_deref()) {
            on_drop(item_id, DropTarget::Bucket(bucket.clone()));
        }
    }
}
