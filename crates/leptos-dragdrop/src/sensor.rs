//! Gesture Sensors
//!
//! Pointer and keyboard recognizers. They only decide *when* a gesture
//! starts, moves and ends; the sortable engine decides what it means.
//! Uses a movement threshold to distinguish click from drag.

/// Default travel distance in pixels before a press becomes a drag
pub const DRAG_THRESHOLD_PX: f64 = 5.0;

/// What a sensor recognized
#[derive(Clone, Debug, PartialEq)]
pub enum SensorEvent {
    Start(String),
    /// Pointer moved while dragging
    Motion { x: f64, y: f64 },
    /// Keyboard cursor moved onto another row
    Over(String),
    /// Drop at the current target
    Release,
    Cancel,
}

#[derive(Clone, Debug)]
struct Pending {
    item_id: String,
    start_x: f64,
    start_y: f64,
}

/// Mouse/pointer recognizer with a minimum travel distance
#[derive(Clone, Debug)]
pub struct PointerSensor {
    threshold: f64,
    pending: Option<Pending>,
    active: Option<String>,
}

impl Default for PointerSensor {
    fn default() -> Self {
        Self::new(DRAG_THRESHOLD_PX)
    }
}

impl PointerSensor {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            pending: None,
            active: None,
        }
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Primary button went down on a drag source
    pub fn press(&mut self, item_id: &str, x: f64, y: f64) {
        if self.active.is_some() {
            return;
        }
        self.pending = Some(Pending {
            item_id: item_id.to_string(),
            start_x: x,
            start_y: y,
        });
    }

    pub fn motion(&mut self, x: f64, y: f64) -> Option<SensorEvent> {
        if self.active.is_some() {
            return Some(SensorEvent::Motion { x, y });
        }
        let pending = self.pending.as_ref()?;
        let travelled = (x - pending.start_x).hypot(y - pending.start_y);
        if travelled < self.threshold {
            return None;
        }
        let item_id = pending.item_id.clone();
        self.pending = None;
        self.active = Some(item_id.clone());
        Some(SensorEvent::Start(item_id))
    }

    /// Button released. `None` means it was a plain click.
    pub fn release(&mut self) -> Option<SensorEvent> {
        self.pending = None;
        self.active.take().map(|_| SensorEvent::Release)
    }

    pub fn cancel(&mut self) -> Option<SensorEvent> {
        self.pending = None;
        self.active.take().map(|_| SensorEvent::Cancel)
    }
}

/// Keys the keyboard sensor understands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragKey {
    Space,
    Enter,
    Escape,
    ArrowUp,
    ArrowDown,
}

impl DragKey {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            " " | "Spacebar" => Some(DragKey::Space),
            "Enter" => Some(DragKey::Enter),
            "Escape" | "Esc" => Some(DragKey::Escape),
            "ArrowUp" | "Up" => Some(DragKey::ArrowUp),
            "ArrowDown" | "Down" => Some(DragKey::ArrowDown),
            _ => None,
        }
    }
}

/// Space/Enter picks up and drops, arrows move, Escape cancels
#[derive(Clone, Debug, Default)]
pub struct KeyboardSensor {
    active: Option<String>,
    cursor: usize,
}

impl KeyboardSensor {
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Handle a key pressed while `focused_id` has focus. `order` is the
    /// current row order of the list.
    pub fn key(&mut self, key: DragKey, focused_id: &str, order: &[String]) -> Option<SensorEvent> {
        match (&self.active, key) {
            (None, DragKey::Space | DragKey::Enter) => {
                let index = order.iter().position(|id| id == focused_id)?;
                self.active = Some(focused_id.to_string());
                self.cursor = index;
                Some(SensorEvent::Start(focused_id.to_string()))
            }
            (None, _) => None,
            (Some(_), DragKey::ArrowUp) => {
                self.cursor = self.cursor.saturating_sub(1);
                order.get(self.cursor).cloned().map(SensorEvent::Over)
            }
            (Some(_), DragKey::ArrowDown) => {
                if self.cursor + 1 < order.len() {
                    self.cursor += 1;
                }
                order.get(self.cursor).cloned().map(SensorEvent::Over)
            }
            (Some(_), DragKey::Space | DragKey::Enter) => {
                self.active = None;
                Some(SensorEvent::Release)
            }
            (Some(_), DragKey::Escape) => {
                self.active = None;
                Some(SensorEvent::Cancel)
            }
        }
    }

    pub fn cancel(&mut self) -> Option<SensorEvent> {
        self.active.take().map(|_| SensorEvent::Cancel)
    }
}
