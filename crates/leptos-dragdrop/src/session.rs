//! Drag Session Types
//!
//! One gesture from pickup to drop/cancel, and the drop targets both gesture
//! sources (pointer sortable and native HTML5 drag) report into.

/// Where a gesture ended up
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropTarget {
    /// Another row of the same sortable list (reorder)
    Row(String),
    /// A bucket in a foreign gesture tree (reassignment)
    Bucket(Bucket),
}

/// A classification bucket that accepts cross-tree drops
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Bucket {
    /// A real classification with an identity
    Classified { id: String, name: String },
    /// The virtual "no classification" bucket
    Unclassified,
}

/// Ephemeral state of one gesture
#[derive(Clone, Debug)]
pub struct DragSession<T> {
    pub active_item_id: String,
    pub source_scope_key: String,
    pub origin_index: usize,
    /// Last row reported by `drag_over`
    pub over_item_id: Option<String>,
    /// Ordering before the gesture, kept for rollback
    pub snapshot: Vec<T>,
}

/// Per-item drag state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging,
}

/// Position sync request produced by a successful reorder
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PositionUpdate {
    pub item_id: String,
    /// 1-indexed
    pub new_position: u32,
    pub scope_key: String,
}

/// A reorder that was applied locally and still has to be persisted
#[derive(Clone, Debug)]
pub struct MoveCommit<T> {
    pub request: PositionUpdate,
    pub snapshot: Vec<T>,
    /// Store revision right after the move was applied
    pub revision: u64,
}

/// Terminal outcome of a gesture; the item is back to `Idle` afterwards
#[derive(Clone, Debug)]
pub enum DragOutcome<T> {
    /// Released outside any row, Escape, or scope changed mid-gesture
    Cancelled,
    /// Dropped onto itself
    SamePosition,
    /// Active or target row vanished from the store
    Aborted,
    Moved(MoveCommit<T>),
}

impl<T> DragOutcome<T> {
    pub fn commit(self) -> Option<MoveCommit<T>> {
        match self {
            DragOutcome::Moved(commit) => Some(commit),
            _ => None,
        }
    }
}
