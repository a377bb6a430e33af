//! Leptos DragDrop Utilities
//!
//! Sortable lists with optimistic reordering, plus a cross-tree channel that
//! lets a row dragged out of its list land on foreign drop targets.
//!
//! The engine (`store`, `sortable`, `sensor`, `collision`, `channel`) is plain
//! Rust and testable off the browser; `dom` binds it to Leptos and web-sys.

pub mod channel;
pub mod collision;
pub mod dom;
pub mod policy;
pub mod sensor;
pub mod session;
pub mod sortable;
pub mod store;

pub use channel::{resolve_bucket_drop, resolve_drop, CrossTreePayload, DragCoordinator, Reassignment};
pub use collision::{closest_center, Rect};
pub use dom::*;
pub use policy::{DragPolicy, VirtualBucketPolicy, UNCLASSIFIED_SCOPE_KEY};
pub use sensor::{DragKey, KeyboardSensor, PointerSensor, SensorEvent, DRAG_THRESHOLD_PX};
pub use session::{Bucket, DragOutcome, DragPhase, DragSession, DropTarget, MoveCommit, PositionUpdate};
pub use sortable::SortableList;
pub use store::{array_move, Ordered, OrderedItem, OrderedStore};
