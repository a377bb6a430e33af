//! Cross-Tree Drop Channel
//!
//! Lets a row dragged out of one gesture tree be recognized by drop targets
//! living in another (a sidebar of buckets). The dragged id travels through a
//! `DragCoordinator` shared by the source list and every foreign target, plus
//! the native `DataTransfer` where the browser allows reading it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::session::{Bucket, DropTarget};

/// What travels between gesture trees
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrossTreePayload {
    pub item_id: String,
}

/// Scoped owner of the in-flight payload. Cloning shares the slot.
#[derive(Clone, Debug, Default)]
pub struct DragCoordinator {
    slot: Arc<Mutex<Option<CrossTreePayload>>>,
}

impl DragCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Option<CrossTreePayload>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Native dragstart: overwrite whatever a previous gesture left
    pub fn begin(&self, item_id: &str) {
        tracing::debug!(item = item_id, "cross-tree drag start");
        *self.lock() = Some(CrossTreePayload {
            item_id: item_id.to_string(),
        });
    }

    pub fn current(&self) -> Option<CrossTreePayload> {
        self.lock().clone()
    }

    /// Consume the payload at drop time. A non-empty data-transfer value wins
    /// over the slot; either way the slot is emptied so a gesture is handled
    /// at most once. Without a gesture begun here nothing is accepted.
    pub fn take_drop(&self, transfer: Option<&str>) -> Option<String> {
        let Some(slot) = self.lock().take() else {
            tracing::debug!("drop without a cross-tree gesture ignored");
            return None;
        };
        match transfer.map(str::trim).filter(|s| !s.is_empty()) {
            Some(id) => Some(id.to_string()),
            None => Some(slot.item_id),
        }
    }

    /// Native dragend: always clear, dropped or not
    pub fn finish(&self) {
        if let Some(stale) = self.lock().take() {
            tracing::debug!(item = %stale.item_id, "cross-tree drag ended without drop");
        }
    }
}

/// How a bucket drop is reinterpreted
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reassignment {
    /// Attach the target bucket, addressed by identity
    Add { item_id: String, bucket_id: String },
    /// Detach the active filter's bucket, addressed by name
    Remove { item_id: String, bucket_name: String },
}

/// Decide what dropping `item_id` on `target` means while the source list is
/// filtered by `active_filter` (a bucket name).
///
/// - the item's own active filter: nothing
/// - the unclassified bucket: remove the active filter (nothing if unfiltered)
/// - any other bucket: add it
pub fn resolve_bucket_drop(item_id: &str, active_filter: Option<&str>, target: &Bucket) -> Option<Reassignment> {
    match target {
        Bucket::Unclassified => active_filter.map(|name| Reassignment::Remove {
            item_id: item_id.to_string(),
            bucket_name: name.to_string(),
        }),
        Bucket::Classified { name, .. } if active_filter == Some(name.as_str()) => None,
        Bucket::Classified { id, .. } => Some(Reassignment::Add {
            item_id: item_id.to_string(),
            bucket_id: id.clone(),
        }),
    }
}

/// Reassignment for a native drop on any target. Rows reorder through the
/// sortable engine and never reassign.
pub fn resolve_drop(item_id: &str, active_filter: Option<&str>, target: &DropTarget) -> Option<Reassignment> {
    match target {
        DropTarget::Row(_) => None,
        DropTarget::Bucket(bucket) => resolve_bucket_drop(item_id, active_filter, bucket),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(id: &str, name: &str) -> Bucket {
        Bucket::Classified {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_drop_on_other_bucket_adds() {
        let r = resolve_bucket_drop("X", Some("work"), &tag("7", "personal"));
        assert_eq!(
            r,
            Some(Reassignment::Add {
                item_id: "X".into(),
                bucket_id: "7".into()
            })
        );
    }

    #[test]
    fn test_drop_on_unclassified_removes_active_filter() {
        let r = resolve_bucket_drop("X", Some("work"), &Bucket::Unclassified);
        assert_eq!(
            r,
            Some(Reassignment::Remove {
                item_id: "X".into(),
                bucket_name: "work".into()
            })
        );
        assert_eq!(resolve_bucket_drop("X", None, &Bucket::Unclassified), None);
    }

    #[test]
    fn test_drop_on_own_filter_is_noop() {
        assert_eq!(resolve_bucket_drop("X", Some("work"), &tag("3", "work")), None);
    }

    #[test]
    fn test_unfiltered_drop_adds() {
        assert!(matches!(
            resolve_bucket_drop("X", None, &tag("3", "work")),
            Some(Reassignment::Add { .. })
        ));
    }

    #[test]
    fn test_row_target_never_reassigns() {
        assert_eq!(resolve_drop("X", Some("work"), &DropTarget::Row("Y".into())), None);
        assert_eq!(
            resolve_drop("X", Some("work"), &DropTarget::Bucket(Bucket::Unclassified)),
            resolve_bucket_drop("X", Some("work"), &Bucket::Unclassified)
        );
    }

    #[test]
    fn test_slot_consumed_once() {
        let c = DragCoordinator::new();
        c.begin("X");
        let shared = c.clone();
        assert_eq!(shared.take_drop(None), Some("X".to_string()));
        assert_eq!(c.take_drop(None), None);
    }

    #[test]
    fn test_transfer_preferred_over_slot() {
        let c = DragCoordinator::new();
        c.begin("slot-id");
        assert_eq!(c.take_drop(Some("dt-id")), Some("dt-id".to_string()));
        assert_eq!(c.current(), None);

        c.begin("slot-id");
        assert_eq!(c.take_drop(Some("  ")), Some("slot-id".to_string()));
    }

    #[test]
    fn test_foreign_drop_without_gesture_ignored() {
        let c = DragCoordinator::new();
        assert_eq!(c.take_drop(Some("https://elsewhere.example/")), None);
        c.begin("A");
        c.finish();
        assert_eq!(c.take_drop(Some("some text")), None);
    }

    #[test]
    fn test_new_dragstart_overwrites() {
        let c = DragCoordinator::new();
        c.begin("A");
        c.begin("B");
        assert_eq!(c.current().map(|p| p.item_id), Some("B".to_string()));
    }

    #[test]
    fn test_abandoned_gesture_leaves_slot_empty() {
        let c = DragCoordinator::new();
        assert_eq!(c.current(), None);
        c.begin("A");
        c.finish();
        assert_eq!(c.current(), None);
        assert_eq!(c.take_drop(None), None);
    }
}
