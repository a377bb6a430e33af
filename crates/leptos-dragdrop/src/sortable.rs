//! Sortable List Engine
//!
//! Turns a recognized gesture into a new local ordering plus one position
//! update. The store is updated before anything is sent.

use crate::policy::DragPolicy;
use crate::session::{DragOutcome, DragPhase, DragSession, DropTarget, MoveCommit, PositionUpdate};
use crate::store::{Ordered, OrderedStore};

/// One sortable list bound to one scope
#[derive(Clone, Debug)]
pub struct SortableList<T: Ordered> {
    store: OrderedStore<T>,
    enabled: bool,
    session: Option<DragSession<T>>,
}

impl<T: Ordered> SortableList<T> {
    pub fn new(store: OrderedStore<T>, policy: &impl DragPolicy) -> Self {
        let enabled = policy.is_drag_enabled(store.scope_key());
        Self {
            store,
            enabled,
            session: None,
        }
    }

    /// Swap in a freshly fetched list, possibly for a different scope.
    ///
    /// Any gesture in progress is dropped without a request.
    pub fn replace(&mut self, scope_key: impl Into<String>, items: Vec<T>, policy: &impl DragPolicy) {
        if let Some(session) = self.session.take() {
            tracing::debug!(item = %session.active_item_id, "drag dropped by list refresh");
        }
        self.store.replace(scope_key, items);
        self.enabled = policy.is_drag_enabled(self.store.scope_key());
    }

    pub fn store(&self) -> &OrderedStore<T> {
        &self.store
    }

    pub fn items(&self) -> &[T] {
        self.store.items()
    }

    pub fn scope_key(&self) -> &str {
        self.store.scope_key()
    }

    pub fn is_drag_enabled(&self) -> bool {
        self.enabled
    }

    pub fn session(&self) -> Option<&DragSession<T>> {
        self.session.as_ref()
    }

    pub fn item_phase(&self, item_id: &str) -> DragPhase {
        match &self.session {
            Some(s) if s.active_item_id == item_id => DragPhase::Dragging,
            _ => DragPhase::Idle,
        }
    }

    /// Begin a gesture. Returns false when dragging is disabled for this
    /// scope, another gesture is active, or the item is unknown.
    pub fn drag_start(&mut self, item_id: &str) -> bool {
        if !self.enabled || self.session.is_some() {
            return false;
        }
        let Some(origin_index) = self.store.index_of(item_id) else {
            return false;
        };
        tracing::debug!(item = item_id, scope = self.store.scope_key(), origin_index, "drag start");
        self.session = Some(DragSession {
            active_item_id: item_id.to_string(),
            source_scope_key: self.store.scope_key().to_string(),
            origin_index,
            over_item_id: None,
            snapshot: self.store.items().to_vec(),
        });
        true
    }

    /// Record the row currently under the pointer (or keyboard cursor)
    pub fn drag_over(&mut self, over_item_id: Option<&str>) {
        if let Some(session) = self.session.as_mut() {
            session.over_item_id = over_item_id.map(str::to_string);
        }
    }

    /// Finish the gesture at `over_item_id` (None = released outside any row)
    pub fn drag_end(&mut self, over_item_id: Option<&str>) -> DragOutcome<T> {
        let Some(session) = self.session.take() else {
            return DragOutcome::Cancelled;
        };
        let Some(over_id) = over_item_id else {
            tracing::debug!(item = %session.active_item_id, "drag released outside list");
            return DragOutcome::Cancelled;
        };
        if over_id == session.active_item_id {
            return DragOutcome::SamePosition;
        }

        let (Some(old_index), Some(new_index)) = (
            self.store.index_of(&session.active_item_id),
            self.store.index_of(over_id),
        ) else {
            tracing::debug!(item = %session.active_item_id, over = over_id, "drag target vanished, aborting");
            return DragOutcome::Aborted;
        };
        if old_index == new_index {
            return DragOutcome::SamePosition;
        }

        self.store.move_index(old_index, new_index);
        let request = PositionUpdate {
            item_id: session.active_item_id,
            new_position: new_index as u32 + 1,
            scope_key: self.store.scope_key().to_string(),
        };
        tracing::info!(
            item = %request.item_id,
            scope = %request.scope_key,
            position = request.new_position,
            "reordered"
        );
        DragOutcome::Moved(MoveCommit {
            request,
            snapshot: session.snapshot,
            revision: self.store.revision(),
        })
    }

    /// Where the gesture would land if released now
    pub fn drop_target(&self) -> Option<DropTarget> {
        let over = self.session.as_ref()?.over_item_id.clone()?;
        Some(DropTarget::Row(over))
    }

    /// Finish the gesture on `target`. Only a row of this list reorders; a
    /// bucket leaves the order as it is.
    pub fn drop_on(&mut self, target: Option<&DropTarget>) -> DragOutcome<T> {
        match target {
            Some(DropTarget::Row(over_id)) => self.drag_end(Some(over_id)),
            Some(DropTarget::Bucket(bucket)) => {
                tracing::debug!(?bucket, "sortable released on a bucket");
                self.drag_cancel()
            }
            None => self.drag_end(None),
        }
    }

    /// Finish with the row last reported by `drag_over`
    pub fn drop_at_current(&mut self) -> DragOutcome<T> {
        let target = self.drop_target();
        self.drop_on(target.as_ref())
    }

    pub fn drag_cancel(&mut self) -> DragOutcome<T> {
        if let Some(session) = self.session.take() {
            tracing::debug!(item = %session.active_item_id, "drag cancelled");
        }
        DragOutcome::Cancelled
    }

    /// Undo a reorder whose sync failed, unless the list changed since
    pub fn rollback(&mut self, commit: &MoveCommit<T>) -> bool {
        self.store.restore(commit.snapshot.clone(), commit.revision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{VirtualBucketPolicy, UNCLASSIFIED_SCOPE_KEY};
    use crate::store::OrderedItem;

    fn list(scope: &str, ids: &[&str]) -> SortableList<OrderedItem> {
        let items = ids.iter().map(|id| OrderedItem::new(*id, scope)).collect();
        SortableList::new(OrderedStore::new(scope, items), &VirtualBucketPolicy::default())
    }

    #[test]
    fn test_drag_last_onto_first() {
        let mut l = list("tag:work", &["A", "B", "C", "D"]);
        assert!(l.drag_start("D"));
        l.drag_over(Some("B"));
        l.drag_over(Some("A"));
        let commit = l.drop_at_current().commit().expect("should move");

        assert_eq!(l.store().ids(), vec!["D", "A", "B", "C"]);
        assert_eq!(commit.request.item_id, "D");
        assert_eq!(commit.request.new_position, 1);
        assert_eq!(commit.request.scope_key, "tag:work");
        assert_eq!(l.item_phase("D"), DragPhase::Idle);
    }

    #[test]
    fn test_position_is_new_index_plus_one() {
        for from in 0..5 {
            for to in 0..5 {
                if from == to {
                    continue;
                }
                let ids = ["a", "b", "c", "d", "e"];
                let mut l = list("playlist:p1", &ids);
                l.drag_start(ids[from]);
                let commit = l.drag_end(Some(ids[to])).commit().expect("should move");
                assert_eq!(commit.request.new_position, to as u32 + 1);
                assert_eq!(l.store().index_of(ids[from]), Some(to));
            }
        }
    }

    #[test]
    fn test_drop_target_is_the_hovered_row() {
        let mut l = list("tag:work", &["A", "B", "C"]);
        assert_eq!(l.drop_target(), None);
        l.drag_start("C");
        assert_eq!(l.drop_target(), None);
        l.drag_over(Some("A"));
        assert_eq!(l.drop_target(), Some(DropTarget::Row("A".into())));

        let target = l.drop_target();
        let commit = l.drop_on(target.as_ref()).commit().expect("should move");
        assert_eq!(commit.request.new_position, 1);
        assert_eq!(l.store().ids(), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_release_on_bucket_keeps_order() {
        use crate::session::Bucket;

        let mut l = list("tag:work", &["A", "B", "C"]);
        l.drag_start("B");
        l.drag_over(Some("A"));
        let outcome = l.drop_on(Some(&DropTarget::Bucket(Bucket::Unclassified)));
        assert!(matches!(outcome, DragOutcome::Cancelled));
        assert!(l.session().is_none());
        assert_eq!(l.store().ids(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_drop_on_self_is_noop() {
        let mut l = list("tag:work", &["A", "B"]);
        l.drag_start("A");
        assert!(matches!(l.drag_end(Some("A")), DragOutcome::SamePosition));
        assert_eq!(l.store().ids(), vec!["A", "B"]);
    }

    #[test]
    fn test_vanished_target_aborts_without_mutation() {
        let mut l = list("tag:work", &["A", "B", "C"]);
        l.drag_start("A");
        let before = l.store().revision();
        assert!(matches!(l.drag_end(Some("Z")), DragOutcome::Aborted));
        assert_eq!(l.store().ids(), vec!["A", "B", "C"]);
        assert_eq!(l.store().revision(), before);
    }

    #[test]
    fn test_release_outside_or_escape_leaves_store_untouched() {
        let mut l = list("tag:work", &["A", "B", "C"]);
        l.drag_start("B");
        l.drag_over(Some("A"));
        assert!(matches!(l.drag_end(None), DragOutcome::Cancelled));
        assert_eq!(l.store().ids(), vec!["A", "B", "C"]);

        l.drag_start("C");
        l.drag_over(Some("A"));
        assert!(matches!(l.drag_cancel(), DragOutcome::Cancelled));
        assert!(l.session().is_none());
        assert_eq!(l.store().ids(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_disabled_scope_never_starts() {
        let mut l = list(UNCLASSIFIED_SCOPE_KEY, &["A", "B"]);
        assert!(!l.is_drag_enabled());
        assert!(!l.drag_start("A"));
        assert!(l.session().is_none());
        assert!(matches!(l.drag_end(Some("B")), DragOutcome::Cancelled));
        assert_eq!(l.store().ids(), vec!["A", "B"]);
    }

    #[test]
    fn test_replace_reevaluates_policy_and_drops_session() {
        let policy = VirtualBucketPolicy::default();
        let mut l = list("tag:work", &["A", "B"]);
        l.drag_start("A");
        l.replace(UNCLASSIFIED_SCOPE_KEY, vec![OrderedItem::new("X", UNCLASSIFIED_SCOPE_KEY)], &policy);
        assert!(l.session().is_none());
        assert!(!l.is_drag_enabled());
    }

    #[test]
    fn test_rollback_restores_pre_drag_order() {
        let mut l = list("tag:work", &["A", "B", "C"]);
        l.drag_start("C");
        let commit = l.drag_end(Some("A")).commit().expect("should move");
        assert!(l.rollback(&commit));
        assert_eq!(l.store().ids(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_rollback_skipped_after_newer_reorder() {
        let mut l = list("tag:work", &["A", "B", "C"]);
        l.drag_start("C");
        let first = l.drag_end(Some("A")).commit().expect("should move");
        l.drag_start("B");
        l.drag_end(Some("C")).commit().expect("should move");
        assert!(!l.rollback(&first));
        assert_eq!(l.store().ids(), vec!["B", "C", "A"]);
    }
}
