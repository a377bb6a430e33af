//! Drag & Drop Glue
//!
//! What happens after the engine decides: persisting a reorder, applying a
//! bucket drop, and (re)loading a sortable list.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::{resolve_drop, DropTarget, MoveCommit, Ordered, Sortable};
use serde::de::DeserializeOwned;

use crate::commands::{fetch_list, list_url, ListKind, PositionRequest, SyncReport, TagAction, TagAssignmentRequest};
use crate::context::{Api, AppContext};
use crate::scope::{drag_policy, Scope};

/// How one failed position update is handled
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureAction {
    /// Rollback is off: tell the user, keep the optimistic order
    Notify,
    /// The caller's own update failed and the pre-drag order is back
    Reverted,
    /// Sent for another gesture, or the list changed since: re-fetch
    Reload,
}

/// Decide what to do for each failed report of one submit. `rollback` is
/// only tried for the caller's own request and says whether it applied.
pub fn failure_actions(
    reports: &[SyncReport],
    own: &PositionRequest,
    rollback_enabled: bool,
    mut rollback: impl FnMut() -> bool,
) -> Vec<FailureAction> {
    reports
        .iter()
        .filter(|r| r.result.is_err())
        .map(|report| {
            if !rollback_enabled {
                FailureAction::Notify
            } else if report.request == *own && rollback() {
                FailureAction::Reverted
            } else {
                FailureAction::Reload
            }
        })
        .collect()
}

/// Persist an applied reorder. On failure the user is told; with rollback
/// enabled the pre-drag order comes back if nothing changed since, otherwise
/// the list is re-fetched.
pub fn sync_reorder<T>(ctx: AppContext, api: Api, sortable: Sortable<T>, kind: ListKind, scope: Scope, commit: MoveCommit<T>)
where
    T: Ordered + Send + Sync + 'static,
{
    if scope.key() != commit.request.scope_key {
        // Scope switched while the old rows were still shown
        tracing::warn!(scope = %scope.key(), stale = %commit.request.scope_key, "reorder in a stale list dropped");
        return;
    }
    let request = ctx.with_config(|config| PositionRequest::new(config, kind, &scope, &commit.request));
    let rollback_enabled = ctx.with_config(|c| c.rollback_on_failure);

    spawn_local(async move {
        let reports = api.positions.submit(request.clone()).await;
        let actions = failure_actions(&reports, &request, rollback_enabled, || sortable.rollback(&commit));
        for action in &actions {
            match action {
                FailureAction::Notify => ctx.toasts.error("Couldn't save the new order"),
                FailureAction::Reverted => ctx.toasts.error("Couldn't save the new order, reverted"),
                FailureAction::Reload => ctx.toasts.error("Couldn't save the new order, reloading"),
            }
        }
        if actions.contains(&FailureAction::Reload) {
            ctx.reload();
        }
    });
}

/// A native drop landed on `target`; apply whatever reassignment it means
pub fn drop_on_target(ctx: AppContext, api: Api, target: DropTarget, item_id: String, active_filter: Option<String>) {
    let Some(reassignment) = resolve_drop(&item_id, active_filter.as_deref(), &target) else {
        tracing::debug!(item = %item_id, ?target, "drop is a no-op");
        return;
    };
    let request = ctx.with_config(|config| TagAssignmentRequest::new(config, &reassignment));

    spawn_local(async move {
        match api.tags.apply(&request).await {
            Ok(()) => {
                ctx.toasts.info(match request.action {
                    TagAction::Add => "Tag added",
                    TagAction::Remove => "Tag removed",
                });
                ctx.reload();
            }
            Err(e) => ctx.toasts.error(format!("Couldn't update tags: {}", e)),
        }
    });
}

/// Fetch `scope` into `sortable`. `is_current` is checked after the fetch
/// so a response for a view the user already left is dropped.
pub fn load_list<T>(
    ctx: AppContext,
    api: Api,
    sortable: Sortable<T>,
    kind: ListKind,
    scope: Scope,
    is_current: impl Fn() -> bool + 'static,
) where
    T: Ordered + DeserializeOwned + Send + Sync + 'static,
{
    let url = ctx.with_config(|config| list_url(config, kind, &scope));
    spawn_local(async move {
        match fetch_list::<T, _>(&api.transport, &url).await {
            Ok(items) if is_current() => {
                tracing::debug!(scope = %scope.key(), count = items.len(), "list loaded");
                sortable.refresh(scope.key(), items, &drag_policy());
            }
            Ok(_) => tracing::debug!(scope = %scope.key(), "stale list response dropped"),
            Err(e) => {
                tracing::warn!(scope = %scope.key(), error = %e, "list load failed");
                if is_current() {
                    ctx.toasts.error(format!("Couldn't load {}: {}", scope.label(), e));
                }
            }
        }
    });
}
