//! Position Sync
//!
//! Persists the ordinal position produced by a reorder. Requests are
//! serialized per scope through a [`SingleFlight`] queue.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use leptos_dragdrop::PositionUpdate;

use super::{SingleFlight, SyncResult, Transport};
use crate::config::AppConfig;
use crate::scope::Scope;

/// The four sortable features, each with its own endpoint and item field
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListKind {
    Bookmarks,
    Todos,
    PinnedTags,
    Songs,
}

impl ListKind {
    pub fn item_field(self) -> &'static str {
        match self {
            ListKind::Bookmarks => "bookmark_uuid",
            ListKind::Todos => "todo_uuid",
            ListKind::PinnedTags => "tag_name",
            ListKind::Songs => "song_uuid",
        }
    }

    fn position_path(self, config: &AppConfig) -> &str {
        let endpoints = &config.endpoints;
        match self {
            ListKind::Bookmarks => &endpoints.bookmark_position,
            ListKind::Todos => &endpoints.todo_position,
            ListKind::PinnedTags => &endpoints.pinned_tag_position,
            ListKind::Songs => &endpoints.song_position,
        }
    }
}

/// A ready-to-send position update
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PositionRequest {
    pub url: String,
    pub scope_key: String,
    pub item_id: String,
    pub position: u32,
    pub fields: Vec<(String, String)>,
}

impl PositionRequest {
    pub fn new(config: &AppConfig, kind: ListKind, scope: &Scope, update: &PositionUpdate) -> Self {
        let mut fields = Vec::with_capacity(3);
        if let Some((name, value)) = scope.form_field() {
            fields.push((name.to_string(), value));
        }
        fields.push((kind.item_field().to_string(), update.item_id.clone()));
        fields.push(("position".to_string(), update.new_position.to_string()));

        Self {
            url: config.url(kind.position_path(config)),
            scope_key: update.scope_key.clone(),
            item_id: update.item_id.clone(),
            position: update.new_position,
            fields,
        }
    }
}

/// Result of one request that actually went out
#[derive(Debug)]
pub struct SyncReport {
    pub request: PositionRequest,
    pub result: SyncResult<()>,
}

#[derive(Clone)]
pub struct PositionSyncClient<T> {
    transport: T,
    queue: Arc<Mutex<SingleFlight<PositionRequest>>>,
}

impl<T: Transport> PositionSyncClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            queue: Arc::new(Mutex::new(SingleFlight::new())),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn lock(&self) -> MutexGuard<'_, SingleFlight<PositionRequest>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Send `request`, or park it behind the scope's in-flight request.
    ///
    /// The caller that finds the scope idle also sends everything queued up
    /// behind it, and gets one report per request sent. A parked request
    /// yields no reports here; it is reported to whoever drains it.
    pub async fn submit(&self, request: PositionRequest) -> Vec<SyncReport> {
        let scope_key = request.scope_key.clone();
        let item_id = request.item_id.clone();
        let first = self.lock().submit(&scope_key, &item_id, request);
        if first.is_none() {
            tracing::debug!(scope = %scope_key, item = %item_id, "position update queued");
        }
        self.drain(&scope_key, first).await
    }

    async fn drain(&self, scope_key: &str, first: Option<PositionRequest>) -> Vec<SyncReport> {
        let mut reports = Vec::new();
        let mut next = first;
        while let Some(request) = next {
            let result = self.transport.post_form(&request.url, &request.fields).await;
            match &result {
                Ok(()) => tracing::debug!(item = %request.item_id, position = request.position, "position saved"),
                Err(e) => tracing::warn!(item = %request.item_id, position = request.position, error = %e, "position update failed"),
            }
            reports.push(SyncReport { request, result });
            next = self.lock().complete(scope_key);
        }
        reports
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::RecordingTransport;
    use crate::commands::SyncError;

    fn update(item: &str, position: u32, scope: &Scope) -> PositionUpdate {
        PositionUpdate {
            item_id: item.to_string(),
            new_position: position,
            scope_key: scope.key(),
        }
    }

    fn config() -> AppConfig {
        AppConfig {
            api_url: "https://stash.example".into(),
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_bookmark_request_fields() {
        let scope = Scope::Tag("work".into());
        let req = PositionRequest::new(&config(), ListKind::Bookmarks, &scope, &update("D", 1, &scope));
        assert_eq!(req.url, "https://stash.example/bookmarks/api/position/");
        assert_eq!(
            req.fields,
            vec![
                ("tag".to_string(), "work".to_string()),
                ("bookmark_uuid".to_string(), "D".to_string()),
                ("position".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_pinned_tags_have_no_scope_field() {
        let scope = Scope::PinnedTags;
        let req = PositionRequest::new(&config(), ListKind::PinnedTags, &scope, &update("reading", 3, &scope));
        assert_eq!(
            req.fields,
            vec![
                ("tag_name".to_string(), "reading".to_string()),
                ("position".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn test_song_request_uses_playlist_field() {
        let scope = Scope::Playlist("p-9".into());
        let req = PositionRequest::new(&config(), ListKind::Songs, &scope, &update("s1", 2, &scope));
        assert_eq!(req.fields[0], ("playlist_uuid".to_string(), "p-9".to_string()));
        assert_eq!(req.fields[1].0, "song_uuid");
    }

    #[tokio::test]
    async fn test_idle_scope_sends_once() {
        let scope = Scope::Tag("work".into());
        let client = PositionSyncClient::new(RecordingTransport::default());
        let reports = client
            .submit(PositionRequest::new(&config(), ListKind::Bookmarks, &scope, &update("D", 1, &scope)))
            .await;

        assert_eq!(reports.len(), 1);
        assert!(reports[0].result.is_ok());
        assert_eq!(client.transport().posts.borrow().len(), 1);
        assert_eq!(client.transport().field(0, "position").as_deref(), Some("1"));
        assert!(!client.lock().is_busy(&scope.key()));
    }

    #[tokio::test]
    async fn test_requests_behind_in_flight_coalesce() {
        let scope = Scope::Tag("work".into());
        let client = PositionSyncClient::new(RecordingTransport::default());
        let first = PositionRequest::new(&config(), ListKind::Bookmarks, &scope, &update("A", 3, &scope));

        // `first` is in flight on behalf of another gesture
        let in_flight = client.lock().submit(&scope.key(), "A", first);
        assert!(in_flight.is_some());

        for (item, position) in [("B", 1), ("A", 2), ("A", 4)] {
            let reports = client
                .submit(PositionRequest::new(&config(), ListKind::Bookmarks, &scope, &update(item, position, &scope)))
                .await;
            assert!(reports.is_empty());
        }
        assert!(client.transport().posts.borrow().is_empty());

        let reports = client.drain(&scope.key(), in_flight).await;
        let sent: Vec<(String, u32)> = reports.iter().map(|r| (r.request.item_id.clone(), r.request.position)).collect();
        assert_eq!(
            sent,
            vec![("A".to_string(), 3), ("B".to_string(), 1), ("A".to_string(), 4)]
        );
        assert_eq!(client.transport().posts.borrow().len(), 3);
        assert!(!client.lock().is_busy(&scope.key()));
    }

    /// Server semantics: move the item to the 1-indexed slot, shifting the rest
    fn apply_on_server(order: &mut Vec<String>, request: &PositionRequest) {
        let Some(from) = order.iter().position(|id| *id == request.item_id) else {
            return;
        };
        let id = order.remove(from);
        let to = (request.position as usize - 1).min(order.len());
        order.insert(to, id);
    }

    #[tokio::test]
    async fn test_server_order_matches_client_after_queued_moves() {
        use leptos_dragdrop::{OrderedItem, OrderedStore};

        let scope = Scope::Tag("work".into());
        let ids = ["A", "B", "C", "D"];
        let mut local = OrderedStore::new(
            scope.key(),
            ids.iter().map(|id| OrderedItem::new(*id, scope.key())).collect(),
        );
        let mut server: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
        let client = PositionSyncClient::new(RecordingTransport::default());

        // an unrelated update is still in flight
        let busy = PositionRequest::new(&config(), ListKind::Bookmarks, &scope, &update("Z", 1, &scope));
        let in_flight = client.lock().submit(&scope.key(), "Z", busy);

        // A onto C, C onto B, A onto C
        for (active, over) in [("A", "C"), ("C", "B"), ("A", "C")] {
            let (Some(from), Some(to)) = (local.index_of(active), local.index_of(over)) else {
                panic!("rows missing");
            };
            local.move_index(from, to);
            let req = PositionRequest::new(&config(), ListKind::Bookmarks, &scope, &update(active, to as u32 + 1, &scope));
            assert!(client.submit(req).await.is_empty());
        }

        let reports = client.drain(&scope.key(), in_flight).await;
        assert!(reports.iter().all(|r| r.result.is_ok()));
        for report in &reports {
            apply_on_server(&mut server, &report.request);
        }
        assert_eq!(local.ids(), vec!["A", "C", "B", "D"]);
        assert_eq!(server, local.ids());
    }

    #[tokio::test]
    async fn test_failure_is_reported_and_queue_moves_on() {
        let scope = Scope::Playlist("p".into());
        let client = PositionSyncClient::new(RecordingTransport::default());
        client.transport().reply(Err(SyncError::Network("offline".into())));

        let reports = client
            .submit(PositionRequest::new(&config(), ListKind::Songs, &scope, &update("s", 2, &scope)))
            .await;
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].result, Err(SyncError::Network("offline".into())));
        assert!(!client.lock().is_busy(&scope.key()));
    }
}
