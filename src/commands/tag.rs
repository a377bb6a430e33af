//! Tag Commands
//!
//! Adds or removes a tag on a bookmark after a cross-tree drop. Add
//! addresses the tag by numeric id, remove addresses it by name; the two
//! backend endpoints are keyed differently.

use leptos_dragdrop::Reassignment;

use super::{fill_template, SyncResult, Transport};
use crate::config::AppConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TagAction {
    Add,
    Remove,
}

/// A ready-to-send tag mutation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagAssignmentRequest {
    pub action: TagAction,
    pub item_id: String,
    pub url: String,
    pub fields: Vec<(String, String)>,
}

impl TagAssignmentRequest {
    pub fn new(config: &AppConfig, reassignment: &Reassignment) -> Self {
        let item_field = config.tag_item_field.clone();
        match reassignment {
            Reassignment::Add { item_id, bucket_id } => Self {
                action: TagAction::Add,
                item_id: item_id.clone(),
                url: config.url(&fill_template(&config.endpoints.tag_add, item_id)),
                fields: vec![
                    ("tag_id".to_string(), bucket_id.clone()),
                    (item_field, item_id.clone()),
                ],
            },
            Reassignment::Remove { item_id, bucket_name } => Self {
                action: TagAction::Remove,
                item_id: item_id.clone(),
                url: config.url(&fill_template(&config.endpoints.tag_remove, item_id)),
                fields: vec![
                    ("tag_name".to_string(), bucket_name.clone()),
                    (item_field, item_id.clone()),
                ],
            },
        }
    }
}

/// Not queued: each drop sends exactly one request
#[derive(Clone)]
pub struct TagMutationClient<T> {
    transport: T,
}

impl<T: Transport> TagMutationClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn apply(&self, request: &TagAssignmentRequest) -> SyncResult<()> {
        tracing::info!(item = %request.item_id, action = ?request.action, "tag mutation");
        self.transport
            .post_form(&request.url, &request.fields)
            .await
            .inspect_err(|e| tracing::warn!(item = %request.item_id, error = %e, "tag mutation failed"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::RecordingTransport;
    use crate::commands::SyncError;
    use crate::config::PLACEHOLDER_UUID;
    use leptos_dragdrop::{resolve_bucket_drop, Bucket};

    #[tokio::test]
    async fn test_drop_on_other_tag_adds_by_id() {
        let config = AppConfig::default();
        let target = Bucket::Classified { id: "7".into(), name: "personal".into() };
        let reassignment = resolve_bucket_drop("X", Some("work"), &target).unwrap();
        let request = TagAssignmentRequest::new(&config, &reassignment);

        let client = TagMutationClient::new(RecordingTransport::default());
        client.apply(&request).await.unwrap();

        let posts = client.transport().posts.borrow();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].0, "/bookmarks/api/X/tag/add/");
        assert_eq!(
            posts[0].1,
            vec![
                ("tag_id".to_string(), "7".to_string()),
                ("bookmark_uuid".to_string(), "X".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_drop_on_untagged_removes_by_name() {
        let config = AppConfig::default();
        let reassignment = resolve_bucket_drop("X", Some("work"), &Bucket::Unclassified).unwrap();
        let request = TagAssignmentRequest::new(&config, &reassignment);
        assert_eq!(request.action, TagAction::Remove);

        let client = TagMutationClient::new(RecordingTransport::default());
        client.apply(&request).await.unwrap();
        assert_eq!(client.transport().field(0, "tag_name").as_deref(), Some("work"));
        assert_eq!(client.transport().field(0, "tag_id"), None);
        assert!(!client.transport().posts.borrow()[0].0.contains(PLACEHOLDER_UUID));
    }

    #[test]
    fn test_drop_on_own_filter_sends_nothing() {
        let target = Bucket::Classified { id: "3".into(), name: "work".into() };
        assert_eq!(resolve_bucket_drop("X", Some("work"), &target), None);
    }

    #[tokio::test]
    async fn test_failure_propagates() {
        let config = AppConfig::default();
        let request = TagAssignmentRequest::new(
            &config,
            &Reassignment::Add { item_id: "X".into(), bucket_id: "7".into() },
        );
        let client = TagMutationClient::new(RecordingTransport::default());
        client.transport().reply(Err(SyncError::Http { status: 500, body: String::new() }));
        assert!(client.apply(&request).await.is_err());
    }
}
