//! List Commands
//!
//! Fetches the rows of one scope. The server order is kept; positions are
//! re-derived by the store on load.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{encode_component, fill_template, ListKind, SyncError, SyncResult, Transport};
use crate::config::AppConfig;
use crate::scope::Scope;

/// Either a bare array or `{"items": [...]}`
#[derive(Deserialize)]
#[serde(untagged)]
enum ListResponse<T> {
    Bare(Vec<T>),
    Wrapped { items: Vec<T> },
}

pub fn list_url(config: &AppConfig, kind: ListKind, scope: &Scope) -> String {
    let endpoints = &config.endpoints;
    let path = match kind {
        ListKind::Bookmarks => with_scope_query(&endpoints.bookmark_list, scope),
        ListKind::Todos => with_scope_query(&endpoints.todo_list, scope),
        ListKind::PinnedTags => endpoints.pinned_tag_list.clone(),
        ListKind::Songs => match scope {
            Scope::Playlist(uuid) => fill_template(&endpoints.playlist_songs, uuid),
            _ => endpoints.playlist_songs.clone(),
        },
    };
    config.url(&path)
}

fn with_scope_query(path: &str, scope: &Scope) -> String {
    match scope {
        Scope::Tag(name) => format!("{}?tag={}", path, encode_component(name)),
        Scope::Untagged => format!("{}?untagged=1", path),
        _ => path.to_string(),
    }
}

pub async fn fetch_list<T, X>(transport: &X, url: &str) -> SyncResult<Vec<T>>
where
    T: DeserializeOwned,
    X: Transport + ?Sized,
{
    let body = transport.get_text(url).await?;
    let parsed: ListResponse<T> = serde_json::from_str(&body).map_err(|e| SyncError::Decode(e.to_string()))?;
    Ok(match parsed {
        ListResponse::Bare(items) | ListResponse::Wrapped { items } => items,
    })
}
