//! Playlist Song Table
//!
//! Songs of the active playlist, reorderable within it.

use leptos::prelude::*;
use leptos_dragdrop::{bind_sortable, create_sortable, OrderedStore};

use super::sortable_list::sortable_rows;
use crate::commands::ListKind;
use crate::context::{use_api, use_app_context};
use crate::dnd::{load_list, sync_reorder};
use crate::models::PlaylistSong;
use crate::refresh::RefreshGate;
use crate::scope::{drag_policy, Scope};
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn SongTable(playlist_uuid: String) -> impl IntoView {
    let ctx = use_app_context();
    let api = use_api();
    let scope = Scope::Playlist(playlist_uuid);

    let sortable = create_sortable(
        OrderedStore::<PlaylistSong>::new(scope.key(), Vec::new()),
        &drag_policy(),
        ctx.with_config(|c| c.drag_threshold_px),
    );

    {
        let api = api.clone();
        let scope = scope.clone();
        bind_sortable(sortable, move |commit| {
            sync_reorder(ctx, api.clone(), sortable, ListKind::Songs, scope.clone(), commit);
        });
    }

    let gate = StoredValue::new(RefreshGate::default());
    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let generation = gate.try_update_value(|g| g.bump()).unwrap_or_default();
        let is_current = move || gate.try_with_value(|g| g.is_current(generation)).unwrap_or(false);
        load_list(ctx, api.clone(), sortable, ListKind::Songs, scope.clone(), is_current);
    });

    let render = move |song: PlaylistSong| {
        let id = song.uuid.clone();
        let position = move || sortable.position_of(&id);
        view! {
            <div class="song-row">
                <span class="song-position">{position}</span>
                <span class="song-title">{song.title}</span>
                <span class="song-artist">{song.artist.unwrap_or_default()}</span>
            </div>
        }
    };

    view! {
        <section class="song-table">
            <h2>"Playlist"</h2>
            {sortable_rows(sortable, None, render)}
        </section>
    }
}

/// Song table for the playlist chosen by the host page, if any
#[component]
pub fn ActivePlaylist() -> impl IntoView {
    let store = use_app_store();
    move || {
        store
            .active_playlist()
            .get()
            .map(|uuid| view! { <SongTable playlist_uuid=uuid /> })
    }
}
