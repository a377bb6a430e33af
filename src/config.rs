//! Runtime Configuration
//!
//! Read once at startup from `window.ENV`. Every field has a default so a
//! partial (or missing) `ENV` object still yields a usable config.

use std::fmt;

use serde::Deserialize;

/// Literal id embedded in per-item endpoint templates
pub const PLACEHOLDER_UUID: &str = "00000000-0000-0000-0000-000000000000";

#[derive(Debug, Clone)]
pub enum ConfigError {
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Backend endpoints. Per-item ones contain [`PLACEHOLDER_UUID`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub bookmark_list: String,
    pub bookmark_position: String,
    pub todo_list: String,
    pub todo_position: String,
    pub pinned_tag_list: String,
    pub pinned_tag_position: String,
    /// Templated by playlist uuid
    pub playlist_songs: String,
    pub song_position: String,
    /// Templated by bookmark uuid
    pub tag_add: String,
    /// Templated by bookmark uuid
    pub tag_remove: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            bookmark_list: "/bookmarks/api/list/".into(),
            bookmark_position: "/bookmarks/api/position/".into(),
            todo_list: "/todos/api/list/".into(),
            todo_position: "/todos/api/position/".into(),
            pinned_tag_list: "/tags/api/pinned/".into(),
            pinned_tag_position: "/tags/api/pinned/position/".into(),
            playlist_songs: format!("/music/api/playlist/{}/songs/", PLACEHOLDER_UUID),
            song_position: "/music/api/playlist/position/".into(),
            tag_add: format!("/bookmarks/api/{}/tag/add/", PLACEHOLDER_UUID),
            tag_remove: format!("/bookmarks/api/{}/tag/remove/", PLACEHOLDER_UUID),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Prefix for every endpoint; empty means same origin
    pub api_url: String,
    /// Forwarded as `X-CSRFToken`
    pub csrf_token: Option<String>,
    pub endpoints: Endpoints,
    /// Playlist the host page is showing, if any
    pub playlist_uuid: Option<String>,
    /// Item field of tag mutation requests
    pub tag_item_field: String,
    pub drag_threshold_px: f64,
    pub toast_ms: u32,
    pub refresh_interval_ms: u32,
    /// Restore the pre-drag order when a position update fails
    pub rollback_on_failure: bool,
    pub log_level: String,
    pub log_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            csrf_token: None,
            endpoints: Endpoints::default(),
            playlist_uuid: None,
            tag_item_field: "bookmark_uuid".into(),
            drag_threshold_px: leptos_dragdrop::DRAG_THRESHOLD_PX,
            toast_ms: 4000,
            refresh_interval_ms: 30_000,
            rollback_on_failure: true,
            log_level: "info".into(),
            log_capacity: rolling_logger::DEFAULT_CAPACITY,
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// `window.ENV`, or defaults when it is absent or malformed
    pub fn from_window() -> Self {
        let mut config = match Self::read_window() {
            Ok(Some(config)) => config,
            Ok(None) => Self::default(),
            Err(e) => {
                web_sys::console::warn_1(&format!("{}, using defaults", e).into());
                Self::default()
            }
        };
        // reqwest needs absolute URLs
        if config.api_url.is_empty() {
            if let Some(origin) = web_sys::window().and_then(|w| w.location().origin().ok()) {
                config.api_url = origin;
            }
        }
        config
    }

    fn read_window() -> Result<Option<Self>, ConfigError> {
        let Some(window) = web_sys::window() else {
            return Ok(None);
        };
        let env = js_sys::Reflect::get(&window, &"ENV".into())
            .map_err(|_| ConfigError::Parse("window.ENV is not readable".into()))?;
        if env.is_undefined() || env.is_null() || !env.is_object() {
            return Ok(None);
        }
        serde_wasm_bindgen::from_value(env)
            .map(Some)
            .map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Absolute URL for an endpoint path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url.trim_end_matches('/'), path)
    }
}
