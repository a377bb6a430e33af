//! Backend Commands
//!
//! Form-encoded requests against the backend, organized by domain. All of
//! them go through a [`Transport`] so the clients can be exercised without a
//! network.

mod list;
mod position;
mod queue;
mod tag;

use std::fmt;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::{AppConfig, PLACEHOLDER_UUID};

pub use list::*;
pub use position::*;
pub use queue::*;
pub use tag::*;

// ========================
// Errors
// ========================

#[derive(Debug, Clone, PartialEq)]
pub enum SyncError {
    Network(String),
    Http { status: u16, body: String },
    Decode(String),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::Network(msg) => write!(f, "Network error: {}", msg),
            SyncError::Http { status, body } if body.is_empty() => write!(f, "Server returned {}", status),
            SyncError::Http { status, body } => write!(f, "Server returned {}: {}", status, body),
            SyncError::Decode(msg) => write!(f, "Unexpected response: {}", msg),
        }
    }
}

impl std::error::Error for SyncError {}

impl SyncError {
    fn network(e: reqwest::Error) -> Self {
        SyncError::Network(e.to_string())
    }
}

pub type SyncResult<T> = Result<T, SyncError>;

// ========================
// Transport
// ========================

#[async_trait(?Send)]
pub trait Transport {
    /// POST `fields` form-encoded; any 2xx is success, the body is ignored
    async fn post_form(&self, url: &str, fields: &[(String, String)]) -> SyncResult<()>;

    async fn get_text(&self, url: &str) -> SyncResult<String>;
}

/// `reqwest` transport (fetch on wasm32)
#[derive(Clone, Debug, Default)]
pub struct HttpTransport {
    csrf_token: Option<String>,
}

impl HttpTransport {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            csrf_token: config.csrf_token.clone(),
        }
    }

    async fn check(res: reqwest::Response) -> SyncResult<reqwest::Response> {
        if res.status().is_success() {
            return Ok(res);
        }
        let status = res.status().as_u16();
        let body = res.text().await.unwrap_or_default();
        Err(SyncError::Http { status, body })
    }
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn post_form(&self, url: &str, fields: &[(String, String)]) -> SyncResult<()> {
        let mut req = reqwest::Client::new().post(url).form(fields);
        if let Some(token) = &self.csrf_token {
            req = req.header("X-CSRFToken", token);
        }
        let res = req.send().await.map_err(SyncError::network)?;
        Self::check(res).await.map(|_| ())
    }

    async fn get_text(&self, url: &str) -> SyncResult<String> {
        let res = reqwest::Client::new().get(url).send().await.map_err(SyncError::network)?;
        Self::check(res).await?.text().await.map_err(SyncError::network)
    }
}

// ========================
// URL helpers
// ========================

const ID_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, ID_ENCODE_SET).to_string()
}

/// Substitute the placeholder uuid of a per-item template. Templates without
/// the placeholder are returned unchanged.
pub fn fill_template(template: &str, id: &str) -> String {
    template.replace(PLACEHOLDER_UUID, &encode_component(id))
}
