//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;
use leptos_dragdrop::DragCoordinator;

use crate::commands::{HttpTransport, PositionSyncClient, TagMutationClient};
use crate::config::AppConfig;
use crate::toast::Toasts;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Trigger to reload lists from the backend - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload lists from the backend - write
    set_reload_trigger: WriteSignal<u32>,
    pub toasts: Toasts,
    config: StoredValue<AppConfig>,
    coordinator: StoredValue<DragCoordinator>,
}

impl AppContext {
    pub fn new(reload_trigger: (ReadSignal<u32>, WriteSignal<u32>), config: AppConfig) -> Self {
        Self {
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
            toasts: Toasts::new(config.toast_ms),
            config: StoredValue::new(config),
            coordinator: StoredValue::new(DragCoordinator::new()),
        }
    }

    /// Trigger a reload of every list
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    pub fn with_config<R>(&self, f: impl FnOnce(&AppConfig) -> R) -> R {
        self.config.with_value(f)
    }

    /// Cross-tree drag channel shared by bookmark rows and pinned-tag rows
    pub fn coordinator(&self) -> DragCoordinator {
        self.coordinator.get_value()
    }
}

/// Backend clients, provided via context
#[derive(Clone)]
pub struct Api {
    pub transport: HttpTransport,
    pub positions: PositionSyncClient<HttpTransport>,
    pub tags: TagMutationClient<HttpTransport>,
}

impl Api {
    pub fn new(config: &AppConfig) -> Self {
        let transport = HttpTransport::new(config);
        Self {
            positions: PositionSyncClient::new(transport.clone()),
            tags: TagMutationClient::new(transport.clone()),
            transport,
        }
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}

pub fn use_api() -> Api {
    expect_context::<Api>()
}
