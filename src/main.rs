//! Stash Frontend Entry Point

mod app;
mod commands;
mod components;
mod config;
mod context;
mod dnd;
mod models;
mod refresh;
mod scope;
mod store;
mod toast;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::from_window();
    if let Err(e) = rolling_logger::init_logger("Stash", config.log_capacity, &config.log_level) {
        web_sys::console::warn_1(&format!("logger disabled: {}", e).into());
    }
    tracing::info!(api = %config.api_url, rollback = config.rollback_on_failure, "starting");

    mount_to_body(move || view! { <App config=config.clone() /> });
}
