//! Quix Frontend Entry Point

mod app;
mod components;
mod config;
mod context;
mod debug;
mod editor;
mod models;
mod notes;
mod offline;
mod render;
mod reorder;
mod state;
mod storage;
mod store;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::from_location();
    console_logger::init(config.log_level);
    tracing::info!("[APP] Starting, log level {}", config.log_level);

    mount_to_body(move || view! { <App config=config.clone() /> });
}
