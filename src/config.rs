//! App Configuration
//!
//! Storage names, gesture and animation tuning, and logging level.

use console_logger::LevelFilter;
use leptos_swipe::SwipeConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// localStorage key of the JSON snapshot
    pub fast_store_key: &'static str,
    pub db_name: &'static str,
    pub db_version: u32,
    pub db_store: &'static str,
    pub swipe: SwipeConfig,
    pub reorder: ReorderConfig,
    /// Service worker script, relative to the page
    pub service_worker: &'static str,
    pub log_level: LevelFilter,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReorderConfig {
    pub duration_ms: u32,
    pub easing: &'static str,
    /// Moves at or below this many pixels are not animated
    pub min_delta: f64,
}

impl Default for ReorderConfig {
    fn default() -> Self {
        Self {
            duration_ms: 260,
            easing: "cubic-bezier(.2,.8,.2,1)",
            min_delta: 0.5,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fast_store_key: "quix.items.v1",
            db_name: "quix-db",
            db_version: 1,
            db_store: "items",
            swipe: SwipeConfig::default(),
            reorder: ReorderConfig::default(),
            service_worker: "sw.js",
            log_level: LevelFilter::INFO,
        }
    }
}

impl AppConfig {
    /// Defaults, with `?log=<level>` from the page URL applied
    pub fn from_location() -> Self {
        let search = web_sys::window()
            .and_then(|win| win.location().search().ok())
            .unwrap_or_default();
        Self::default().with_query(&search)
    }

    pub fn with_query(mut self, search: &str) -> Self {
        if let Some(level) = query_param(search, "log").and_then(console_logger::parse_level) {
            self.log_level = level;
        }
        self
    }
}

fn query_param<'a>(search: &'a str, name: &str) -> Option<&'a str> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}
