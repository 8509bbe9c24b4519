//! Settings for the console dashboard: defaults, then an optional
//! `dashboard.toml`, then environment variables; a command-line flag wins
//! over all of them.

use std::{collections::HashMap, fs};

use shared::domain::SortKey;

#[derive(Debug)]
pub struct Settings {
    pub server_url: String,
    pub sort_key: SortKey,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            sort_key: SortKey::Name,
        }
    }
}

pub fn load_settings(cli_server_url: Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("dashboard.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("server_url") {
                settings.server_url = v.clone();
            }
            if let Some(v) = file_cfg.get("sort") {
                if let Some(sort) = SortKey::from_arg(v) {
                    settings.sort_key = sort;
                }
            }
        }
    }

    if let Ok(v) = std::env::var("DASHBOARD_SERVER_URL") {
        settings.server_url = v;
    }
    if let Ok(v) = std::env::var("DASHBOARD_SORT") {
        if let Some(sort) = SortKey::from_arg(&v) {
            settings.sort_key = sort;
        }
    }

    if let Some(v) = cli_server_url {
        settings.server_url = v;
    }

    settings
}
