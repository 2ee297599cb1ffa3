use std::{collections::HashMap, fs};

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub api_base_url: String,
    pub lookup_base_url: String,
    pub database_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.example-holidays.net/".into(),
            lookup_base_url: "https://nominatim.openstreetmap.org/".into(),
            database_url: "sqlite://./data/client.db".into(),
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("client.toml") {
        apply_file_config(&mut settings, &raw);
    }
    apply_env(&mut settings);

    settings
}

fn apply_file_config(settings: &mut Settings, raw: &str) {
    if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) {
        if let Some(v) = file_cfg.get("api_base_url") {
            settings.api_base_url = v.clone();
        }
        if let Some(v) = file_cfg.get("lookup_base_url") {
            settings.lookup_base_url = v.clone();
        }
        if let Some(v) = file_cfg.get("database_url") {
            settings.database_url = v.clone();
        }
    }
}

fn apply_env(settings: &mut Settings) {
    if let Ok(v) = std::env::var("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Ok(v) = std::env::var("APP__LOOKUP_BASE_URL") {
        settings.lookup_base_url = v;
    }
    if let Ok(v) = std::env::var("APP__DATABASE_URL") {
        settings.database_url = v;
    }
    if let Ok(v) = std::env::var("DATABASE_URL") {
        settings.database_url = v;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
