//! Loading trainer configuration (backend URL + storage location) from TOML.
//!
//! Lookup order: `TRAINER_CONFIG_PATH` TOML file, then individual env
//! overrides (`API_BASE_URL`, `STORAGE_PATH`), then defaults. Any parse/IO
//! failure is logged and falls back to defaults rather than aborting.

use serde::Deserialize;
use tracing::{error, info};

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    /// Base URL of the training backend, including the `/api` prefix.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Where the key-value store persists (onboarding flag). None keeps it
    /// in memory only.
    #[serde(default)]
    pub storage_path: Option<String>,
}

fn default_api_base_url() -> String {
    "http://127.0.0.1:5000/api".into()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            storage_path: None,
        }
    }
}

impl AppConfig {
    /// Build config from env: optional TOML file, then env overrides.
    pub fn from_env() -> Self {
        let mut cfg = load_config_file().unwrap_or_default();

        if let Ok(url) = std::env::var("API_BASE_URL") {
            if !url.is_empty() {
                cfg.api_base_url = url;
            }
        }
        if let Ok(path) = std::env::var("STORAGE_PATH") {
            if !path.is_empty() {
                cfg.storage_path = Some(path);
            }
        }

        info!(target: "volley_trainer", api_base_url = %cfg.api_base_url, storage = ?cfg.storage_path, "Configuration resolved");
        cfg
    }
}

/// Attempt to load `AppConfig` from TRAINER_CONFIG_PATH. On any parsing/IO
/// error, returns None.
fn load_config_file() -> Option<AppConfig> {
    let path = std::env::var("TRAINER_CONFIG_PATH").ok()?;
    match std::fs::read_to_string(&path) {
        Ok(s) => match toml::from_str::<AppConfig>(&s) {
            Ok(cfg) => {
                info!(target: "volley_trainer", %path, "Loaded trainer config (TOML)");
                Some(cfg)
            }
            Err(e) => {
                error!(target: "volley_trainer", %path, error = %e, "Failed to parse TOML config");
                None
            }
        },
        Err(e) => {
            error!(target: "volley_trainer", %path, error = %e, "Failed to read TOML config file");
            None
        }
    }
}
