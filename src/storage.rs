//! Key-value persistence for session-continuity flags.
//!
//! A tiny localStorage-shaped store: string keys, string values, whole-store
//! clear. Backed by a JSON file when a path is configured, memory-only
//! otherwise (tests run memory-only). Write failures are logged, never fatal;
//! losing the flag just replays onboarding.

use std::collections::HashMap;
use std::path::PathBuf;

use tracing::{error, warn};

#[derive(Debug, Default)]
pub struct Storage {
    path: Option<PathBuf>,
    map: HashMap<String, String>,
}

impl Storage {
    /// Memory-only store.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// File-backed store; loads existing content if the file parses.
    pub fn open(path: PathBuf) -> Self {
        let map = match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str::<HashMap<String, String>>(&s) {
                Ok(m) => m,
                Err(e) => {
                    warn!(target: "volley_trainer", path = %path.display(), error = %e, "Storage file unreadable; starting empty");
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };
        Self {
            path: Some(path),
            map,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.map.insert(key.to_string(), value.to_string());
        self.persist();
    }

    pub fn remove(&mut self, key: &str) {
        self.map.remove(key);
        self.persist();
    }

    pub fn clear(&mut self) {
        self.map.clear();
        self.persist();
    }

    fn persist(&self) {
        let Some(path) = &self.path else { return };
        let body = match serde_json::to_string_pretty(&self.map) {
            Ok(b) => b,
            Err(e) => {
                error!(target: "volley_trainer", error = %e, "Storage serialization failed");
                return;
            }
        };
        if let Err(e) = std::fs::write(path, body) {
            error!(target: "volley_trainer", path = %path.display(), error = %e, "Storage write failed");
        }
    }
}
