//! File-per-key JSON store adapter.
//!
//! Each key maps to `<dir>/<key>.json`. Values are stored verbatim; callers
//! own serialization. Keys are restricted to a filename-safe alphabet so a
//! key can never escape the store directory.

use crate::domain::error::StratgenError;
use crate::ports::store_port::StorePort;
use std::fs;
use std::path::PathBuf;

pub struct JsonStoreAdapter {
    dir: PathBuf,
}

impl JsonStoreAdapter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StratgenError> {
        let safe = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !safe {
            return Err(StratgenError::Store {
                key: key.to_string(),
                reason: "key must be non-empty and [A-Za-z0-9_-]".into(),
            });
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl StorePort for JsonStoreAdapter {
    fn save(&self, key: &str, value: &str) -> Result<(), StratgenError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(|e| StratgenError::Store {
            key: key.to_string(),
            reason: format!("failed to create {}: {}", self.dir.display(), e),
        })?;
        fs::write(&path, value).map_err(|e| StratgenError::Store {
            key: key.to_string(),
            reason: format!("failed to write {}: {}", path.display(), e),
        })
    }

    fn load(&self, key: &str) -> Result<Option<String>, StratgenError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StratgenError::Store {
                key: key.to_string(),
                reason: format!("failed to read {}: {}", path.display(), e),
            }),
        }
    }
}
