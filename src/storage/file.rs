use std::fs;
use std::path::{Path, PathBuf};

use log::warn;
use serde_json::{Map, Value};

use crate::config::API_KEY_STORAGE_KEY;
use crate::error_handling::StorageError;

use super::KeyStore;

/// Key store backed by a JSON object file, key under [`API_KEY_STORAGE_KEY`].
///
/// Other entries in the file are preserved on save.
#[derive(Debug, Clone)]
pub struct FileKeyStore {
    path: PathBuf,
}

impl FileKeyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_object(&self) -> Result<Map<String, Value>, StorageError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let text = fs::read_to_string(&self.path)?;
        if text.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str(&text)? {
            Value::Object(map) => Ok(map),
            _ => Ok(Map::new()),
        }
    }
}

impl KeyStore for FileKeyStore {
    fn load(&self) -> Option<String> {
        match self.read_object() {
            Ok(map) => map
                .get(API_KEY_STORAGE_KEY)
                .and_then(Value::as_str)
                .map(str::to_string)
                .filter(|key| !key.is_empty()),
            Err(e) => {
                warn!("Ignoring unreadable key file {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn save(&self, value: &str) -> Result<(), StorageError> {
        let mut map = self.read_object().unwrap_or_default();
        map.insert(
            API_KEY_STORAGE_KEY.to_string(),
            Value::String(value.to_string()),
        );
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&Value::Object(map))?)?;
        Ok(())
    }
}
