//! Key-value storage for persisted calculator state
//!
//! The engine never touches storage itself; hosts read and write through the
//! [`KeyValueStore`] trait. Two stores ship here: an in-memory map and a JSON
//! object file in the platform config directory.

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("not a JSON object: {0}")]
    NotAnObject(PathBuf),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// String and boolean preferences, addressed by key.
pub trait KeyValueStore {
    fn get_string(&self, key: &str) -> Option<String>;
    fn get_bool(&self, key: &str) -> Option<bool>;
    /// `None` removes the key.
    fn put_string(&mut self, key: &str, value: Option<&str>);
    fn put_bool(&mut self, key: &str, value: bool);
    /// Make earlier writes durable.
    fn flush(&mut self) -> Result<()>;
}

/// Values kept in process memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get_string(&self, key: &str) -> Option<String> {
        self.values.get(key)?.as_str().map(str::to_string)
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        self.values.get(key)?.as_bool()
    }

    fn put_string(&mut self, key: &str, value: Option<&str>) {
        match value {
            Some(v) => {
                self.values.insert(key.to_string(), Value::String(v.to_string()));
            }
            None => {
                self.values.remove(key);
            }
        }
    }

    fn put_bool(&mut self, key: &str, value: bool) {
        self.values.insert(key.to_string(), Value::Bool(value));
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// A JSON object file holding one entry per key.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: Map<String, Value>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            match serde_json::from_str::<Value>(&contents)? {
                Value::Object(map) => map,
                _ => return Err(StorageError::NotAnObject(path)),
            }
        } else {
            Map::new()
        };
        Ok(Self { path, values })
    }

    /// Open the store, starting empty if the file cannot be read.
    pub fn open_or_empty(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Self::open(&path) {
            Ok(store) => store,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable preferences");
                Self {
                    path,
                    values: Map::new(),
                }
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_string(&self, key: &str) -> Option<String> {
        self.values.get(key)?.as_str().map(str::to_string)
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        self.values.get(key)?.as_bool()
    }

    fn put_string(&mut self, key: &str, value: Option<&str>) {
        match value {
            Some(v) => {
                self.values.insert(key.to_string(), Value::String(v.to_string()));
            }
            None => {
                self.values.remove(key);
            }
        }
    }

    fn put_bool(&mut self, key: &str, value: bool) {
        self.values.insert(key.to_string(), Value::Bool(value));
    }

    fn flush(&mut self) -> Result<()> {
        let contents = serde_json::to_string_pretty(&self.values)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

/// Get the config directory for an app
pub fn config_dir(app_name: &str) -> PathBuf {
    directories::ProjectDirs::from("co", "calculator", app_name)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}
