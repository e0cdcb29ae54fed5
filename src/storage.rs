use crate::errors::StorageError;
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use std::{env, fs};
use tracing::error;

/// Synchronous key-value port for the two JSON documents the tracker owns.
/// `read` never fails: missing or unreadable documents come back as `None`
/// and the caller substitutes an empty one.
pub trait Storage {
    fn read(&self, key: &str) -> Option<Value>;
    fn write(&mut self, key: &str, value: &Value) -> Result<(), StorageError>;
    fn delete(&mut self, key: &str) -> Result<(), StorageError>;
}

pub fn resolve_data_dir() -> PathBuf {
    if let Ok(path) = env::var("HABITLOG_DATA_DIR") {
        return PathBuf::from(path);
    }

    PathBuf::from("data")
}

/// One pretty-printed JSON file per document under a data directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, std::io::Error> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn document_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStore {
    fn read(&self, key: &str) -> Option<Value> {
        let path = self.document_path(key);
        match fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(value) => Some(value),
                Err(err) => {
                    error!("failed to parse document `{key}`: {err}");
                    None
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => {
                error!("failed to read document `{key}`: {err}");
                None
            }
        }
    }

    fn write(&mut self, key: &str, value: &Value) -> Result<(), StorageError> {
        let payload = serde_json::to_vec_pretty(value).map_err(|source| StorageError::Encode {
            key: key.to_string(),
            source,
        })?;
        fs::write(self.document_path(key), payload).map_err(|source| StorageError::Write {
            key: key.to_string(),
            source,
        })
    }

    fn delete(&mut self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.document_path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Delete {
                key: key.to_string(),
                source,
            }),
        }
    }
}

/// In-process store for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStore {
    fn read(&self, key: &str) -> Option<Value> {
        self.docs.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &Value) -> Result<(), StorageError> {
        self.docs.insert(key.to_string(), value.clone());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), StorageError> {
        self.docs.remove(key);
        Ok(())
    }
}
