use crate::Status;
use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
};
use tracing::{instrument, warn};

/// String key-value storage backing the catalog, the equivalent of a
/// browser's local storage.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, Status>;
    fn set(&mut self, key: &str, value: String) -> Result<(), Status>;
}

/// Volatile store, used by tests and one-off sessions.
#[derive(Default, Debug, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub fn with_value(key: &str, value: impl Into<String>) -> Self {
        let mut store = MemoryStore::default();
        store.values.insert(key.to_owned(), value.into());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, Status> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), Status> {
        self.values.insert(key.to_owned(), value);
        Ok(())
    }
}

/// Store persisted as a single JSON object file mapping keys to string
/// values. Every `set()` rewrites the whole file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Opens the store at `path`. A missing file is an empty store. A file
    /// that does not hold a JSON object of strings is also treated as empty
    /// and will be overwritten on the next write.
    #[instrument(name = "file_store::open", level = "trace", skip(path))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Status> {
        let path = path.as_ref().to_path_buf();
        let values = match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(values) => values,
                Err(e) => {
                    warn!("ignoring unreadable store '{}': {e}", path.display());
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(Status::new("Failed to read store", e)),
        };
        Ok(FileStore { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), Status> {
        let json = serde_json::to_string_pretty(&self.values)?;

        let tmp = self.path.with_extension("tmp");
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, Status> {
        Ok(self.values.get(key).cloned())
    }

    #[instrument(name = "file_store::set", level = "trace", skip(self, value))]
    fn set(&mut self, key: &str, value: String) -> Result<(), Status> {
        let previous = self.values.insert(key.to_owned(), value);
        if let Err(status) = self.flush() {
            // Keep memory in line with what is on disk.
            match previous {
                Some(previous) => self.values.insert(key.to_owned(), previous),
                None => self.values.remove(key),
            };
            return Err(status);
        }
        Ok(())
    }
}
