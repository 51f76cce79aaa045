//! Client-local key-value storage, the stand-in for browser `localStorage`. Values are
//! plain text; callers own the meaning of each key. The token entry is a credential, so
//! implementations must never log values.

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use tracing::debug;

/// Storage key holding the bearer token.
pub const AUTH_TOKEN_KEY: &str = "authToken";
/// Storage key holding the JSON-serialized user profile.
pub const USER_KEY: &str = "user";

/// Minimal text store shared between the dispatcher and the session.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    /// Returns an error if the value cannot be persisted.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removing a missing key is not an error.
    /// # Errors
    /// Returns an error if the backing store cannot be updated.
    fn remove(&self, key: &str) -> Result<()>;
}

pub type SharedStore = Arc<dyn KeyValueStore>;

/// Process-local store, used by tests and short-lived hosts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn shared() -> SharedStore {
        Arc::new(Self::new())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))?;
        entries.remove(key);
        Ok(())
    }
}

/// JSON-object file store. Every write rewrites the whole file through a temporary
/// sibling and a rename, so readers never observe a partial document.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Unreadable or malformed files read as empty.
    fn load(&self) -> Map<String, Value> {
        let Ok(contents) = fs::read_to_string(&self.path) else {
            return Map::new();
        };

        match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(entries)) => entries,
            _ => {
                debug!("ignoring malformed session file: {}", self.path.display());
                Map::new()
            }
        }
    }

    fn persist(&self, entries: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }

        let tmp = self.path.with_extension("tmp");
        let payload = serde_json::to_vec_pretty(entries)?;
        fs::write(&tmp, payload).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replacing {}", self.path.display()))?;

        Ok(())
    }

    fn update(&self, apply: impl FnOnce(&mut Map<String, Value>)) -> Result<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| anyhow::anyhow!("file store lock poisoned"))?;
        let mut entries = self.load();
        apply(&mut entries);
        self.persist(&entries)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.load()
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), Value::String(value.to_string()));
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        if self.get(key).is_none() {
            return Ok(());
        }
        self.update(|entries| {
            entries.remove(key);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_set_get_remove() -> Result<()> {
        let store = MemoryStore::new();
        assert_eq!(store.get(AUTH_TOKEN_KEY), None);

        store.set(AUTH_TOKEN_KEY, "abc")?;
        assert_eq!(store.get(AUTH_TOKEN_KEY).as_deref(), Some("abc"));

        store.set(AUTH_TOKEN_KEY, "def")?;
        assert_eq!(store.get(AUTH_TOKEN_KEY).as_deref(), Some("def"));

        store.remove(AUTH_TOKEN_KEY)?;
        store.remove(AUTH_TOKEN_KEY)?;
        assert_eq!(store.get(AUTH_TOKEN_KEY), None);
        Ok(())
    }

    #[test]
    fn file_store_persists_across_instances() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nested").join("session.json");

        FileStore::new(&path).set(USER_KEY, r#"{"username":"ana"}"#)?;

        let reopened = FileStore::new(&path);
        assert_eq!(
            reopened.get(USER_KEY).as_deref(),
            Some(r#"{"username":"ana"}"#)
        );

        reopened.remove(USER_KEY)?;
        assert_eq!(FileStore::new(&path).get(USER_KEY), None);
        Ok(())
    }

    #[test]
    fn file_store_treats_garbage_as_empty() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("session.json");
        fs::write(&path, "not json")?;

        let store = FileStore::new(&path);
        assert_eq!(store.get(AUTH_TOKEN_KEY), None);

        store.set(AUTH_TOKEN_KEY, "tok")?;
        assert_eq!(store.get(AUTH_TOKEN_KEY).as_deref(), Some("tok"));
        Ok(())
    }

    #[test]
    fn file_store_remove_missing_file_is_noop() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("absent.json");
        FileStore::new(&path).remove(AUTH_TOKEN_KEY)?;
        assert!(!path.exists());
        Ok(())
    }
}
