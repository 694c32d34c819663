use crate::errors::StoreError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard},
};
use tracing::{debug, warn};

/// Entries live for a year after their last save.
pub const EXPIRY_DAYS: i64 = 365;

/// Key/value medium the ledger persists its snapshot into.
///
/// Each store is bound to a single key; `save` replaces the value under that key
/// and `load` returns `None` when nothing was saved or the entry expired.
pub trait Store {
    fn save(&mut self, value: &str) -> Result<(), StoreError>;
    fn load(&self) -> Result<Option<String>, StoreError>;
}

impl Store for Box<dyn Store + Send> {
    fn save(&mut self, value: &str) -> Result<(), StoreError> {
        (**self).save(value)
    }

    fn load(&self) -> Result<Option<String>, StoreError> {
        (**self).load()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct JarEntry {
    value: String,
    expires_at: DateTime<Utc>,
}

type Jar = BTreeMap<String, JarEntry>;

/// Cookie-jar style store kept in a JSON file.
///
/// The file can hold several keys; only the configured one is touched.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    key: String,
    capacity: usize,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>, capacity: usize) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
            capacity,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save_at(&mut self, now: DateTime<Utc>, value: &str) -> Result<(), StoreError> {
        check_capacity(&self.key, value, self.capacity)?;

        let mut jar = match self.read_jar() {
            Ok(jar) => jar,
            Err(err) => {
                warn!("discarding unreadable store file {:?}: {err}", self.path);
                Jar::new()
            }
        };
        jar.retain(|_, entry| entry.expires_at > now);
        jar.insert(
            self.key.clone(),
            JarEntry {
                value: value.to_string(),
                expires_at: now + Duration::days(EXPIRY_DAYS),
            },
        );

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let payload = serde_json::to_vec_pretty(&jar)?;
        fs::write(&self.path, payload)?;
        debug!("saved {} bytes under {:?}", value.len(), self.key);
        Ok(())
    }

    pub fn load_at(&self, now: DateTime<Utc>) -> Result<Option<String>, StoreError> {
        let jar = self.read_jar()?;
        Ok(jar
            .get(&self.key)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.value.clone()))
    }

    fn read_jar(&self) -> Result<Jar, StoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Jar::new()),
            Err(err) => Err(err.into()),
        }
    }
}

impl Store for FileStore {
    fn save(&mut self, value: &str) -> Result<(), StoreError> {
        self.save_at(Utc::now(), value)
    }

    fn load(&self) -> Result<Option<String>, StoreError> {
        self.load_at(Utc::now())
    }
}

#[derive(Debug, Default)]
struct MemorySlot {
    value: Option<String>,
    fail_writes: bool,
    saves: usize,
}

/// In-memory store. Clones share the same slot, so a caller can hand one clone
/// to the ledger and keep another to inspect what was saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Arc<Mutex<MemorySlot>>,
    capacity: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        let store = Self::default();
        store.slot().value = Some(value.into());
        store
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Makes every following `save` fail until switched back.
    pub fn set_fail_writes(&self, fail: bool) {
        self.slot().fail_writes = fail;
    }

    pub fn value(&self) -> Option<String> {
        self.slot().value.clone()
    }

    pub fn save_count(&self) -> usize {
        self.slot().saves
    }

    fn slot(&self) -> MutexGuard<'_, MemorySlot> {
        self.slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Store for MemoryStore {
    fn save(&mut self, value: &str) -> Result<(), StoreError> {
        if let Some(limit) = self.capacity {
            check_capacity("", value, limit)?;
        }
        let mut slot = self.slot();
        if slot.fail_writes {
            return Err(StoreError::Unavailable("writes disabled".to_string()));
        }
        slot.value = Some(value.to_string());
        slot.saves += 1;
        Ok(())
    }

    fn load(&self) -> Result<Option<String>, StoreError> {
        Ok(self.value())
    }
}

fn check_capacity(key: &str, value: &str, limit: usize) -> Result<(), StoreError> {
    let size = key.len() + value.len();
    if size > limit {
        return Err(StoreError::CapacityExceeded { size, limit });
    }
    Ok(())
}
