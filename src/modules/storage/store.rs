use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use uuid::Uuid;

pub const CUSTOM_PERSONAS_KEY: &str = "custom_characters";
pub const USER_RECORDS_KEY: &str = "user_data";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

/// Raw document access by key. Implementations replace the whole document
/// on every write.
pub trait DocumentBackend: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&self, key: &str, contents: &str) -> Result<(), StorageError>;
}

pub struct JsonFileBackend {
    dir: PathBuf,
}

impl JsonFileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn write_atomic(path: &Path, contents: &str) -> Result<(), StorageError> {
        // Unique per write so two writers never share a temp file.
        let tmp_path = path.with_extension(format!("json.{}.tmp", Uuid::new_v4()));
        {
            let mut file = fs::File::create(&tmp_path)?;
            file.write_all(contents.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, path)?;
        Ok(())
    }
}

impl DocumentBackend for JsonFileBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        Ok(Some(fs::read_to_string(path)?))
    }

    fn write(&self, key: &str, contents: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        Self::write_atomic(&self.path_for(key), contents)
    }
}

#[derive(Default)]
pub struct InMemoryBackend {
    documents: Mutex<HashMap<String, String>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentBackend for InMemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let documents = self
            .documents
            .lock()
            .map_err(|_| StorageError::Unavailable("Failed to acquire lock".to_string()))?;

        Ok(documents.get(key).cloned())
    }

    fn write(&self, key: &str, contents: &str) -> Result<(), StorageError> {
        let mut documents = self
            .documents
            .lock()
            .map_err(|_| StorageError::Unavailable("Failed to acquire lock".to_string()))?;

        documents.insert(key.to_string(), contents.to_string());
        Ok(())
    }
}

/// Runs synchronous store work on tokio's blocking pool so file I/O never
/// stalls the async workers.
pub async fn run_blocking<R, F>(f: F) -> Result<R, StorageError>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| StorageError::Unavailable(format!("blocking task failed: {}", e)))
}

/// Typed key-value store over a [`DocumentBackend`].
///
/// Reads never fail: a missing or corrupt document is replaced by the
/// record's default and the problem is logged. Writes replace the whole
/// record and report failure to the caller. Writes and read-modify-write
/// cycles are serialised by one lock shared by every clone of the store,
/// so a user's update never erases another user's update to the same
/// document. Separate processes sharing a data directory are not
/// coordinated.
#[derive(Clone)]
pub struct PersistenceStore {
    backend: Arc<dyn DocumentBackend>,
    write_lock: Arc<Mutex<()>>,
}

impl PersistenceStore {
    pub fn new(backend: impl DocumentBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn json_files(dir: impl Into<PathBuf>) -> Self {
        Self::new(JsonFileBackend::new(dir))
    }

    pub fn in_memory() -> Self {
        Self::new(InMemoryBackend::new())
    }

    pub fn load<T>(&self, key: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        let raw = match self.backend.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return T::default(),
            Err(e) => {
                tracing::error!(key, error = %e, "failed to read stored record, using default");
                return T::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(e) => {
                tracing::error!(key, error = %e, "stored record is corrupt, using default");
                T::default()
            }
        }
    }

    pub fn save<T>(&self, key: &str, record: &T) -> Result<(), StorageError>
    where
        T: Serialize,
    {
        let _guard = self.lock_writes();
        self.write_record(key, record)
    }

    fn write_record<T>(&self, key: &str, record: &T) -> Result<(), StorageError>
    where
        T: Serialize,
    {
        let serialized = serde_json::to_string_pretty(record)?;
        self.backend.write(key, &serialized)
    }

    /// Read-modify-write of a whole record, atomic with respect to every
    /// other `update` and `save` on this store.
    pub fn update<T, R, F>(&self, key: &str, f: F) -> Result<R, StorageError>
    where
        T: Serialize + DeserializeOwned + Default,
        F: FnOnce(&mut T) -> R,
    {
        self.update_if(key, |record: &mut T| (f(record), true))
    }

    /// Like [`update`](Self::update), but the closure decides whether the
    /// record changed; nothing is written when it returns `false`.
    pub fn update_if<T, R, F>(&self, key: &str, f: F) -> Result<R, StorageError>
    where
        T: Serialize + DeserializeOwned + Default,
        F: FnOnce(&mut T) -> (R, bool),
    {
        let _guard = self.lock_writes();
        let mut record: T = self.load(key);
        let (result, changed) = f(&mut record);
        if changed {
            self.write_record(key, &record)?;
        }
        Ok(result)
    }
}
