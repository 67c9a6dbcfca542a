use crate::models::PersistedState;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur reading or writing persisted state
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Best-effort persistence of the user's state between sessions
pub trait StateStore {
    /// `Ok(None)` when nothing has been saved yet
    fn load(&self) -> Result<Option<PersistedState>, StoreError>;

    fn save(&self, state: &PersistedState) -> Result<(), StoreError>;

    fn clear(&self) -> Result<(), StoreError>;
}

/// Persisted state kept as a JSON document on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> Result<Option<PersistedState>, StoreError> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No persisted state at {}", self.path.display());
                return Ok(None);
            }
            Err(err) => return Err(self.io_error(err)),
        };

        let state = serde_json::from_str(&json)?;
        tracing::debug!("Loaded persisted state from {}", self.path.display());
        Ok(Some(state))
    }

    fn save(&self, state: &PersistedState) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
        }

        let json = serde_json::to_string_pretty(state)?;
        std::fs::write(&self.path, json).map_err(|err| self.io_error(err))?;

        tracing::debug!("Saved state to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(self.io_error(err)),
        }
    }
}

/// In-memory store, holds serialized JSON like the file store
#[derive(Debug, Default)]
pub struct MemoryStore {
    json: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with raw JSON, e.g. a hand-edited or corrupt blob
    pub fn with_json(json: impl Into<String>) -> Self {
        Self {
            json: RefCell::new(Some(json.into())),
        }
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<Option<PersistedState>, StoreError> {
        match self.json.borrow().as_deref() {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    fn save(&self, state: &PersistedState) -> Result<(), StoreError> {
        let json = serde_json::to_string(state)?;
        *self.json.borrow_mut() = Some(json);
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.json.borrow_mut() = None;
        Ok(())
    }
}

/// Load persisted state, treating an unreadable store as empty
pub fn load_or_default(store: &dyn StateStore) -> PersistedState {
    match store.load() {
        Ok(Some(state)) => state,
        Ok(None) => PersistedState::default(),
        Err(err) => {
            tracing::warn!("Ignoring unreadable persisted state: {}", err);
            PersistedState::default()
        }
    }
}
