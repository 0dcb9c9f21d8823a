//! StateStore - load / save / clear of the whole session record

use super::codec::{decode_state, encode_state};
use crate::models::SessionState;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Persistence boundary injected into the engine.
///
/// Implementations persist the full state as one unit; there are no partial
/// updates.
pub trait StateStore {
    /// Load the persisted session, or a fresh one when nothing is stored
    fn load(&self) -> Result<SessionState, StoreError>;

    /// Replace the persisted session
    fn save(&mut self, state: &SessionState) -> Result<(), StoreError>;

    /// Discard whatever is persisted
    fn clear(&mut self) -> Result<(), StoreError>;
}

/// Errors raised by state stores
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to read state file '{0}': {1}")]
    Read(String, std::io::Error),

    #[error("Failed to write state file '{0}': {1}")]
    Write(String, std::io::Error),

    #[error("Failed to remove state file '{0}': {1}")]
    Remove(String, std::io::Error),

    #[error("Failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// JSON file store
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn display(&self) -> String {
        self.path.display().to_string()
    }
}

impl StateStore for FileStateStore {
    fn load(&self) -> Result<SessionState, StoreError> {
        if !self.path.exists() {
            return Ok(SessionState::default());
        }

        let content =
            std::fs::read_to_string(&self.path).map_err(|e| StoreError::Read(self.display(), e))?;
        Ok(decode_state(&content))
    }

    fn save(&mut self, state: &SessionState) -> Result<(), StoreError> {
        let content = encode_state(state)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir).map_err(|e| StoreError::Write(self.display(), e))?;

        // Atomic write
        let mut temp =
            tempfile::NamedTempFile::new_in(&dir).map_err(|e| StoreError::Write(self.display(), e))?;
        temp.write_all(content.as_bytes())
            .map_err(|e| StoreError::Write(self.display(), e))?;
        temp.persist(&self.path)
            .map_err(|e| StoreError::Write(self.display(), e.error))?;

        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path).map_err(|e| StoreError::Remove(self.display(), e))?;
        }
        Ok(())
    }
}

/// In-memory store holding the encoded record, for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    raw: Option<String>,
    saves: usize,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already-encoded record (possibly malformed)
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
            saves: 0,
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// Number of successful saves
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl StateStore for MemoryStateStore {
    fn load(&self) -> Result<SessionState, StoreError> {
        Ok(self.raw.as_deref().map(decode_state).unwrap_or_default())
    }

    fn save(&mut self, state: &SessionState) -> Result<(), StoreError> {
        self.raw = Some(encode_state(state)?);
        self.saves += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.raw = None;
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
