use crate::error::PersistenceError;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

const STATE_DIR: &str = ".termin";
// Maximum allowed size for state files to prevent DoS attacks (10MB)
const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;
const MAX_ITEMS: usize = 10000;

// Trait for items that can be persisted under a single storage key
pub trait Persistent: Sized + Serialize + for<'de> Deserialize<'de> {
    fn key() -> &'static str;
}

/// Key-value store over a directory: each key is one JSON array file
#[derive(Debug, Clone)]
pub struct StateManager {
    state_dir: PathBuf,
}

impl StateManager {
    /// Store under `~/.termin`
    pub fn new() -> Result<Self, PersistenceError> {
        let mut state_dir = dirs::home_dir().ok_or(PersistenceError::NoHomeDir)?;
        state_dir.push(STATE_DIR);
        Self::with_dir(state_dir)
    }

    pub fn with_dir(state_dir: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let state_dir = state_dir.into();
        std::fs::create_dir_all(&state_dir)?;
        Ok(Self { state_dir })
    }

    pub fn path_for<T: Persistent>(&self) -> PathBuf {
        self.state_dir.join(format!("{}.json", T::key()))
    }

    pub fn try_load<T: Persistent>(&self) -> Result<Vec<T>, PersistenceError> {
        let path = self.path_for::<T>();
        if !path.exists() {
            return Ok(Vec::new());
        }

        // Check file size before loading to prevent DoS attacks
        let metadata = std::fs::metadata(&path)?;
        if metadata.len() > MAX_FILE_SIZE {
            return Err(PersistenceError::TooLarge(format!(
                "{} exceeds {} bytes",
                path.display(),
                MAX_FILE_SIZE
            )));
        }

        let reader = BufReader::new(File::open(&path)?);
        let json_value: serde_json::Value = serde_json::from_reader(reader)
            .map_err(|e| PersistenceError::Corrupt(format!("failed to parse JSON data: {}", e)))?;

        if let Some(array) = json_value.as_array() {
            if array.len() > MAX_ITEMS {
                return Err(PersistenceError::TooLarge(format!(
                    "too many items in {} (maximum {})",
                    T::key(),
                    MAX_ITEMS
                )));
            }
        }

        serde_json::from_value(json_value)
            .map_err(|e| PersistenceError::Corrupt(format!("failed to deserialize data: {}", e)))
    }

    /// Overwrite everything stored under the item's key
    pub fn try_save<T: Persistent>(&self, items: &[T]) -> Result<(), PersistenceError> {
        let path = self.path_for::<T>();
        let file = OpenOptions::new().write(true).create(true).truncate(true).open(path)?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, items)
            .map_err(|e| PersistenceError::Io(e.into()))?;
        writer.flush()?;
        Ok(())
    }

    /// Load, treating absent or unreadable data as an empty collection
    pub fn load<T: Persistent>(&self) -> Vec<T> {
        match self.try_load() {
            Ok(items) => {
                debug!("Loaded {} item(s) from '{}'", items.len(), T::key());
                items
            }
            Err(e) => {
                warn!("Failed to load '{}' from {}: {}", T::key(), self.state_dir.display(), e);
                Vec::new()
            }
        }
    }

    /// Save, logging instead of failing
    pub fn save<T: Persistent>(&self, items: &[T]) {
        match self.try_save(items) {
            Ok(()) => debug!("Saved {} item(s) to '{}'", items.len(), T::key()),
            Err(e) => {
                log::error!("Failed to save '{}' to {}: {}", T::key(), self.state_dir.display(), e)
            }
        }
    }
}
