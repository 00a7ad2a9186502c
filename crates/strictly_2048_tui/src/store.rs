//! Best score kept in a JSON file.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use strictly_2048::{BEST_SCORE_KEY, ScoreStore, StoreError};
use tracing::{debug, instrument};

/// [`ScoreStore`] backed by a small JSON object on disk.
///
/// The file is read on every `get` and rewritten on every `set`, so two
/// terminals sharing a file see each other's records. Writes to
/// [`BEST_SCORE_KEY`] keep the larger of the stored and new value, so a
/// terminal that started from an older record cannot lower it. A missing
/// file reads as an empty store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store at `path`. Nothing is touched until first use.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, u64>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(StoreError::new(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            StoreError::new(format!("Failed to parse {}: {}", self.path.display(), e))
        })
    }
}

impl ScoreStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<u64>, StoreError> {
        Ok(self.read_all()?.get(key).copied())
    }

    fn set(&mut self, key: &str, value: u64) -> Result<(), StoreError> {
        let mut values = self.read_all()?;
        let value = match values.get(key) {
            Some(&stored) if key == BEST_SCORE_KEY && stored > value => {
                debug!(stored, value, "Keeping higher stored best score");
                stored
            }
            _ => value,
        };
        values.insert(key.to_string(), value);

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::new(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let json = serde_json::to_string_pretty(&values)
            .map_err(|e| StoreError::new(format!("Failed to encode scores: {}", e)))?;
        std::fs::write(&self.path, json).map_err(|e| {
            StoreError::new(format!("Failed to write {}: {}", self.path.display(), e))
        })?;

        debug!(key, value, path = %self.path.display(), "Score saved");
        Ok(())
    }
}
