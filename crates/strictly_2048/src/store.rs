//! Best-score persistence seam.
//!
//! The engine only needs `get` and `set` on integer values. Where they live
//! (a file, a browser, memory) is the caller's business.

use derive_more::{Display, Error};
use std::collections::HashMap;
use tracing::instrument;

/// Key under which the best score is stored.
pub const BEST_SCORE_KEY: &str = "best_score";

/// Key-value store of non-negative integers.
pub trait ScoreStore {
    /// Reads a value. `Ok(None)` means the key was never written.
    fn get(&self, key: &str) -> Result<Option<u64>, StoreError>;

    /// Writes a value.
    fn set(&mut self, key: &str, value: u64) -> Result<(), StoreError>;
}

/// In-memory store, lost when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, u64>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds a best score.
    #[instrument]
    pub fn with_best_score(best: u64) -> Self {
        let mut store = Self::new();
        store.values.insert(BEST_SCORE_KEY.to_string(), best);
        store
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<u64>, StoreError> {
        Ok(self.values.get(key).copied())
    }

    fn set(&mut self, key: &str, value: u64) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Score store failure with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
