//! In-memory result sink.

use super::{ResolutionResult, ResultSink, SavedPaths};
use crate::error::Result;
use std::sync::RwLock;

/// Keeps every persisted result in memory.
pub struct MemorySink {
    results: RwLock<Vec<ResolutionResult>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self {
            results: RwLock::new(Vec::new()),
        }
    }

    /// Results persisted so far, oldest first.
    pub fn results(&self) -> Vec<ResolutionResult> {
        self.results.read().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.results.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultSink for MemorySink {
    fn persist(&self, result: &ResolutionResult) -> Result<SavedPaths> {
        self.results.write().unwrap().push(result.clone());
        Ok(SavedPaths::default())
    }
}
