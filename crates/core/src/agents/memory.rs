//! Per-agent key/value memory.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Private memory owned by one agent.
///
/// Writes go through the owning [`Agent`](crate::agents::Agent) only. The
/// store guards itself with a lock, so concurrent calls on the same agent
/// cannot corrupt it.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&self, key: String, value: Value) -> Option<Value> {
        self.lock().insert(key, value)
    }

    pub(crate) fn remove(&self, key: &str) -> Option<Value> {
        self.lock().remove(key)
    }

    pub(crate) fn clear(&self) {
        self.lock().clear();
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.lock().get(key).cloned()
    }

    /// Stored keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.lock().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Value>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
