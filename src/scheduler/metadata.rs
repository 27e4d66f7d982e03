use std::collections::HashMap;

use parking_lot::Mutex;
use serde_json::Value;

/// Per-frame map from widget alias to its parsed configuration.
///
/// Shared by every pipeline of a frame; lookups return owned copies so no lock is held while
/// widget code runs.
#[derive(Debug, Default)]
pub struct MetadataStore {
    entries: Mutex<HashMap<String, Value>>,
}

impl MetadataStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store (or replace) the parsed configuration of `identity`.
    pub fn put(&self, identity: impl Into<String>, parsed: Value) {
        self.entries.lock().insert(identity.into(), parsed);
    }

    /// Look up `dot_path` inside the configuration of `identity`.
    ///
    /// An empty path returns the whole tree. Returns `None` when the identity is unknown or any
    /// segment is missing or not an object.
    pub fn get(&self, identity: &str, dot_path: &str) -> Option<Value> {
        let entries = self.entries.lock();
        let mut node = entries.get(identity)?;
        if dot_path.is_empty() {
            return Some(node.clone());
        }
        for seg in dot_path.split('.') {
            node = node.as_object()?.get(seg)?;
        }
        Some(node.clone())
    }

    /// Number of stored identities.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Return `true` when nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scheduler/metadata.rs"]
mod tests;
