use std::collections::HashMap;

use parking_lot::RwLock;

/// Keyed state behind the host-side stores. Implementations are constructed
/// at process start and injected; none promise persistence across restarts.
pub trait KeyedStore<T>: Send + Sync {
    fn get(&self, key: &str) -> Option<T>;
    fn put(&self, key: &str, value: T);
    fn remove(&self, key: &str) -> Option<T>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory store over a read-write locked map.
pub struct MemoryStore<T> {
    entries: RwLock<HashMap<String, T>>,
}

impl<T> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync> KeyedStore<T> for MemoryStore<T> {
    fn get(&self, key: &str) -> Option<T> {
        self.entries.read().get(key).cloned()
    }

    fn put(&self, key: &str, value: T) {
        self.entries.write().insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) -> Option<T> {
        self.entries.write().remove(key)
    }

    fn len(&self) -> usize {
        self.entries.read().len()
    }
}
