use crate::core::store::{KeyValueCollection, StoredEntry};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use std::time::Duration;
use tracing::debug;

/// In-memory collection, used for tests and when no data directory is usable.
#[derive(Default)]
pub struct MemoryCollection {
    inner: RwLock<HashMap<String, StoredEntry>>,
}

impl MemoryCollection {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueCollection for MemoryCollection {
    fn get(&self, key: &str) -> Option<String> {
        let expired = {
            let entries = self.inner.read().unwrap_or_else(PoisonError::into_inner);
            match entries.get(key) {
                Some(entry) if !entry.is_expired() => {
                    debug!("Store HIT for key: {}", key);
                    return Some(entry.value.clone());
                }
                Some(_) => true,
                None => false,
            }
        };

        if expired {
            // A put may have landed since the read lock was released
            let mut entries = self.inner.write().unwrap_or_else(PoisonError::into_inner);
            if entries.get(key).is_some_and(StoredEntry::is_expired) {
                debug!("Store entry expired for key: {}", key);
                entries.remove(key);
            } else if let Some(entry) = entries.get(key) {
                debug!("Store HIT for key: {}", key);
                return Some(entry.value.clone());
            }
        } else {
            debug!("Store MISS for key: {}", key);
        }
        None
    }

    fn put(&self, key: &str, value: &str, retention: Option<Duration>) {
        let mut entries = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        debug!("Store PUT for key: {}", key);
        entries.insert(key.to_string(), StoredEntry::new(value, retention));
    }

    fn remove(&self, key: &str) {
        let mut entries = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        debug!("Store REMOVE for key: {}", key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_get_put() {
        let collection = MemoryCollection::new();

        // Initially, collection is empty
        assert!(collection.get("key1").is_none());

        collection.put("key1", "value1", None);
        assert_eq!(collection.get("key1").as_deref(), Some("value1"));
        assert!(collection.get("key2").is_none());

        // Overwrite keeps the latest value
        collection.put("key1", "value2", None);
        assert_eq!(collection.get("key1").as_deref(), Some("value2"));
    }

    #[test]
    fn test_memory_retention_expiry() {
        let collection = MemoryCollection::new();

        collection.put("key1", "value1", Some(Duration::ZERO));
        assert!(collection.get("key1").is_none());

        collection.put("key2", "value2", Some(Duration::from_secs(60)));
        assert_eq!(collection.get("key2").as_deref(), Some("value2"));
    }

    #[test]
    fn test_expired_entry_replaced_concurrently_survives() {
        use std::sync::Arc;
        use std::thread;

        let collection = Arc::new(MemoryCollection::new());
        for round in 0..200 {
            collection.put("key1", "stale", Some(Duration::ZERO));
            let writer = {
                let collection = Arc::clone(&collection);
                thread::spawn(move || collection.put("key1", "fresh", None))
            };
            let _ = collection.get("key1");
            writer.join().unwrap();
            assert_eq!(
                collection.get("key1").as_deref(),
                Some("fresh"),
                "fresh value lost in round {round}"
            );
        }
    }

    #[test]
    fn test_memory_remove() {
        let collection = MemoryCollection::new();

        collection.put("key1", "value1", None);
        collection.remove("key1");
        assert!(collection.get("key1").is_none());
    }
}
