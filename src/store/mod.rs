pub mod disk;
pub mod memory;

use crate::core::store::{KeyValueCollection, Store};
use disk::DiskCollection;
use fjall::{Keyspace, PartitionCreateOptions};
use memory::MemoryCollection;
use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, PoisonError, RwLock},
};
use tracing::{debug, warn};

/// A thread-safe key-value store that can hold multiple collections.
///
/// Collections live on disk when a keyspace could be opened, in memory
/// otherwise.
pub struct KeyValueStore {
    collections: RwLock<HashMap<String, Arc<dyn KeyValueCollection>>>,
    keyspace: Option<Keyspace>,
}

impl KeyValueStore {
    /// Opens (or creates) a keyspace under `path`.
    pub fn open(path: &Path) -> Self {
        let keyspace = match fjall::Config::new(path).open() {
            Ok(ks) => {
                debug!("Opened form store at {}", path.display());
                Some(ks)
            }
            Err(e) => {
                warn!(
                    "Could not open form store at {}, values will not be remembered: {}",
                    path.display(),
                    e
                );
                None
            }
        };

        Self {
            collections: RwLock::new(HashMap::new()),
            keyspace,
        }
    }

    pub fn in_memory() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            keyspace: None,
        }
    }

    pub fn is_persistent(&self) -> bool {
        self.keyspace.is_some()
    }

    fn create_collection(&self, name: &str) -> Arc<dyn KeyValueCollection> {
        if let Some(ks) = &self.keyspace {
            match ks.open_partition(name, PartitionCreateOptions::default()) {
                Ok(partition) => return Arc::new(DiskCollection::new(partition)),
                Err(e) => warn!("Could not open partition {}: {}", name, e),
            }
        }
        Arc::new(MemoryCollection::new())
    }
}

impl Drop for KeyValueStore {
    fn drop(&mut self) {
        if let Some(ks) = &self.keyspace {
            if let Err(e) = ks.persist(fjall::PersistMode::SyncAll) {
                warn!("Could not flush form store: {}", e);
            }
        }
    }
}

impl Store for KeyValueStore {
    fn get_collection(&self, name: &str) -> Arc<dyn KeyValueCollection> {
        {
            let collections = self.collections.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(collection) = collections.get(name) {
                return Arc::clone(collection);
            }
        }

        let mut collections = self
            .collections
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let collection = collections
            .entry(name.to_string())
            .or_insert_with(|| self.create_collection(name));
        Arc::clone(collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_collections_are_shared_by_name() {
        let store = KeyValueStore::in_memory();
        assert!(!store.is_persistent());

        store.get_collection("forms").put("key1", "value1", None);
        assert_eq!(
            store.get_collection("forms").get("key1").as_deref(),
            Some("value1")
        );
        assert!(store.get_collection("other").get("key1").is_none());
    }

    #[test]
    fn test_persistent_store() {
        let dir = tempdir().unwrap();
        let store = KeyValueStore::open(dir.path());
        assert!(store.is_persistent());

        let collection = store.get_collection("forms");
        collection.put("key1", "value1", None);
        assert_eq!(collection.get("key1").as_deref(), Some("value1"));
        drop(collection);
        drop(store);

        let reopened = KeyValueStore::open(dir.path());
        assert_eq!(
            reopened.get_collection("forms").get("key1").as_deref(),
            Some("value1")
        );
    }
}
