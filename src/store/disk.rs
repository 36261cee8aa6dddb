use crate::core::store::{KeyValueCollection, StoredEntry};
use anyhow::Result;
use fjall::PartitionHandle;
use std::time::Duration;
use tracing::debug;

/// Collection backed by a fjall partition. Values are stored as JSON
/// `StoredEntry` records so the retention hint survives restarts.
pub struct DiskCollection {
    partition: PartitionHandle,
}

impl DiskCollection {
    pub fn new(partition: PartitionHandle) -> Self {
        Self { partition }
    }

    fn read(&self, key: &str) -> Result<Option<String>> {
        let Some(raw) = self.partition.get(key)? else {
            debug!("Store MISS for key: {}", key);
            return Ok(None);
        };
        let entry: StoredEntry = serde_json::from_slice(&raw)?;
        if entry.is_expired() {
            debug!("Store entry expired for key: {}", key);
            self.partition.remove(key)?;
            return Ok(None);
        }
        debug!("Store HIT for key: {}", key);
        Ok(Some(entry.value))
    }

    fn write(&self, key: &str, value: &str, retention: Option<Duration>) -> Result<()> {
        let entry = StoredEntry::new(value, retention);
        self.partition.insert(key, serde_json::to_vec(&entry)?)?;
        debug!("Store PUT for key: {}", key);
        Ok(())
    }
}

impl KeyValueCollection for DiskCollection {
    fn get(&self, key: &str) -> Option<String> {
        match self.read(key) {
            Ok(value) => value,
            Err(e) => {
                debug!("DiskCollection get error for {}: {}", key, e);
                None
            }
        }
    }

    fn put(&self, key: &str, value: &str, retention: Option<Duration>) {
        if let Err(e) = self.write(key, value, retention) {
            debug!("DiskCollection put error for {}: {}", key, e);
        }
    }

    fn remove(&self, key: &str) {
        if let Err(e) = self.partition.remove(key) {
            debug!("DiskCollection remove error for {}: {}", key, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fjall::PartitionCreateOptions;
    use tempfile::tempdir;

    fn open_collection(path: &std::path::Path) -> (fjall::Keyspace, DiskCollection) {
        let keyspace = fjall::Config::new(path).open().unwrap();
        let partition = keyspace
            .open_partition("forms", PartitionCreateOptions::default())
            .unwrap();
        (keyspace, DiskCollection::new(partition))
    }

    #[test]
    fn test_disk_get_put() {
        let dir = tempdir().unwrap();
        let (_keyspace, collection) = open_collection(dir.path());

        assert!(collection.get("key1").is_none());

        collection.put("key1", r#"{"amount":"1"}"#, None);
        assert_eq!(collection.get("key1").as_deref(), Some(r#"{"amount":"1"}"#));
        assert!(collection.get("key2").is_none());
    }

    #[test]
    fn test_disk_retention_expiry() {
        let dir = tempdir().unwrap();
        let (_keyspace, collection) = open_collection(dir.path());

        collection.put("key1", "value1", Some(Duration::ZERO));
        assert!(collection.get("key1").is_none());

        collection.put("key2", "value2", Some(Duration::from_secs(60)));
        assert_eq!(collection.get("key2").as_deref(), Some("value2"));
    }

    #[test]
    fn test_disk_remove() {
        let dir = tempdir().unwrap();
        let (_keyspace, collection) = open_collection(dir.path());

        collection.put("key1", "value1", None);
        collection.remove("key1");
        assert!(collection.get("key1").is_none());
    }

    #[test]
    fn test_disk_ignores_corrupt_entries() {
        let dir = tempdir().unwrap();
        let (_keyspace, collection) = open_collection(dir.path());

        collection.partition.insert("key1", "not json").unwrap();
        assert!(collection.get("key1").is_none());
    }
}
