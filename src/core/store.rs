//! Key-value storage abstractions for remembered form values

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// A named collection of string values.
///
/// Storage failures are logged by implementations and never surface to the
/// caller: a value that cannot be read is simply absent.
pub trait KeyValueCollection: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn put(&self, key: &str, value: &str, retention: Option<Duration>);
    fn remove(&self, key: &str);
}

/// Hands out collections by name.
pub trait Store: Send + Sync {
    fn get_collection(&self, name: &str) -> Arc<dyn KeyValueCollection>;
}

/// A stored value together with the moment it stops being valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredEntry {
    pub value: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl StoredEntry {
    pub fn new(value: &str, retention: Option<Duration>) -> Self {
        let expires_at = retention
            .and_then(|d| chrono::Duration::from_std(d).ok())
            .and_then(|d| Utc::now().checked_add_signed(d));
        Self {
            value: value.to_string(),
            expires_at,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| at <= Utc::now())
    }
}
