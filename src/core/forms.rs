//! Remembered form values.
//!
//! Each calculator keeps the raw text of its last inputs under a fixed key.
//! Values are loaded once when the calculator starts and written back on every
//! change.

use crate::core::health::Gender;
use crate::core::measurement::{Category, Unit};
use crate::core::store::KeyValueCollection;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_RETENTION_DAYS: u64 = 365;

/// A form state bound to a store key.
pub trait FormState: Serialize + DeserializeOwned + Default + Clone {
    const KEY: &'static str;
}

pub struct PersistentForm<T: FormState> {
    value: T,
    collection: Arc<dyn KeyValueCollection>,
    retention: Option<Duration>,
}

impl<T: FormState> PersistentForm<T> {
    /// Loads the stored value, or the default when nothing usable is stored.
    pub fn load(collection: Arc<dyn KeyValueCollection>, retention: Option<Duration>) -> Self {
        let value = collection
            .get(T::KEY)
            .and_then(|raw| match serde_json::from_str::<T>(&raw) {
                Ok(v) => Some(v),
                Err(e) => {
                    debug!("Ignoring stored value for {}: {}", T::KEY, e);
                    None
                }
            })
            .unwrap_or_default();

        Self {
            value,
            collection,
            retention,
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn set(&mut self, value: T) {
        self.value = value;
        self.save();
    }

    pub fn update(&mut self, f: impl FnOnce(&mut T)) {
        f(&mut self.value);
        self.save();
    }

    fn save(&self) {
        match serde_json::to_string(&self.value) {
            Ok(raw) => self.collection.put(T::KEY, &raw, self.retention),
            Err(e) => debug!("Could not serialize {}: {}", T::KEY, e),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyForm {
    pub amount: String,
    pub from: String,
    pub to: String,
}

impl Default for CurrencyForm {
    fn default() -> Self {
        Self {
            amount: "1".to_string(),
            from: "BRL".to_string(),
            to: "USD".to_string(),
        }
    }
}

impl FormState for CurrencyForm {
    const KEY: &'static str = "currencyConverterState";
}

impl CurrencyForm {
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.from, &mut self.to);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementEntry {
    pub unit: Unit,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementForm {
    pub active_tab: Category,
    #[serde(default)]
    pub entries: BTreeMap<Category, MeasurementEntry>,
}

impl Default for MeasurementForm {
    fn default() -> Self {
        Self {
            active_tab: Category::Length,
            entries: BTreeMap::new(),
        }
    }
}

impl FormState for MeasurementForm {
    const KEY: &'static str = "measurementState";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestForm {
    pub principal: String,
    pub rate: String,
    pub time: String,
    pub compounds_per_year: String,
}

impl Default for InterestForm {
    fn default() -> Self {
        Self {
            principal: "1000".to_string(),
            rate: "5".to_string(),
            time: "10".to_string(),
            compounds_per_year: "12".to_string(),
        }
    }
}

impl FormState for InterestForm {
    const KEY: &'static str = "financialState";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanForm {
    pub amount: String,
    pub rate: String,
    pub term: String,
}

impl Default for LoanForm {
    fn default() -> Self {
        Self {
            amount: "200000".to_string(),
            rate: "6".to_string(),
            term: "30".to_string(),
        }
    }
}

impl FormState for LoanForm {
    const KEY: &'static str = "loanState";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TipForm {
    pub bill: String,
    pub tip_percent: String,
    pub people: String,
}

impl Default for TipForm {
    fn default() -> Self {
        Self {
            bill: "50".to_string(),
            tip_percent: "15".to_string(),
            people: "1".to_string(),
        }
    }
}

impl FormState for TipForm {
    const KEY: &'static str = "tipState";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthForm {
    pub height: String,
    pub weight: String,
    pub age: String,
    pub gender: Gender,
}

impl Default for HealthForm {
    fn default() -> Self {
        Self {
            height: "180".to_string(),
            weight: "75".to_string(),
            age: "30".to_string(),
            gender: Gender::Male,
        }
    }
}

impl FormState for HealthForm {
    const KEY: &'static str = "healthState";
}
