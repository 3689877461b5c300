//! In-process salt store.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::StoreError;
use crate::traits::SaltStore;

/// Salt store kept in memory. Values last as long as the store.
#[derive(Debug, Default)]
pub struct MemorySaltStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySaltStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding `value` under `key`.
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        if let Ok(mut values) = store.values.lock() {
            values.insert(key.into(), value.into());
        }
        store
    }
}

impl SaltStore for MemorySaltStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let values = self.values.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: Option<&str>) -> Result<(), StoreError> {
        let mut values = self.values.lock().map_err(|_| StoreError::Poisoned)?;
        match value {
            Some(value) => {
                values.insert(key.to_owned(), value.to_owned());
            }
            None => {
                values.remove(key);
            }
        }
        Ok(())
    }

    fn get_or_insert(&self, key: &str, value: &str) -> Result<String, StoreError> {
        let mut values = self.values.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(values
            .entry(key.to_owned())
            .or_insert_with(|| value.to_owned())
            .clone())
    }
}
