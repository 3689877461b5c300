//! Storage capability for the install salt.

use std::sync::Arc;

use crate::error::StoreError;

/// Key-value persistence for a single opaque string per key.
///
/// Hosts supply an implementation backed by whatever durable storage they
/// have. Only `get` and `set` are required; backends that can do better than
/// get-then-set should override [`SaltStore::get_or_insert`].
pub trait SaltStore: Send + Sync {
    /// Returns the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, or removes the key when `value` is `None`.
    fn set(&self, key: &str, value: Option<&str>) -> Result<(), StoreError>;

    /// Returns the value under `key`, storing `value` first if the key is absent.
    ///
    /// The default reads the key, writes `value` if it is absent, then reads it
    /// back and returns what the store holds. It is not atomic across
    /// processes: two writers racing in separate processes may both write, and
    /// the store keeps whichever landed last. Within one process,
    /// [`load_or_create_salt`](crate::load_or_create_salt) serializes callers.
    /// Backends that can insert without clobbering (such as
    /// [`FileSaltStore`](crate::FileSaltStore)) should override this so the
    /// first writer wins everywhere.
    fn get_or_insert(&self, key: &str, value: &str) -> Result<String, StoreError> {
        if let Some(existing) = self.get(key)? {
            return Ok(existing);
        }
        self.set(key, Some(value))?;
        self.get(key)?.ok_or_else(|| {
            StoreError::Backend(format!("value under '{key}' missing after write"))
        })
    }
}

impl<S: SaltStore + ?Sized> SaltStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: Option<&str>) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn get_or_insert(&self, key: &str, value: &str) -> Result<String, StoreError> {
        (**self).get_or_insert(key, value)
    }
}
