//! Install salt lifecycle: load the persisted salt or create it exactly once.

use std::sync::Mutex;

use rand::distr::Alphanumeric;
use rand::Rng;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::traits::SaltStore;

/// Storage key of the install salt.
pub const SALT_STORAGE_KEY: &str = "ViewTrack.EventsTracker.ClientId";

/// Length of a generated salt, in characters.
pub const GENERATED_SALT_LEN: usize = 32;

/// Serializes salt initialization within the process.
static SALT_INIT: Mutex<()> = Mutex::new(());

/// Generates a fresh random alphanumeric salt.
pub fn generate_salt() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_SALT_LEN)
        .map(char::from)
        .collect()
}

/// Returns the install salt, generating and persisting one on first use.
///
/// A persisted salt is never replaced. If the store already holds an empty
/// value this fails with [`StoreError::CorruptSalt`] instead of regenerating,
/// and store failures propagate so callers cannot fall back to an ephemeral
/// salt.
///
/// The read-or-generate-and-persist sequence runs under a process-wide lock,
/// so concurrent callers in one process always agree on a single salt even
/// with a store that only implements `get` and `set`.
pub fn load_or_create_salt(store: &dyn SaltStore) -> Result<String, StoreError> {
    let _guard = SALT_INIT.lock().map_err(|_| StoreError::Poisoned)?;

    if let Some(salt) = store.get(SALT_STORAGE_KEY)? {
        debug!("reusing persisted install salt");
        return non_empty(salt);
    }

    let candidate = generate_salt();
    let salt = store.get_or_insert(SALT_STORAGE_KEY, &candidate)?;
    if salt == candidate {
        info!("generated new install salt");
    } else {
        debug!("install salt was persisted concurrently; using stored value");
    }
    non_empty(salt)
}

fn non_empty(salt: String) -> Result<String, StoreError> {
    if salt.is_empty() {
        return Err(StoreError::CorruptSalt {
            key: SALT_STORAGE_KEY.to_owned(),
        });
    }
    Ok(salt)
}
