//! Salt store backed by a directory on disk.
//!
//! Each key is stored in its own file named after the key. First writes go
//! through a temporary file that is linked into place without clobbering, so
//! concurrent processes initializing the same install agree on one value.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::StoreError;
use crate::traits::SaltStore;

/// Salt store persisting one file per key under a directory.
#[derive(Debug, Clone)]
pub struct FileSaltStore {
    dir: PathBuf,
}

impl FileSaltStore {
    /// Opens the store rooted at `dir`, creating the directory if needed.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Directory holding the store's files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
        if !valid {
            return Err(StoreError::InvalidKey(key.to_owned()));
        }
        Ok(self.dir.join(key))
    }

    fn staged(&self, value: &str) -> Result<NamedTempFile, StoreError> {
        let mut file = NamedTempFile::new_in(&self.dir)?;
        file.write_all(value.as_bytes())?;
        file.as_file().sync_all()?;
        Ok(file)
    }
}

impl SaltStore for FileSaltStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: Option<&str>) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match value {
            Some(value) => {
                self.staged(value)?
                    .persist(&path)
                    .map_err(|e| StoreError::Io(e.error))?;
            }
            None => match fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            },
        }
        Ok(())
    }

    fn get_or_insert(&self, key: &str, value: &str) -> Result<String, StoreError> {
        if let Some(existing) = self.get(key)? {
            return Ok(existing);
        }

        let path = self.path_for(key)?;
        match self.staged(value)?.persist_noclobber(&path) {
            Ok(_) => Ok(value.to_owned()),
            Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => {
                debug!(key, "lost first-write race; reading back stored value");
                self.get(key)?.ok_or_else(|| {
                    StoreError::Backend(format!("value under '{key}' vanished after write race"))
                })
            }
            Err(e) => Err(StoreError::Io(e.error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn rejects_keys_that_escape_the_directory() {
        let dir = TempDir::new().unwrap();
        let store = FileSaltStore::open(dir.path()).unwrap();
        for key in ["", "../salt", "a/b", ".hidden"] {
            assert!(matches!(store.get(key), Err(StoreError::InvalidKey(_))));
        }
    }

    #[test]
    fn set_overwrites_and_clears() {
        let dir = TempDir::new().unwrap();
        let store = FileSaltStore::open(dir.path()).unwrap();
        store.set("k", Some("one")).unwrap();
        store.set("k", Some("two")).unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));
        store.set("k", None).unwrap();
        store.set("k", None).unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn values_are_returned_verbatim() {
        let dir = TempDir::new().unwrap();
        let store = FileSaltStore::open(dir.path()).unwrap();
        store.set("k", Some(" padded\n")).unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some(" padded\n"));
    }
}
