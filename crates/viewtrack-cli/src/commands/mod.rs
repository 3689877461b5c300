//! Command implementations.

pub mod event;
pub mod salt;
pub mod tokenize;
pub mod verify;

use std::path::PathBuf;

use clap::Args;
use tracing::debug;
use viewtrack_canonical::Tokenizer;
use viewtrack_tracker::{load_or_create_salt, FileSaltStore};

/// Where the tokenizer salt comes from.
#[derive(Args, Debug, Clone)]
pub struct SaltSource {
    /// Salt to tokenize with
    #[arg(long, global = true, conflicts_with = "store")]
    pub salt: Option<String>,
    /// Directory of a file-backed salt store (the salt is created on first use)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,
}

impl SaltSource {
    /// Builds the tokenizer selected by `--salt` or `--store`.
    pub fn tokenizer(&self) -> Result<Tokenizer, Box<dyn std::error::Error>> {
        let salt = match (&self.salt, &self.store) {
            (Some(salt), _) => salt.clone(),
            (None, Some(dir)) => {
                debug!(dir = %dir.display(), "loading install salt from file store");
                let store = FileSaltStore::open(dir)
                    .map_err(|e| format!("Failed to open salt store {}: {}", dir.display(), e))?;
                load_or_create_salt(&store)?
            }
            (None, None) => return Err("either --salt or --store is required".into()),
        };
        Ok(Tokenizer::new(salt)?)
    }
}
