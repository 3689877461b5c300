//! Salt command implementation.

use std::path::PathBuf;

use viewtrack_tracker::{load_or_create_salt, FileSaltStore};

pub fn run(store: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let store = FileSaltStore::open(&store)
        .map_err(|e| format!("Failed to open salt store {}: {}", store.display(), e))?;
    println!("{}", load_or_create_salt(&store)?);
    Ok(())
}
