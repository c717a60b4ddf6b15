use std::path::PathBuf;

use super::{open_store, Result};
use crate::settings::{load_settings, save_settings, shellexpand_path};
use crate::store::Store;

pub fn run(file: Option<String>) -> Result<()> {
    let store = open_store(file);
    store.initialize()?;
    println!("Initialized tally at {}", store.path().display());
    Ok(())
}

/// Point the settings at another data file, creating it if needed.
pub fn use_file(path: &str) -> Result<()> {
    let resolved = PathBuf::from(shellexpand_path(path));
    Store::new(&resolved).initialize()?;

    let mut settings = load_settings();
    settings.data_file = resolved.to_string_lossy().to_string();
    save_settings(&settings)?;

    println!("Now using {}", resolved.display());
    Ok(())
}
