pub mod database;
pub mod preferences;

pub use preferences::PreferenceStore;

use std::fs;
use std::path::{Path, PathBuf};

pub const PREFERENCES_FILE: &str = "preferences.db";

/// Ensure data directory exists
pub fn ensure_data_dir(dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dir)?;
    Ok(())
}

/// Opens the on-disk preference store. Returns `None` when the data
/// directory is unusable; the theme then simply won't persist.
pub fn open_preferences(data_dir: &Path) -> Option<PreferenceStore> {
    let path: PathBuf = data_dir.join(PREFERENCES_FILE);
    let opened = ensure_data_dir(data_dir)
        .map_err(crate::error::Error::from)
        .and_then(|_| PreferenceStore::open(&path));

    match opened {
        Ok(store) => {
            log::info!("Preferences stored in {}", path.display());
            Some(store)
        }
        Err(err) => {
            log::warn!(
                "Failed to open preferences at {} ({err}); theme will not persist",
                path.display()
            );
            None
        }
    }
}
