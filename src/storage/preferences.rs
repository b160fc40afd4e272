use std::path::Path;

use crate::common::ThemePreference;
use crate::error::{Error, Result};

use super::database::Database;

const THEME_KEY: &str = "theme";

/// Persistent user preferences. Currently only the theme survives a restart.
pub struct PreferenceStore {
    db: Database,
}

impl PreferenceStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            db: Database::open(path)?,
        })
    }

    #[cfg(test)]
    pub fn in_memory() -> Result<Self> {
        Ok(Self {
            db: Database::in_memory()?,
        })
    }

    /// Light unless something else was saved before.
    pub fn theme(&self) -> Result<ThemePreference> {
        match self.db.get_setting(THEME_KEY)? {
            Some(value) => ThemePreference::parse(&value).ok_or(Error::InvalidTheme(value)),
            None => Ok(ThemePreference::default()),
        }
    }

    pub fn set_theme(&self, theme: ThemePreference) -> Result<()> {
        self.db.set_setting(THEME_KEY, theme.as_str())?;
        Ok(())
    }

    /// Reads the stored theme, logging and falling back to light on failure.
    pub fn load_theme_or_default(&self) -> ThemePreference {
        self.theme().unwrap_or_else(|err| {
            log::warn!("Failed to read theme preference ({err}); using light");
            ThemePreference::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn theme_defaults_to_light() {
        let store = PreferenceStore::in_memory().unwrap();
        assert_eq!(store.theme().unwrap(), ThemePreference::Light);
    }

    #[test]
    fn theme_is_overwritten_on_each_save() {
        let store = PreferenceStore::in_memory().unwrap();
        store.set_theme(ThemePreference::Dark).unwrap();
        assert_eq!(store.theme().unwrap(), ThemePreference::Dark);
        store.set_theme(ThemePreference::Light).unwrap();
        assert_eq!(store.theme().unwrap(), ThemePreference::Light);
    }

    #[test]
    fn theme_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.db");

        PreferenceStore::open(&path)
            .unwrap()
            .set_theme(ThemePreference::Dark)
            .unwrap();

        let reopened = PreferenceStore::open(&path).unwrap();
        assert_eq!(reopened.theme().unwrap(), ThemePreference::Dark);
    }

    #[test]
    fn unknown_stored_value_falls_back() {
        let store = PreferenceStore::in_memory().unwrap();
        store.db.set_setting(THEME_KEY, "sepia").unwrap();

        assert!(matches!(store.theme(), Err(Error::InvalidTheme(v)) if v == "sepia"));
        assert_eq!(store.load_theme_or_default(), ThemePreference::Light);
    }
}
