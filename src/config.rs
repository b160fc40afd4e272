use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::chat::directory::default_contacts;
use crate::chat::reply::default_fillers;
use crate::chat::DeliveryDelays;
use crate::common::Contact;
use crate::error::{Error, Result};

pub const DEFAULT_CONFIG_PATH: &str = "config/chat.json";
pub const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub delays: DeliveryDelays,
    /// Replaces the built-in directory when set.
    pub contacts: Option<Vec<Contact>>,
    /// Replaces the built-in filler pool when set.
    pub filler_replies: Option<Vec<String>>,
    pub data_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            delays: DeliveryDelays::default(),
            contacts: None,
            filler_replies: None,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        self.delays.validate()?;

        if let Some(contacts) = &self.contacts {
            if contacts.is_empty() {
                return Err(Error::Config("contacts list is empty".to_string()));
            }
            for (index, contact) in contacts.iter().enumerate() {
                if contacts[..index].iter().any(|other| other.id == contact.id) {
                    return Err(Error::Config(format!(
                        "duplicate contact id {}",
                        contact.id
                    )));
                }
            }
        }

        if matches!(&self.filler_replies, Some(fillers) if fillers.is_empty()) {
            return Err(Error::Config("filler_replies is empty".to_string()));
        }
        Ok(())
    }

    pub fn contacts(&self) -> Vec<Contact> {
        self.contacts.clone().unwrap_or_else(default_contacts)
    }

    pub fn filler_replies(&self) -> Vec<String> {
        self.filler_replies.clone().unwrap_or_else(default_fillers)
    }
}

fn read_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Missing or broken config files are not fatal: defaults are used instead.
pub fn load_config(path: &str) -> AppConfig {
    let path = Path::new(path);
    match read_config(path) {
        Ok(config) => {
            log::info!("Loaded config from {}", path.display());
            config
        }
        Err(Error::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
            log::info!(
                "Config file {} not found ({err}); using defaults",
                path.display()
            );
            AppConfig::default()
        }
        Err(err) => {
            log::warn!("Failed to load config file {}: {err}", path.display());
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, body: &str) -> String {
        let path = dir.path().join("chat.json");
        fs::write(&path, body).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.json");
        let config = load_config(&path.to_string_lossy());
        assert_eq!(config.delays, DeliveryDelays::default());
        assert_eq!(config.contacts(), default_contacts());
        assert_eq!(config.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, r#"{ "delays": { "reply_ms": 5000 } }"#);
        let config = load_config(&path);
        assert_eq!(config.delays.reply_ms, 5000);
        assert_eq!(config.delays.received_ms, 500);
        assert_eq!(config.filler_replies(), default_fillers());
    }

    #[test]
    fn custom_contacts_and_fillers() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"{
  "contacts": [
    { "id": 10, "name": "Meera", "online": true, "avatar": "M", "color": "red" }
  ],
  "filler_replies": ["sure", "maybe"],
  "data_dir": "/tmp/sim-chat"
}"#,
        );
        let config = load_config(&path);
        let contacts = config.contacts();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].name, "Meera");
        assert_eq!(config.filler_replies(), vec!["sure", "maybe"]);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/sim-chat"));
    }

    #[test]
    fn inverted_delays_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, r#"{ "delays": { "received_ms": 2000, "read_ms": 100 } }"#);
        assert_eq!(load_config(&path).delays, DeliveryDelays::default());
    }

    #[test]
    fn malformed_json_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "{ not json");
        assert!(load_config(&path).contacts.is_none());
    }

    #[test]
    fn duplicate_contact_ids_fail_validation() {
        let contact = default_contacts().remove(0);
        let config = AppConfig {
            contacts: Some(vec![contact.clone(), contact]),
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn empty_filler_pool_fails_validation() {
        let config = AppConfig {
            filler_replies: Some(Vec::new()),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
