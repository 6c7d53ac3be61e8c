//! History configuration loaded from TOML (`visitlog.toml`).

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, VisitError};

/// Which storage strategy backs the history store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// Lives only as long as the process.
    #[default]
    Memory,
    /// One JSON blob in a preferences file.
    Preferences,
    /// One secure item per URL plus a key list in preferences.
    Secure,
}

impl std::fmt::Display for StorageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Memory => write!(f, "memory"),
            Self::Preferences => write!(f, "preferences"),
            Self::Secure => write!(f, "secure"),
        }
    }
}

impl std::str::FromStr for StorageKind {
    type Err = VisitError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "memory" => Ok(Self::Memory),
            "preferences" => Ok(Self::Preferences),
            "secure" => Ok(Self::Secure),
            other => Err(VisitError::Config(format!("unknown storage kind: {other}"))),
        }
    }
}

/// Settings for the visit history store.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    #[serde(default)]
    pub storage: StorageKind,
    /// JSON file holding preference values (history blob, secure key list).
    #[serde(default = "default_preferences_path")]
    pub preferences_path: PathBuf,
    /// Directory holding secure items.
    #[serde(default = "default_secure_dir")]
    pub secure_dir: PathBuf,
    /// Preference key under which the history blob is stored.
    #[serde(default = "default_history_key")]
    pub history_key: String,
    /// Preference key under which the secure backend keeps its key list.
    #[serde(default = "default_key_index_key")]
    pub key_index_key: String,
    /// Log a line for every history mutation.
    #[serde(default = "yes")]
    pub verbose: bool,
}

fn default_preferences_path() -> PathBuf {
    PathBuf::from("visitlog/preferences.json")
}
fn default_secure_dir() -> PathBuf {
    PathBuf::from("visitlog/secure")
}
fn default_history_key() -> String {
    "visit_history".to_string()
}
fn default_key_index_key() -> String {
    "visit_history_keys".to_string()
}
fn yes() -> bool {
    true
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            storage: StorageKind::default(),
            preferences_path: default_preferences_path(),
            secure_dir: default_secure_dir(),
            history_key: default_history_key(),
            key_index_key: default_key_index_key(),
            verbose: true,
        }
    }
}

impl HistoryConfig {
    /// Parse a config from TOML text. Missing fields take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load a config file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let cfg = Self::from_toml_str(&text)?;
        log::info!("Loaded history config from {} ({})", path.display(), cfg.storage);
        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        if self.history_key.is_empty() {
            return Err(VisitError::Config("history_key must not be empty".into()));
        }
        if self.key_index_key.is_empty() {
            return Err(VisitError::Config("key_index_key must not be empty".into()));
        }
        if self.history_key == self.key_index_key {
            return Err(VisitError::Config(
                "history_key and key_index_key must differ".into(),
            ));
        }
        Ok(())
    }
}
