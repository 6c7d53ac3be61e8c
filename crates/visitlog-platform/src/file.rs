//! File-backed service implementations for desktop hosts.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use visitlog_types::error::{Result, VisitError};

use crate::services::{PreferenceService, SecureStorage};

/// Preferences persisted as one JSON object file.
///
/// The whole file is read on open and rewritten on every change. A missing
/// file opens as empty; a file that is not a JSON object is an error.
#[derive(Debug)]
pub struct FilePreferences {
    path: PathBuf,
    values: BTreeMap<String, serde_json::Value>,
}

impl FilePreferences {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = match fs::read(&path) {
            Ok(bytes) if bytes.is_empty() => BTreeMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        log::debug!("Opened preferences {} ({} keys)", path.display(), values.len());
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let data = serde_json::to_vec_pretty(&self.values)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

impl PreferenceService for FilePreferences {
    fn get(&self, key: &str) -> Result<Option<serde_json::Value>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: serde_json::Value) -> Result<()> {
        self.values.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.values.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// Secure items stored one per file in a directory.
///
/// File names are the hex SHA-256 digest of the item key: 64 characters
/// whatever the URL length, and always a valid file name. Values are
/// written as-is.
#[derive(Debug)]
pub struct FileSecureStorage {
    dir: PathBuf,
}

impl FileSecureStorage {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// File holding the item stored under `key`.
    pub fn item_path(&self, key: &str) -> PathBuf {
        self.dir.join(item_file_name(key))
    }
}

impl SecureStorage for FileSecureStorage {
    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        fs::write(self.item_path(key), value.as_bytes())?;
        Ok(())
    }

    fn retrieve(&self, key: &str) -> Result<Option<String>> {
        match fs::read(self.item_path(key)) {
            Ok(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|_| VisitError::Backend(format!("secure item is not UTF-8: {key}"))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn delete(&mut self, key: &str) -> Result<bool> {
        match fs::remove_file(self.item_path(key)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

fn item_file_name(key: &str) -> String {
    format!("{:x}", Sha256::digest(key.as_bytes()))
}
