//! History kept as secure items, one per URL.
//!
//! The item value is the decimal visit count. Secure storage cannot list its
//! keys, so an ordered key list is kept in preferences next to it. The key
//! list is the canonical order: URLs appear in the order they were first
//! saved.

use visitlog_platform::{PreferenceService, SecureStorage};
use visitlog_types::error::{Result, VisitError};

use crate::backend::Backend;
use crate::table::VisitTable;

/// History persisted through a [`SecureStorage`]. Insertion order.
#[derive(Debug)]
pub struct SecureBackend<S, P> {
    secure: S,
    prefs: P,
    keys_key: String,
}

impl<S: SecureStorage, P: PreferenceService> SecureBackend<S, P> {
    pub fn new(secure: S, prefs: P, keys_key: &str) -> Self {
        Self {
            secure,
            prefs,
            keys_key: keys_key.to_string(),
        }
    }

    pub fn secure(&self) -> &S {
        &self.secure
    }

    pub fn preferences(&self) -> &P {
        &self.prefs
    }

    /// Every key currently listed, in order.
    pub fn keys(&self) -> Result<Vec<String>> {
        match self.prefs.get(&self.keys_key)? {
            None => Ok(Vec::new()),
            Some(value) => serde_json::from_value(value).map_err(|e| {
                VisitError::Backend(format!("secure key list is unreadable: {e}"))
            }),
        }
    }

    fn write_keys(&mut self, keys: &[String]) -> Result<()> {
        if keys.is_empty() {
            return self.prefs.remove(&self.keys_key);
        }
        self.prefs.set(&self.keys_key, serde_json::to_value(keys)?)
    }

    fn read_item(&self, key: &str) -> Item {
        let raw = match self.secure.retrieve(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                log::warn!("Secure history item missing for listed key: {key}");
                return Item::Missing;
            },
            Err(e) => {
                log::warn!("Secure history item for {key} is unreadable: {e}");
                return Item::Unreadable;
            },
        };
        match raw.trim().parse::<u32>() {
            Ok(0) | Err(_) => {
                log::warn!("Secure history item for {key} has unusable count {raw:?}");
                Item::Unreadable
            },
            Ok(n) => Item::Count(n),
        }
    }
}

/// What a listed key currently holds.
enum Item {
    Count(u32),
    Missing,
    /// Present but not a usable count. Left in place for inspection.
    Unreadable,
}

impl<S: SecureStorage, P: PreferenceService> Backend for SecureBackend<S, P> {
    fn name(&self) -> &'static str {
        "secure"
    }

    fn load_all(&self) -> Result<VisitTable> {
        let mut table = VisitTable::new();
        for key in self.keys()? {
            if let Item::Count(visits) = self.read_item(&key) {
                table.insert(&key, visits);
            }
        }
        Ok(table)
    }

    /// Stale keys whose items cannot be read were never part of a loaded
    /// table, so they are kept listed rather than deleted.
    fn save_all(&mut self, table: &VisitTable) -> Result<()> {
        let mut kept = Vec::new();
        for stale in self.keys()? {
            if table.get(&stale).is_some() {
                continue;
            }
            match self.read_item(&stale) {
                Item::Unreadable => kept.push(stale),
                Item::Count(_) | Item::Missing => {
                    self.secure.delete(&stale)?;
                },
            }
        }
        for entry in table {
            self.secure.save(&entry.url, &entry.visits.to_string())?;
        }
        let mut keys = table.urls();
        keys.extend(kept);
        self.write_keys(&keys)
    }

    fn delete_one(&mut self, url: &str) -> Result<()> {
        if !self.secure.delete(url)? {
            log::debug!("No secure history item to delete for {url}");
        }
        let mut keys = self.keys()?;
        keys.retain(|k| k != url);
        self.write_keys(&keys)
    }

    fn clear(&mut self) -> Result<()> {
        for key in self.keys()? {
            self.secure.delete(&key)?;
        }
        self.prefs.remove(&self.keys_key)
    }
}
