//! In-memory service implementations.
//!
//! Useful for unit tests and private sessions where nothing should outlive
//! the process.

use std::collections::{BTreeMap, HashMap};

use visitlog_types::error::Result;

use crate::services::{PreferenceService, SecureStorage};

/// Preferences held in a map.
#[derive(Debug, Default, Clone)]
pub struct MemoryPreferences {
    values: BTreeMap<String, serde_json::Value>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently set.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PreferenceService for MemoryPreferences {
    fn get(&self, key: &str) -> Result<Option<serde_json::Value>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: serde_json::Value) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// Secure items held in a map.
#[derive(Debug, Default, Clone)]
pub struct MemorySecureStorage {
    items: HashMap<String, String>,
}

impl MemorySecureStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SecureStorage for MemorySecureStorage {
    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn retrieve(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn delete(&mut self, key: &str) -> Result<bool> {
        Ok(self.items.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn preferences_set_get_remove() {
        let mut prefs = MemoryPreferences::new();
        assert!(prefs.is_empty());
        prefs.set("a", json!([1, 2])).unwrap();
        assert_eq!(prefs.get("a").unwrap(), Some(json!([1, 2])));
        assert_eq!(prefs.len(), 1);
        prefs.remove("a").unwrap();
        assert_eq!(prefs.get("a").unwrap(), None);
    }

    #[test]
    fn preferences_remove_absent_is_ok() {
        let mut prefs = MemoryPreferences::new();
        prefs.remove("ghost").unwrap();
    }

    #[test]
    fn preferences_overwrite() {
        let mut prefs = MemoryPreferences::new();
        prefs.set("k", json!("old")).unwrap();
        prefs.set("k", json!("new")).unwrap();
        assert_eq!(prefs.get("k").unwrap(), Some(json!("new")));
    }

    #[test]
    fn secure_save_retrieve_delete() {
        let mut store = MemorySecureStorage::new();
        store.save("https://a.com", "3").unwrap();
        assert_eq!(store.retrieve("https://a.com").unwrap().as_deref(), Some("3"));
        assert!(store.delete("https://a.com").unwrap());
        assert!(!store.delete("https://a.com").unwrap());
        assert_eq!(store.retrieve("https://a.com").unwrap(), None);
    }

    #[test]
    fn boxed_services_delegate() {
        let mut prefs: Box<dyn PreferenceService> = Box::new(MemoryPreferences::new());
        prefs.set("x", json!(1)).unwrap();
        assert_eq!(prefs.get("x").unwrap(), Some(json!(1)));

        let mut secure: Box<dyn SecureStorage> = Box::new(MemorySecureStorage::new());
        secure.save("k", "v").unwrap();
        assert_eq!(secure.retrieve("k").unwrap().as_deref(), Some("v"));
    }
}
