//! Platform service traits.

use visitlog_types::error::Result;

// ---------------------------------------------------------------------------
// Preferences
// ---------------------------------------------------------------------------

/// Key/value preferences, each value an arbitrary JSON document.
///
/// Mirrors what mobile platforms offer as "user defaults": a small flat
/// namespace persisted as a single file.
pub trait PreferenceService {
    /// Read the value under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<serde_json::Value>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: serde_json::Value) -> Result<()>;

    /// Drop `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Secure storage
// ---------------------------------------------------------------------------

/// Credential-style item store.
///
/// Supports save/lookup/delete of individual items by key. There is
/// no way to list keys; callers that need enumeration keep
/// their own key list elsewhere.
pub trait SecureStorage {
    /// Save `value` under `key`, replacing any existing item.
    fn save(&mut self, key: &str, value: &str) -> Result<()>;

    /// Look up the item stored under `key`.
    fn retrieve(&self, key: &str) -> Result<Option<String>>;

    /// Delete the item under `key`. Returns whether an item was removed.
    fn delete(&mut self, key: &str) -> Result<bool>;
}

impl<T: PreferenceService + ?Sized> PreferenceService for Box<T> {
    fn get(&self, key: &str) -> Result<Option<serde_json::Value>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: serde_json::Value) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

impl<T: SecureStorage + ?Sized> SecureStorage for Box<T> {
    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).save(key, value)
    }

    fn retrieve(&self, key: &str) -> Result<Option<String>> {
        (**self).retrieve(key)
    }

    fn delete(&mut self, key: &str) -> Result<bool> {
        (**self).delete(key)
    }
}
