//! Visit history for the visitlog browser.
//!
//! [`HistoryStore`] records visited URLs with visit counts and answers
//! list/search/most-visited queries. Where the data lives is decided by the
//! [`Backend`] it is built with:
//!
//! - [`MemoryBackend`]: process-lifetime table, insertion order.
//! - [`PreferenceBackend`]: one JSON blob in a preferences store,
//!   lexicographic order.
//! - [`SecureBackend`]: one secure item per URL plus a key list kept in
//!   preferences, insertion order.
//!
//! Integer indices passed to [`HistoryStore::delete_at`] and
//! [`HistoryStore::update_at`] always refer to positions in the list
//! [`HistoryStore::list_all`] returns for the same backend.

mod backend;
mod preferences;
mod secure;
mod store;
mod table;

use visitlog_platform::{FilePreferences, FileSecureStorage};
use visitlog_types::config::{HistoryConfig, StorageKind};
use visitlog_types::error::Result;

pub use backend::{Backend, MemoryBackend};
pub use preferences::PreferenceBackend;
pub use secure::SecureBackend;
pub use store::HistoryStore;
pub use table::VisitTable;
pub use visitlog_types::entry::HistoryEntry;

/// Build a history store for the storage kind named in `config`.
///
/// File-backed kinds open (or create) their files under the configured
/// paths. Each kind keeps its own copy of the history; switching kinds does
/// not migrate entries.
pub fn open_store(config: &HistoryConfig) -> Result<HistoryStore<Box<dyn Backend>>> {
    let backend: Box<dyn Backend> = match config.storage {
        StorageKind::Memory => Box::new(MemoryBackend::new()),
        StorageKind::Preferences => Box::new(PreferenceBackend::new(
            FilePreferences::open(&config.preferences_path)?,
            &config.history_key,
        )),
        StorageKind::Secure => Box::new(SecureBackend::new(
            FileSecureStorage::open(&config.secure_dir)?,
            FilePreferences::open(&config.preferences_path)?,
            &config.key_index_key,
        )),
    };
    log::info!("History store using {} backend", backend.name());
    Ok(HistoryStore::new(backend).with_verbose(config.verbose))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_in(dir: &std::path::Path, storage: StorageKind) -> HistoryConfig {
        HistoryConfig {
            storage,
            preferences_path: dir.join("prefs.json"),
            secure_dir: dir.join("secure"),
            verbose: false,
            ..HistoryConfig::default()
        }
    }

    #[test]
    fn memory_store_from_default_config() {
        let mut store = open_store(&HistoryConfig::default()).unwrap();
        assert_eq!(store.backend_name(), "memory");
        store.record_visit("https://example.com");
        assert_eq!(store.visit_count("https://example.com"), Some(1));
    }

    #[test]
    fn preferences_store_persists_between_opens() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config_in(dir.path(), StorageKind::Preferences);
        {
            let mut store = open_store(&cfg).unwrap();
            assert_eq!(store.backend_name(), "preferences");
            store.record_visit("https://b.com");
            store.record_visit("https://a.com");
            store.record_visit("https://b.com");
        }
        let store = open_store(&cfg).unwrap();
        assert_eq!(store.list_all(), vec!["https://a.com", "https://b.com"]);
        assert_eq!(store.visit_count("https://b.com"), Some(2));
    }

    #[test]
    fn secure_store_persists_between_opens() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config_in(dir.path(), StorageKind::Secure);
        {
            let mut store = open_store(&cfg).unwrap();
            assert_eq!(store.backend_name(), "secure");
            store.record_visit("https://z.com");
            store.record_visit("https://a.com");
        }
        let store = open_store(&cfg).unwrap();
        assert_eq!(store.list_all(), vec!["https://z.com", "https://a.com"]);
    }

    #[test]
    fn secure_store_counts_long_urls() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config_in(dir.path(), StorageKind::Secure);
        let url = format!("https://www.google.com/search?q={}", "a".repeat(200));
        let mut store = open_store(&cfg).unwrap();
        assert_eq!(store.record_visit(&url), 1);
        assert_eq!(store.record_visit(&url), 2);
        assert_eq!(store.list_all(), vec![url.clone()]);

        let reopened = open_store(&cfg).unwrap();
        assert_eq!(reopened.visit_count(&url), Some(2));
    }

    #[test]
    fn secure_store_survives_a_corrupt_item() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config_in(dir.path(), StorageKind::Secure);
        {
            let mut store = open_store(&cfg).unwrap();
            store.record_visit("https://a.com");
            store.record_visit("https://b.com");
            store.record_visit("https://c.com");
        }
        let items = FileSecureStorage::open(&cfg.secure_dir).unwrap();
        std::fs::write(items.item_path("https://b.com"), [0xff, 0xfe]).unwrap();

        let mut store = open_store(&cfg).unwrap();
        assert_eq!(store.list_all(), vec!["https://a.com", "https://c.com"]);
        store.record_visit("https://d.com");
        assert_eq!(
            store.list_all(),
            vec!["https://a.com", "https://c.com", "https://d.com"]
        );
        assert_eq!(store.visit_count("https://a.com"), Some(1));
        assert!(items.item_path("https://b.com").exists());
    }

    #[test]
    fn backends_do_not_share_data() {
        let dir = tempfile::tempdir().unwrap();
        let mut prefs = open_store(&config_in(dir.path(), StorageKind::Preferences)).unwrap();
        prefs.record_visit("https://only-in-prefs.com");
        let secure = open_store(&config_in(dir.path(), StorageKind::Secure)).unwrap();
        assert!(secure.is_empty());
    }
}
