//! The visit history store.

use visitlog_types::entry::HistoryEntry;
use visitlog_types::error::{Result, VisitError};

use crate::backend::Backend;
use crate::table::VisitTable;

/// Records visited URLs with visit counts on top of a [`Backend`].
///
/// Every call reads the current table from the backend and every mutation
/// writes it back before returning, so nothing is cached between calls.
/// Persistence is fire-and-forget: a failed backend write is logged and the
/// call still reports success. Only out-of-range indices are returned as
/// errors.
pub struct HistoryStore<B: Backend> {
    backend: B,
    verbose: bool,
}

impl<B: Backend> HistoryStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            verbose: true,
        }
    }

    /// Enable or disable the info-level line logged for each mutation.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Count a visit to `url` and return its visit count afterwards.
    pub fn record_visit(&mut self, url: &str) -> u32 {
        let mut table = self.load();
        let visits = table.increment(url);
        self.persist(&table);
        if self.verbose {
            if visits == 1 {
                log::info!("{} -> URL added to history: {url}", self.backend.name());
            } else {
                log::info!(
                    "{} -> URL updated in history: {url}, visits: {visits}",
                    self.backend.name()
                );
            }
        }
        visits
    }

    /// All recorded URLs in the backend's canonical order.
    pub fn list_all(&self) -> Vec<String> {
        self.load().urls()
    }

    /// All entries with their counts, in the same order as [`Self::list_all`].
    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.load().entries().to_vec()
    }

    /// URLs containing `keyword` (case-sensitive). An empty keyword matches
    /// everything.
    pub fn search(&self, keyword: &str) -> Vec<String> {
        self.load()
            .iter()
            .filter(|e| e.url.contains(keyword))
            .map(|e| e.url.clone())
            .collect()
    }

    /// Up to `limit` URLs, highest visit count first. Ties keep canonical
    /// order.
    pub fn most_visited(&self, limit: usize) -> Vec<String> {
        let table = self.load();
        let mut ranked: Vec<&HistoryEntry> = table.iter().collect();
        ranked.sort_by(|a, b| b.visits.cmp(&a.visits));
        ranked.into_iter().take(limit).map(|e| e.url.clone()).collect()
    }

    pub fn visit_count(&self, url: &str) -> Option<u32> {
        self.load().get(url)
    }

    pub fn len(&self) -> usize {
        self.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.load().is_empty()
    }

    /// Remove the URL at `index` in [`Self::list_all`] order.
    pub fn delete_at(&mut self, index: usize) -> Result<()> {
        let table = self.load();
        let Some(entry) = table.entries().get(index) else {
            return Err(VisitError::InvalidIndex {
                index,
                len: table.len(),
            });
        };
        if let Err(e) = self.backend.delete_one(&entry.url) {
            log::error!(
                "{} -> failed to delete {} from history: {e}",
                self.backend.name(),
                entry.url
            );
        }
        if self.verbose {
            log::info!(
                "{} -> URL deleted from history at index {index}: {}",
                self.backend.name(),
                entry.url
            );
        }
        Ok(())
    }

    /// Replace the URL at `index` with `new_url`, keeping its visit count.
    ///
    /// If `new_url` is already recorded elsewhere, that entry is overwritten
    /// by the carried-over count.
    pub fn update_at(&mut self, index: usize, new_url: &str) -> Result<()> {
        let mut table = self.load();
        let len = table.len();
        let old = table
            .rename_at(index, new_url)
            .ok_or(VisitError::InvalidIndex { index, len })?;
        self.persist(&table);
        if self.verbose {
            log::info!(
                "{} -> URL updated from {} to {new_url}",
                self.backend.name(),
                old.url
            );
        }
        Ok(())
    }

    /// Forget every recorded URL.
    pub fn clear(&mut self) {
        if let Err(e) = self.backend.clear() {
            log::error!("{} -> failed to clear history: {e}", self.backend.name());
        }
        if self.verbose {
            log::info!("{} -> all history cleared", self.backend.name());
        }
    }

    fn load(&self) -> VisitTable {
        match self.backend.load_all() {
            Ok(table) => table,
            Err(e) => {
                log::warn!(
                    "{} -> could not read history, treating as empty: {e}",
                    self.backend.name()
                );
                VisitTable::new()
            },
        }
    }

    fn persist(&mut self, table: &VisitTable) {
        if let Err(e) = self.backend.save_all(table) {
            log::error!("{} -> failed to save history: {e}", self.backend.name());
        }
    }
}

impl<B: Backend + Default> Default for HistoryStore<B> {
    fn default() -> Self {
        Self::new(B::default())
    }
}
