//! The storage strategy behind a history store.

use visitlog_types::error::Result;

use crate::table::VisitTable;

/// Where a [`HistoryStore`](crate::HistoryStore) keeps its table.
///
/// `load_all` returns entries in the backend's canonical order; the store
/// resolves indices against exactly that order. Implementations must not
/// hand back entries with a zero count.
pub trait Backend {
    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    /// Read the whole history.
    fn load_all(&self) -> Result<VisitTable>;

    /// Replace the whole history with `table`.
    fn save_all(&mut self, table: &VisitTable) -> Result<()>;

    /// Remove a single URL. Removing an absent URL is not an error.
    fn delete_one(&mut self, url: &str) -> Result<()>;

    /// Remove everything.
    fn clear(&mut self) -> Result<()> {
        self.save_all(&VisitTable::new())
    }
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn load_all(&self) -> Result<VisitTable> {
        (**self).load_all()
    }

    fn save_all(&mut self, table: &VisitTable) -> Result<()> {
        (**self).save_all(table)
    }

    fn delete_one(&mut self, url: &str) -> Result<()> {
        (**self).delete_one(url)
    }

    fn clear(&mut self) -> Result<()> {
        (**self).clear()
    }
}

/// History that lives only as long as the process. Insertion order.
#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    table: VisitTable,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Backend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn load_all(&self) -> Result<VisitTable> {
        Ok(self.table.clone())
    }

    fn save_all(&mut self, table: &VisitTable) -> Result<()> {
        self.table = table.clone();
        Ok(())
    }

    fn delete_one(&mut self, url: &str) -> Result<()> {
        self.table.remove(url);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let backend = MemoryBackend::new();
        assert!(backend.load_all().unwrap().is_empty());
    }

    #[test]
    fn save_then_load() {
        let mut backend = MemoryBackend::new();
        let mut table = VisitTable::new();
        table.increment("https://a.com");
        table.increment("https://b.com");
        backend.save_all(&table).unwrap();
        assert_eq!(backend.load_all().unwrap(), table);
    }

    #[test]
    fn delete_one_and_clear() {
        let mut backend = MemoryBackend::new();
        let table: VisitTable = [("https://a.com".to_string(), 2), ("https://b.com".to_string(), 1)]
            .into_iter()
            .collect();
        backend.save_all(&table).unwrap();

        backend.delete_one("https://a.com").unwrap();
        assert_eq!(backend.load_all().unwrap().urls(), vec!["https://b.com"]);

        backend.delete_one("https://missing.com").unwrap();
        backend.clear().unwrap();
        assert!(backend.load_all().unwrap().is_empty());
    }

    #[test]
    fn boxed_backend_delegates() {
        let mut backend: Box<dyn Backend> = Box::new(MemoryBackend::new());
        assert_eq!(backend.name(), "memory");
        let mut table = VisitTable::new();
        table.increment("https://a.com");
        backend.save_all(&table).unwrap();
        assert_eq!(backend.load_all().unwrap().len(), 1);
    }
}
