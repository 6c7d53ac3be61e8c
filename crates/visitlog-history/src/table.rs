//! Ordered URL -> visit count table.

use visitlog_types::entry::HistoryEntry;

/// The working view of a history: unique URLs, each with a visit count,
/// held in the owning backend's canonical order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitTable {
    entries: Vec<HistoryEntry>,
}

impl VisitTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.entries.iter()
    }

    /// URLs in table order.
    pub fn urls(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.url.clone()).collect()
    }

    pub fn position(&self, url: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.url == url)
    }

    /// Visit count for `url`, if recorded.
    pub fn get(&self, url: &str) -> Option<u32> {
        self.entries.iter().find(|e| e.url == url).map(|e| e.visits)
    }

    /// Set the count for `url`, keeping its position if already present and
    /// appending otherwise. A zero count is ignored.
    pub fn insert(&mut self, url: &str, visits: u32) {
        if visits == 0 {
            return;
        }
        match self.position(url) {
            Some(i) => self.entries[i].visits = visits,
            None => self.entries.push(HistoryEntry {
                url: url.to_string(),
                visits,
            }),
        }
    }

    /// Count one more visit to `url` and return the new count.
    pub fn increment(&mut self, url: &str) -> u32 {
        match self.position(url) {
            Some(i) => {
                let entry = &mut self.entries[i];
                entry.visits = entry.visits.saturating_add(1);
                entry.visits
            },
            None => {
                self.entries.push(HistoryEntry::first_visit(url));
                1
            },
        }
    }

    /// Remove `url`, returning its count.
    pub fn remove(&mut self, url: &str) -> Option<u32> {
        let i = self.position(url)?;
        Some(self.entries.remove(i).visits)
    }

    pub fn remove_at(&mut self, index: usize) -> Option<HistoryEntry> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    /// Replace the URL at `index` with `new_url`, carrying its count over.
    ///
    /// Any other entry already holding `new_url` is dropped, so its count is
    /// replaced rather than merged. The renamed entry counts as a fresh
    /// insertion and moves to the end. Returns the entry that was at `index`.
    pub fn rename_at(&mut self, index: usize, new_url: &str) -> Option<HistoryEntry> {
        let old = self.remove_at(index)?;
        self.entries.retain(|e| e.url != new_url);
        self.entries.push(HistoryEntry {
            url: new_url.to_string(),
            visits: old.visits,
        });
        Some(old)
    }

    /// Reorder entries lexicographically by URL.
    pub fn sort_by_url(&mut self) {
        self.entries.sort_by(|a, b| a.url.cmp(&b.url));
    }
}

impl FromIterator<(String, u32)> for VisitTable {
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (url, visits) in iter {
            table.insert(&url, visits);
        }
        table
    }
}

impl<'a> IntoIterator for &'a VisitTable {
    type Item = &'a HistoryEntry;
    type IntoIter = std::slice::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(pairs: &[(&str, u32)]) -> VisitTable {
        pairs.iter().map(|(u, v)| (u.to_string(), *v)).collect()
    }

    #[test]
    fn increment_inserts_then_counts() {
        let mut t = VisitTable::new();
        assert_eq!(t.increment("https://a.com"), 1);
        assert_eq!(t.increment("https://a.com"), 2);
        assert_eq!(t.len(), 1);
        assert_eq!(t.get("https://a.com"), Some(2));
    }

    #[test]
    fn insertion_order_is_kept() {
        let mut t = VisitTable::new();
        t.increment("https://z.com");
        t.increment("https://a.com");
        t.increment("https://z.com");
        assert_eq!(t.urls(), vec!["https://z.com", "https://a.com"]);
    }

    #[test]
    fn zero_count_is_never_stored() {
        let mut t = VisitTable::new();
        t.insert("https://a.com", 0);
        assert!(t.is_empty());
    }

    #[test]
    fn from_iter_collapses_duplicates() {
        let t = table(&[("https://a.com", 1), ("https://b.com", 2), ("https://a.com", 5)]);
        assert_eq!(t.urls(), vec!["https://a.com", "https://b.com"]);
        assert_eq!(t.get("https://a.com"), Some(5));
    }

    #[test]
    fn remove_at_out_of_range_is_none() {
        let mut t = table(&[("https://a.com", 1)]);
        assert!(t.remove_at(1).is_none());
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn rename_keeps_count_and_moves_to_end() {
        let mut t = table(&[("https://a.com", 3), ("https://b.com", 1)]);
        let old = t.rename_at(0, "https://c.com").unwrap();
        assert_eq!(old.url, "https://a.com");
        assert_eq!(t.urls(), vec!["https://b.com", "https://c.com"]);
        assert_eq!(t.get("https://c.com"), Some(3));
        assert_eq!(t.get("https://a.com"), None);
    }

    #[test]
    fn rename_onto_existing_url_overwrites() {
        let mut t = table(&[("https://a.com", 3), ("https://b.com", 7)]);
        t.rename_at(0, "https://b.com").unwrap();
        assert_eq!(t.len(), 1);
        assert_eq!(t.get("https://b.com"), Some(3));
    }

    #[test]
    fn rename_to_same_url_keeps_count() {
        let mut t = table(&[("https://a.com", 4)]);
        t.rename_at(0, "https://a.com").unwrap();
        assert_eq!(t.get("https://a.com"), Some(4));
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn sort_by_url_is_lexicographic() {
        let mut t = table(&[("https://b.com", 1), ("http://z.com", 1), ("https://a.com", 1)]);
        t.sort_by_url();
        assert_eq!(t.urls(), vec!["http://z.com", "https://a.com", "https://b.com"]);
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        fn arb_url() -> impl Strategy<Value = String> {
            "[a-c]{1,2}".prop_map(|s| format!("https://{s}.com"))
        }

        proptest! {
            #[test]
            fn counts_match_number_of_increments(urls in proptest::collection::vec(arb_url(), 0..40)) {
                let mut t = VisitTable::new();
                for url in &urls {
                    t.increment(url);
                }
                for entry in t.iter() {
                    let expected = urls.iter().filter(|u| **u == entry.url).count() as u32;
                    prop_assert_eq!(entry.visits, expected);
                }
                let mut unique = urls.clone();
                unique.sort();
                unique.dedup();
                prop_assert_eq!(t.len(), unique.len());
            }

            #[test]
            fn rename_preserves_total_uniqueness(
                urls in proptest::collection::vec(arb_url(), 1..20),
                target in arb_url(),
                pick in any::<proptest::sample::Index>(),
            ) {
                let mut t = VisitTable::new();
                for url in &urls {
                    t.increment(url);
                }
                let i = pick.index(t.len());
                let moved = t.entries()[i].visits;
                t.rename_at(i, &target).unwrap();
                prop_assert_eq!(t.get(&target), Some(moved));
                let mut seen = t.urls();
                seen.sort();
                let before = seen.len();
                seen.dedup();
                prop_assert_eq!(before, seen.len());
            }
        }
    }
}
