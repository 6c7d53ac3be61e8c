//! The history record: a URL and how many times it was visited.

/// One URL in the visit history.
///
/// `visits` is always at least 1 for an entry held by a history store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub url: String,
    pub visits: u32,
}

impl HistoryEntry {
    /// A freshly visited URL.
    pub fn first_visit(url: &str) -> Self {
        Self {
            url: url.to_string(),
            visits: 1,
        }
    }
}

impl std::fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.url, self.visits)
    }
}
