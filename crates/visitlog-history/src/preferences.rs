//! History kept as one blob in a preferences store.
//!
//! Layout under the history key is an array of single-entry objects:
//!
//! ```json
//! [{"https://a.com": 2}, {"https://b.com": 1}]
//! ```
//!
//! Entries come back sorted by URL.

use std::collections::BTreeMap;

use visitlog_platform::PreferenceService;
use visitlog_types::error::Result;

use crate::backend::Backend;
use crate::table::VisitTable;

/// History persisted through a [`PreferenceService`]. Lexicographic order.
#[derive(Debug)]
pub struct PreferenceBackend<P> {
    prefs: P,
    key: String,
}

impl<P: PreferenceService> PreferenceBackend<P> {
    pub fn new(prefs: P, key: &str) -> Self {
        Self {
            prefs,
            key: key.to_string(),
        }
    }

    pub fn preferences(&self) -> &P {
        &self.prefs
    }
}

impl<P: PreferenceService> Backend for PreferenceBackend<P> {
    fn name(&self) -> &'static str {
        "preferences"
    }

    fn load_all(&self) -> Result<VisitTable> {
        let Some(value) = self.prefs.get(&self.key)? else {
            return Ok(VisitTable::new());
        };
        let rows: Vec<BTreeMap<String, u32>> = serde_json::from_value(value)?;
        let mut table: VisitTable = rows.into_iter().flatten().collect();
        table.sort_by_url();
        Ok(table)
    }

    fn save_all(&mut self, table: &VisitTable) -> Result<()> {
        let mut sorted = table.clone();
        sorted.sort_by_url();
        let rows: Vec<serde_json::Value> = sorted
            .iter()
            .map(|e| {
                let mut row = serde_json::Map::new();
                row.insert(e.url.clone(), e.visits.into());
                serde_json::Value::Object(row)
            })
            .collect();
        self.prefs.set(&self.key, serde_json::Value::Array(rows))
    }

    fn delete_one(&mut self, url: &str) -> Result<()> {
        let mut table = self.load_all()?;
        if table.remove(url).is_some() {
            self.save_all(&table)?;
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.prefs.remove(&self.key)
    }
}
