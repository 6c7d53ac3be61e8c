//! Browser session: navigation controls plus visit history.

use visitlog_history::{Backend, HistoryStore};

use crate::nav::NavigationController;

/// One row of the history list: a URL and how often it was visited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    pub url: String,
    pub visits: u32,
}

impl std::fmt::Display for HistoryRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.url, self.visits)
    }
}

/// Navigation state for one web view plus the visit history it feeds.
///
/// Navigation calls return the URL the host's web view should load. A visit
/// is only recorded once the host reports the load finished through
/// [`BrowserSession::page_finished`].
pub struct BrowserSession<B: Backend> {
    nav: NavigationController,
    history: HistoryStore<B>,
}

impl<B: Backend> BrowserSession<B> {
    pub fn new(home_url: &str, history: HistoryStore<B>) -> Self {
        Self {
            nav: NavigationController::new(home_url),
            history,
        }
    }

    pub fn nav(&self) -> &NavigationController {
        &self.nav
    }

    pub fn history(&self) -> &HistoryStore<B> {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut HistoryStore<B> {
        &mut self.history
    }

    /// Start loading `url`.
    pub fn open(&mut self, url: &str) -> String {
        self.nav.navigate(url, "");
        url.to_string()
    }

    /// Start loading the URL of history row `index`, in list order. `None`
    /// when the index is past the end. The visit is recorded by the
    /// following [`Self::page_finished`], not here.
    pub fn open_row(&mut self, index: usize) -> Option<String> {
        let url = self.history.list_all().into_iter().nth(index)?;
        Some(self.open(&url))
    }

    pub fn back(&mut self) -> Option<String> {
        self.nav.go_back().map(|e| e.url)
    }

    pub fn forward(&mut self) -> Option<String> {
        self.nav.go_forward().map(|e| e.url)
    }

    pub fn home(&mut self) -> String {
        self.nav.go_home()
    }

    pub fn reload(&self) -> Option<String> {
        self.nav.reload()
    }

    /// The web view finished loading `url` (its final resolved address).
    /// Records the visit and returns the URL's visit count.
    pub fn page_finished(&mut self, url: &str, title: &str) -> u32 {
        if self.nav.current_url().is_none() {
            self.nav.navigate(url, title);
        } else {
            self.nav.update_url(url);
            if !title.is_empty() {
                self.nav.update_title(title);
            }
        }
        self.history.record_visit(url)
    }

    /// History rows in list order. With a filter, only rows whose URL
    /// contains it; row indices for [`Self::delete_row`] always refer to the
    /// unfiltered list.
    pub fn history_rows(&self, filter: Option<&str>) -> Vec<HistoryRow> {
        let keyword = filter.unwrap_or("");
        self.history
            .entries()
            .into_iter()
            .filter(|e| e.url.contains(keyword))
            .map(|e| HistoryRow {
                url: e.url,
                visits: e.visits,
            })
            .collect()
    }

    /// Most visited pages, highest count first.
    pub fn top_sites(&self, limit: usize) -> Vec<HistoryRow> {
        self.history
            .most_visited(limit)
            .into_iter()
            .map(|url| {
                let visits = self.history.visit_count(&url).unwrap_or(0);
                HistoryRow { url, visits }
            })
            .collect()
    }

    /// Delete the history row at `index`. An out-of-range index is logged
    /// and ignored. Returns whether a row was removed.
    pub fn delete_row(&mut self, index: usize) -> bool {
        match self.history.delete_at(index) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Error deleting history row: {e}");
                false
            },
        }
    }

    /// Point the history row at `index` at a different URL. Errors are
    /// logged and ignored. Returns whether the row changed.
    pub fn update_row(&mut self, index: usize, url: &str) -> bool {
        match self.history.update_at(index, url) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Error updating history row: {e}");
                false
            },
        }
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Generate HTML for the history page.
    pub fn history_page_html(&self) -> String {
        let mut html = String::from(
            "<html><head><title>History</title></head><body>\
             <h1>History</h1><ul>",
        );
        for row in self.history_rows(None) {
            let url = escape_html(&row.url);
            html.push_str(&format!(
                "<li><a href=\"{url}\">{url}</a> ({})</li>",
                row.visits
            ));
        }
        html.push_str("</ul></body></html>");
        html
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
