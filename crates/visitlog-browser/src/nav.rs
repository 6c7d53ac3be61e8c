//! Per-view page navigation with back and forward stacks.

/// A page in the navigation stacks.
#[derive(Debug, Clone, PartialEq)]
pub struct PageEntry {
    pub url: String,
    pub title: String,
    pub scroll_y: i32,
}

impl PageEntry {
    fn new(url: &str, title: &str) -> Self {
        Self {
            url: url.to_string(),
            title: title.to_string(),
            scroll_y: 0,
        }
    }
}

/// Back/forward navigation state for a single web view.
#[derive(Debug)]
pub struct NavigationController {
    back_stack: Vec<PageEntry>,
    forward_stack: Vec<PageEntry>,
    current: Option<PageEntry>,
    home_url: String,
}

impl NavigationController {
    pub fn new(home_url: &str) -> Self {
        Self {
            back_stack: Vec::new(),
            forward_stack: Vec::new(),
            current: None,
            home_url: home_url.to_string(),
        }
    }

    /// Show `url` as a new page. The page being left joins the back stack
    /// and anything ahead of it is forgotten.
    pub fn navigate(&mut self, url: &str, title: &str) {
        if let Some(leaving) = self.current.replace(PageEntry::new(url, title)) {
            self.back_stack.push(leaving);
        }
        self.forward_stack.clear();
    }

    /// Step one page back. `None` at the start of the session.
    pub fn go_back(&mut self) -> Option<PageEntry> {
        Self::step(&mut self.back_stack, &mut self.forward_stack, &mut self.current)
    }

    /// Step one page forward. `None` when nothing was stepped back from.
    pub fn go_forward(&mut self) -> Option<PageEntry> {
        Self::step(&mut self.forward_stack, &mut self.back_stack, &mut self.current)
    }

    /// Pop `from` into the current slot, parking the old page on `to`.
    fn step(
        from: &mut Vec<PageEntry>,
        to: &mut Vec<PageEntry>,
        current: &mut Option<PageEntry>,
    ) -> Option<PageEntry> {
        let target = from.pop()?;
        if let Some(leaving) = current.replace(target.clone()) {
            to.push(leaving);
        }
        Some(target)
    }

    /// Start a new page at the home URL and return it.
    pub fn go_home(&mut self) -> String {
        let url = self.home_url.clone();
        self.navigate(&url, "");
        url
    }

    /// URL to reload, if a page is showing. The stacks are untouched.
    pub fn reload(&self) -> Option<String> {
        self.current.as_ref().map(|e| e.url.clone())
    }

    pub fn current_url(&self) -> Option<&str> {
        self.current.as_ref().map(|e| e.url.as_str())
    }

    pub fn current_title(&self) -> Option<&str> {
        self.current.as_ref().map(|e| e.title.as_str())
    }

    /// Replace the current page's URL with the address it finally resolved
    /// to (after redirects).
    pub fn update_url(&mut self, url: &str) {
        if let Some(entry) = self.current.as_mut() {
            entry.url = url.to_string();
        }
    }

    /// Title reported by the web view once the page is loaded.
    pub fn update_title(&mut self, title: &str) {
        if let Some(entry) = self.current.as_mut() {
            entry.title = title.to_string();
        }
    }

    /// Scroll offset of the current page, kept with it on the stacks.
    pub fn update_scroll(&mut self, scroll_y: i32) {
        if let Some(entry) = self.current.as_mut() {
            entry.scroll_y = scroll_y;
        }
    }

    pub fn can_go_back(&self) -> bool {
        !self.back_stack.is_empty()
    }

    pub fn can_go_forward(&self) -> bool {
        !self.forward_stack.is_empty()
    }

    pub fn set_home(&mut self, url: &str) {
        self.home_url = url.to_string();
    }

    pub fn home_url(&self) -> &str {
        &self.home_url
    }
}
