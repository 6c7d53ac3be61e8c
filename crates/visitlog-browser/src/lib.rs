//! Headless browser chrome model for visitlog.
//!
//! The web view itself belongs to the host. This crate models what sits
//! around it: the back/forward/refresh/home controls
//! ([`NavigationController`]) and the wiring that turns finished page loads
//! into visit history and history rows for display ([`BrowserSession`]).

pub mod nav;
pub mod session;

pub use nav::{NavigationController, PageEntry};
pub use session::{BrowserSession, HistoryRow};
