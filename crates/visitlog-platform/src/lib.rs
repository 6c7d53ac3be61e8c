//! Platform storage services for visitlog.
//!
//! The history backends never touch the filesystem directly. They go through
//! two capabilities a host platform provides: a preferences store (small
//! JSON values under string keys) and a secure item store (point lookup by
//! key, no enumeration). Desktop builds get file-backed implementations;
//! tests and ephemeral sessions use the in-memory ones.

mod file;
mod memory;
pub mod services;

pub use file::{FilePreferences, FileSecureStorage};
pub use memory::{MemoryPreferences, MemorySecureStorage};
pub use services::{PreferenceService, SecureStorage};
