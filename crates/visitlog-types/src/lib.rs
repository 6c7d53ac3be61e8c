//! Foundation types for visitlog.
//!
//! This crate holds the types shared by every visitlog crate: the history
//! entry record, history configuration, and the error type.

pub mod config;
pub mod entry;
pub mod error;
