//! Error types for visitlog.

use std::io;

/// Errors produced by the visitlog crates.
#[derive(Debug, thiserror::Error)]
pub enum VisitError {
    #[error("invalid history index {index} (history has {len} entries)")]
    InvalidIndex { index: usize, len: usize },

    /// Reserved. No operation raises this today: updating onto an existing
    /// URL overwrites it instead.
    #[error("URL already exists in history: {0}")]
    UrlAlreadyExists(String),

    #[error("backend error: {0}")]
    Backend(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VisitError {
    /// True for the out-of-range index error returned by delete/update.
    pub fn is_invalid_index(&self) -> bool {
        matches!(self, Self::InvalidIndex { .. })
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, VisitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_index_display() {
        let e = VisitError::InvalidIndex { index: 3, len: 1 };
        assert_eq!(
            format!("{e}"),
            "invalid history index 3 (history has 1 entries)"
        );
        assert!(e.is_invalid_index());
    }

    #[test]
    fn url_already_exists_display() {
        let e = VisitError::UrlAlreadyExists("https://a.com".into());
        assert_eq!(format!("{e}"), "URL already exists in history: https://a.com");
        assert!(!e.is_invalid_index());
    }

    #[test]
    fn backend_error_display() {
        let e = VisitError::Backend("write failed".into());
        assert_eq!(format!("{e}"), "backend error: write failed");
    }

    #[test]
    fn config_error_display() {
        let e = VisitError::Config("unknown storage".into());
        assert_eq!(format!("{e}"), "config error: unknown storage");
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "locked");
        let e: VisitError = io_err.into();
        let msg = format!("{e}");
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("locked"));
    }

    #[test]
    fn toml_error_from_conversion() {
        let toml_err = toml::from_str::<toml::Value>("storage = [[[").unwrap_err();
        let e: VisitError = toml_err.into();
        assert!(format!("{e}").contains("TOML parse error"));
    }

    #[test]
    fn json_error_from_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{nope").unwrap_err();
        let e: VisitError = json_err.into();
        assert!(format!("{e}").contains("JSON error"));
    }

    #[test]
    fn result_alias_err() {
        let r: Result<()> = Err(VisitError::InvalidIndex { index: 0, len: 0 });
        assert!(r.is_err());
    }
}
