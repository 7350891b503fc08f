//! Print configuration.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TimetableError};

/// Options controlling tile and page generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintConfig {
    /// Emit a page for teachers without any tiles when printing all
    /// teachers. Single-teacher queries always produce a page.
    pub include_empty_pages: bool,
    /// Separator between class and group tag in group labels.
    pub group_separator: String,
    /// Order each teacher's tiles by (day, hour).
    pub sort_tiles: bool,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            include_empty_pages: false,
            group_separator: ".".to_string(),
            sort_tiles: true,
        }
    }
}

impl PrintConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from JSON. Missing fields take defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets whether empty pages are emitted.
    pub fn with_empty_pages(mut self, include: bool) -> Self {
        self.include_empty_pages = include;
        self
    }

    /// Sets the class/group separator. An empty separator is rejected
    /// with a warning and the current one kept.
    pub fn with_group_separator(mut self, separator: impl Into<String>) -> Self {
        let separator = separator.into();
        if separator.is_empty() {
            warn!("Ignoring empty group separator, keeping {:?}", self.group_separator);
        } else {
            self.group_separator = separator;
        }
        self
    }

    /// Sets whether tiles are ordered by slot.
    pub fn with_sorted_tiles(mut self, sort: bool) -> Self {
        self.sort_tiles = sort;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.group_separator.is_empty() {
            return Err(TimetableError::Config(
                "group_separator must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = PrintConfig::default();
        assert!(!c.include_empty_pages);
        assert_eq!(c.group_separator, ".");
        assert!(c.sort_tiles);
    }

    #[test]
    fn test_from_json_partial() {
        let c = PrintConfig::from_json(r#"{"include_empty_pages": true}"#).unwrap();
        assert!(c.include_empty_pages);
        assert_eq!(c.group_separator, ".");
    }

    #[test]
    fn test_from_json_rejects_empty_separator() {
        let err = PrintConfig::from_json(r#"{"group_separator": ""}"#).unwrap_err();
        assert!(matches!(err, TimetableError::Config(_)));
    }

    #[test]
    fn test_builder_keeps_separator_non_empty() {
        let c = PrintConfig::new().with_group_separator("");
        assert_eq!(c.group_separator, ".");
        let c = c.with_group_separator("-").with_group_separator("");
        assert_eq!(c.group_separator, "-");
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_from_json_malformed() {
        let err = PrintConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, TimetableError::Json(_)));
    }
}
