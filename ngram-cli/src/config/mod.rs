//! Configuration module
//!
//! Defaults for the `count` command can be kept in a TOML file:
//!
//! ```toml
//! [count]
//! min_order = 1
//! max_order = 3
//! whitespace = true
//! layout = "tree"
//! separator = "\\t"
//! ```
//!
//! Command-line flags override values from the file.

use crate::error::CliError;
use anyhow::{Context, Result};
use ngram_core::Layout;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct CliConfig {
    /// Defaults for the count command
    #[serde(default)]
    pub count: CountConfig,
}

/// Count command defaults; every field is optional
#[derive(Debug, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CountConfig {
    /// Shortest n-gram printed with a count
    pub min_order: Option<usize>,

    /// Longest n-gram recorded and printed
    pub max_order: Option<usize>,

    /// Escaped delimiter bytes
    pub delimiters: Option<String>,

    /// Split on ASCII whitespace
    pub whitespace: Option<bool>,

    /// Fixed token width in bytes
    pub chunk_width: Option<usize>,

    /// Output layout
    pub layout: Option<Layout>,

    /// Emit n-grams as one unquoted run
    pub merge: Option<bool>,

    /// Escaped separator byte
    pub separator: Option<String>,

    /// Lower ASCII letters before counting
    pub fold_case: Option<bool>,

    /// Skip windows shorter than the maximum order
    pub full_windows_only: Option<bool>,
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let config = toml::from_str(content).map_err(|e| CliError::ConfigError(e.to_string()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config() {
        let config = CliConfig::parse("").unwrap();
        assert_eq!(config.count, CountConfig::default());
    }

    #[test]
    fn test_full_config() {
        let config = CliConfig::parse(
            r#"
            [count]
            min_order = 2
            max_order = 4
            delimiters = ",;"
            layout = "tree"
            merge = true
            separator = "\\t"
            fold_case = true
            full_windows_only = false
            "#,
        )
        .unwrap();

        assert_eq!(config.count.min_order, Some(2));
        assert_eq!(config.count.max_order, Some(4));
        assert_eq!(config.count.delimiters.as_deref(), Some(",;"));
        assert_eq!(config.count.layout, Some(Layout::Tree));
        assert_eq!(config.count.merge, Some(true));
        assert_eq!(config.count.separator.as_deref(), Some("\\t"));
        assert_eq!(config.count.fold_case, Some(true));
        assert_eq!(config.count.full_windows_only, Some(false));
        assert_eq!(config.count.chunk_width, None);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = CliConfig::parse("[count]\nlanguage = \"english\"\n").unwrap_err();
        assert!(err.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_invalid_layout_rejected() {
        assert!(CliConfig::parse("[count]\nlayout = \"sideways\"\n").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[count]\nchunk_width = 2").unwrap();

        let config = CliConfig::load(file.path()).unwrap();
        assert_eq!(config.count.chunk_width, Some(2));
    }

    #[test]
    fn test_load_missing_file() {
        let err = CliConfig::load(Path::new("/nonexistent/ngram.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
