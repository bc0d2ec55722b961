//! Configuration for the search engine
//!
//! Loaded from TOML. Every table and field is optional, so an empty file
//! yields the defaults.
//!
//! ```toml
//! [report]
//! shape = "occurrence_summary"
//! fold_diacritics = true
//!
//! [counter]
//! path = "SearchsDone.txt"
//!
//! [matcher]
//! max_shrink_steps = 256
//! ```

use crate::counter::DEFAULT_COUNTER_FILE;
use crate::matcher::LineMatcher;
use crate::normalize::Normalizer;
use crate::report::ReportShape;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub counter: CounterConfig,
    #[serde(default)]
    pub matcher: MatcherConfig,
}

impl SearchConfig {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML is malformed
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_str(s: &str) -> anyhow::Result<Self> {
        toml::from_str(s).context("Failed to parse TOML configuration")
    }

    /// Engine options derived from this configuration
    pub fn options(&self) -> SearchOptions {
        SearchOptions {
            shape: self.report.shape,
            normalizer: Normalizer::new(self.report.fold_diacritics),
            matcher: LineMatcher::new(self.matcher.max_shrink_steps),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub shape: ReportShape,
    /// Ignore accents when matching ("acao" finds "Ação")
    #[serde(default)]
    pub fold_diacritics: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterConfig {
    #[serde(default = "default_counter_path")]
    pub path: PathBuf,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            path: default_counter_path(),
        }
    }
}

fn default_counter_path() -> PathBuf {
    PathBuf::from(DEFAULT_COUNTER_FILE)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Cap on occurrence-count shrink steps per line (default: line length)
    #[serde(default)]
    pub max_shrink_steps: Option<usize>,
}

/// Runtime knobs of a [`crate::SearchEngine`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchOptions {
    pub shape: ReportShape,
    pub normalizer: Normalizer,
    pub matcher: LineMatcher,
}

impl SearchOptions {
    pub fn with_shape(mut self, shape: ReportShape) -> Self {
        self.shape = shape;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = SearchConfig::from_str("").unwrap();
        assert_eq!(config, SearchConfig::default());
        assert_eq!(config.report.shape, ReportShape::LineDump);
        assert_eq!(config.counter.path, PathBuf::from("SearchsDone.txt"));
        assert_eq!(config.matcher.max_shrink_steps, None);
    }

    #[test]
    fn test_full_config() {
        let toml = r#"
            [report]
            shape = "occurrence_summary"
            fold_diacritics = true

            [counter]
            path = "/var/lib/textmining/count.txt"

            [matcher]
            max_shrink_steps = 64
        "#;
        let config = SearchConfig::from_str(toml).unwrap();
        assert_eq!(config.report.shape, ReportShape::OccurrenceSummary);
        assert!(config.report.fold_diacritics);
        assert_eq!(
            config.counter.path,
            PathBuf::from("/var/lib/textmining/count.txt")
        );

        let options = config.options();
        assert_eq!(options.shape, ReportShape::OccurrenceSummary);
        assert!(options.normalizer.fold_diacritics);
        assert_eq!(options.matcher.max_shrink_steps, Some(64));
    }

    #[test]
    fn test_unknown_shape_rejected() {
        let result = SearchConfig::from_str("[report]\nshape = \"pie\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("textmining.toml");
        fs::write(&path, "[report]\nshape = \"line_dump\"\n").unwrap();
        let config = SearchConfig::from_file(&path).unwrap();
        assert_eq!(config.report.shape, ReportShape::LineDump);

        assert!(SearchConfig::from_file(dir.path().join("missing.toml")).is_err());
    }
}
