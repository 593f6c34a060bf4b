//! Config schema and deserialization

use crate::analyzer::Thresholds;
use serde::Deserialize;
use std::path::Path;

/// Root config structure for .learnboxrc.json
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Minimum passing score (exit 1 if below). Default: none
    #[serde(default)]
    pub threshold: Option<u8>,

    /// Analyzer cut-off overrides; unspecified fields keep their defaults
    #[serde(default)]
    pub thresholds: Thresholds,

    /// Glob patterns for files/directories to exclude when scanning
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Custom submission file suffixes (default: .json)
    #[serde(default)]
    pub file_patterns: Vec<String>,
}

impl Config {
    /// Merge CLI overrides into config. CLI values take precedence.
    pub fn merge_with_cli(mut self, cli_threshold: Option<u8>) -> Self {
        if cli_threshold.is_some() {
            self.threshold = cli_threshold;
        }
        self
    }

    /// Get submission file patterns
    pub fn get_file_patterns(&self) -> Vec<&str> {
        if self.file_patterns.is_empty() {
            vec![".json"]
        } else {
            self.file_patterns.iter().map(|s| s.as_str()).collect()
        }
    }

    /// Whether a path looks like a submission file. Config and history files
    /// never count, even though they are JSON.
    pub fn is_submission_file(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        if name == super::CONFIG_FILENAME || name == crate::history::HISTORY_FILENAME {
            return false;
        }
        if path
            .components()
            .any(|c| c.as_os_str() == "node_modules" || c.as_os_str() == ".git")
        {
            return false;
        }
        self.get_file_patterns().iter().any(|p| name.ends_with(p))
    }
}
