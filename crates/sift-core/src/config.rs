//! Run configuration: pipeline limits and input/output locations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};

pub const DEFAULT_MAX_PAGES_PER_DOCUMENT: usize = 10;
pub const DEFAULT_MAX_TOTAL_PASSAGES: usize = 1000;
pub const DEFAULT_TOP_K: usize = 10;
pub const DEFAULT_SUMMARY_MAX_LINES: usize = 3;
pub const DEFAULT_SUMMARY_MAX_CHARS: usize = 500;
pub const DEFAULT_INPUT_DIR: &str = "input";
pub const DEFAULT_OUTPUT_PATH: &str = "output/results.json";

/// Top-level configuration for one digest run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestConfig {
    /// Pages read from each document, counted from the first page.
    #[serde(default = "default_max_pages")]
    pub max_pages_per_document: usize,
    /// Passages kept (in acquisition order) before scoring.
    #[serde(default = "default_max_passages")]
    pub max_total_passages: usize,
    /// Ranked passages that get summarized and reported.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default = "default_summary_lines")]
    pub summary_max_lines: usize,
    #[serde(default = "default_summary_chars")]
    pub summary_max_chars: usize,
    /// Directory scanned for input documents.
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,
    /// Where the JSON report is written.
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
}

fn default_max_pages() -> usize {
    DEFAULT_MAX_PAGES_PER_DOCUMENT
}
fn default_max_passages() -> usize {
    DEFAULT_MAX_TOTAL_PASSAGES
}
fn default_top_k() -> usize {
    DEFAULT_TOP_K
}
fn default_summary_lines() -> usize {
    DEFAULT_SUMMARY_MAX_LINES
}
fn default_summary_chars() -> usize {
    DEFAULT_SUMMARY_MAX_CHARS
}
fn default_input_dir() -> PathBuf {
    PathBuf::from(DEFAULT_INPUT_DIR)
}
fn default_output_path() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_PATH)
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            max_pages_per_document: DEFAULT_MAX_PAGES_PER_DOCUMENT,
            max_total_passages: DEFAULT_MAX_TOTAL_PASSAGES,
            top_k: DEFAULT_TOP_K,
            summary_max_lines: DEFAULT_SUMMARY_MAX_LINES,
            summary_max_chars: DEFAULT_SUMMARY_MAX_CHARS,
            input_dir: default_input_dir(),
            output_path: default_output_path(),
        }
    }
}

impl DigestConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup (env-var names).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let usize_var = |key: &str, default: usize| -> usize {
            match lookup(key) {
                Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                    warn!("Ignoring invalid {}={:?}, using {}", key, raw, default);
                    default
                }),
                None => default,
            }
        };

        Self {
            max_pages_per_document: usize_var("SIFT_MAX_PAGES", DEFAULT_MAX_PAGES_PER_DOCUMENT),
            max_total_passages: usize_var("SIFT_MAX_PASSAGES", DEFAULT_MAX_TOTAL_PASSAGES),
            top_k: usize_var("SIFT_TOP_K", DEFAULT_TOP_K),
            summary_max_lines: usize_var("SIFT_SUMMARY_LINES", DEFAULT_SUMMARY_MAX_LINES),
            summary_max_chars: usize_var("SIFT_SUMMARY_CHARS", DEFAULT_SUMMARY_MAX_CHARS),
            input_dir: lookup("SIFT_INPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(default_input_dir),
            output_path: lookup("SIFT_OUTPUT_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(default_output_path),
        }
    }

    /// Reject limits that would make a run meaningless.
    pub fn validate(&self) -> Result<()> {
        let limits = [
            ("max_pages_per_document", self.max_pages_per_document),
            ("max_total_passages", self.max_total_passages),
            ("top_k", self.top_k),
            ("summary_max_lines", self.summary_max_lines),
        ];
        for (name, value) in limits {
            if value == 0 {
                return Err(Error::Config(format!("{} must be at least 1", name)));
            }
        }
        // Room for at least one character plus the ellipsis.
        if self.summary_max_chars < 4 {
            return Err(Error::Config(format!(
                "summary_max_chars must be at least 4, got {}",
                self.summary_max_chars
            )));
        }
        Ok(())
    }
}
