//! Extractive summarizer: picks the first few meaningful lines of a passage.

use once_cell::sync::Lazy;
use regex::Regex;
use sift_core::{Error, Result};
use tracing::warn;

/// Returned for blank input.
pub const NO_CONTENT: &str = "No content available";
/// Returned when summarization fails.
pub const SUMMARY_UNAVAILABLE: &str = "Summary unavailable";
/// Lines must be longer than this to count as meaningful.
pub const MEANINGFUL_LINE_MIN_CHARS: usize = 30;
/// Lines considered when no line is meaningful.
pub const FALLBACK_LINE_COUNT: usize = 5;
pub const ELLIPSIS: &str = "...";

static LINE_BREAKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\r\n]+").expect("static regex"));

/// Output bounds for a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryLimits {
    pub max_lines: usize,
    /// Counted in characters, ellipsis included.
    pub max_chars: usize,
}

impl Default for SummaryLimits {
    fn default() -> Self {
        Self {
            max_lines: 3,
            max_chars: 500,
        }
    }
}

/// Summarize, mapping any failure to [`SUMMARY_UNAVAILABLE`].
pub fn summarize(text: &str, limits: SummaryLimits) -> String {
    match try_summarize(text, limits) {
        Ok(summary) => summary,
        Err(e) => {
            warn!("Failed to summarize text: {}", e);
            SUMMARY_UNAVAILABLE.to_string()
        }
    }
}

/// Summarize, reporting failures to the caller.
pub fn try_summarize(text: &str, limits: SummaryLimits) -> Result<String> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(NO_CONTENT.to_string());
    }
    if limits.max_lines == 0 {
        return Err(Error::Summarization("max_lines must be at least 1".into()));
    }
    if limits.max_chars <= ELLIPSIS.len() {
        return Err(Error::Summarization(format!(
            "max_chars {} leaves no room for text",
            limits.max_chars
        )));
    }

    let lines: Vec<&str> = LINE_BREAKS
        .split(text)
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let meaningful: Vec<&str> = lines
        .iter()
        .copied()
        .filter(|l| l.chars().count() > MEANINGFUL_LINE_MIN_CHARS)
        .collect();
    let selected: Vec<&str> = if meaningful.is_empty() {
        lines.into_iter().take(FALLBACK_LINE_COUNT).collect()
    } else {
        meaningful
    };

    let summary = selected
        .into_iter()
        .take(limits.max_lines)
        .collect::<Vec<_>>()
        .join(" ");

    if summary.chars().count() > limits.max_chars {
        let mut cut: String = summary
            .chars()
            .take(limits.max_chars - ELLIPSIS.len())
            .collect();
        cut.push_str(ELLIPSIS);
        return Ok(cut);
    }
    Ok(summary)
}
