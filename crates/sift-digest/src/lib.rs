//! Sift Digest — extractive summaries and the JSON digest report.

pub mod report;
pub mod summarizer;

pub use report::{
    write_report, DigestMetadata, DigestReport, ExtractedSection, SummaryRecord,
    UNTITLED_SECTION,
};
pub use summarizer::{summarize, try_summarize, SummaryLimits, NO_CONTENT, SUMMARY_UNAVAILABLE};
