//! Runtime types.

use serde::Serialize;
use sift_digest::DigestReport;

/// Counters describing one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStats {
    /// Passages handed to the pipeline.
    pub passages_loaded: usize,
    /// Passages dropped by the `max_total_passages` cap.
    pub passages_capped: usize,
    pub passages_ranked: usize,
    pub sections_reported: usize,
    /// Degraded-score warnings raised while scoring.
    pub warnings: Vec<String>,
    pub duration_ms: u64,
}

/// Report plus the statistics of the run that produced it.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub report: DigestReport,
    pub stats: RunStats,
}
