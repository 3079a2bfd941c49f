//! Orchestrator — runs one digest pass over a fixed document set.

use sift_core::{DigestConfig, Error, Passage, Query, Result};
use sift_digest::{summarize, DigestReport, ExtractedSection, SummaryLimits, SummaryRecord};
use sift_rank::{rank_sections, RelevanceScorer};
use tracing::{debug, info};

use crate::types::*;

/// Batch pipeline driven by a [`DigestConfig`].
pub struct DigestPipeline {
    config: DigestConfig,
}

impl DigestPipeline {
    /// Create a pipeline, rejecting unusable limits.
    pub fn new(config: DigestConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DigestConfig {
        &self.config
    }

    fn summary_limits(&self) -> SummaryLimits {
        SummaryLimits {
            max_lines: self.config.summary_max_lines,
            max_chars: self.config.summary_max_chars,
        }
    }

    /// Discover and read documents from `input_dir`, then run.
    ///
    /// Fails when the directory is missing or holds no supported documents.
    pub fn run_from_dir(&self, query: &Query) -> Result<RunOutput> {
        let dir = &self.config.input_dir;
        info!("Looking for documents in: {}", dir.display());

        let documents = sift_ingest::discover_documents(dir)?;
        if documents.is_empty() {
            return Err(Error::Ingest(format!(
                "no supported documents found in '{}'",
                dir.display()
            )));
        }
        info!("Found {} documents: {:?}", documents.len(), documents);

        let passages = sift_ingest::extract_passages(
            dir,
            &documents,
            self.config.max_pages_per_document,
        );
        Ok(self.run(query, documents, passages))
    }

    /// Score, rank and summarize already-acquired passages.
    ///
    /// Never fails: zero usable passages produce an empty report.
    pub fn run(&self, query: &Query, documents: Vec<String>, mut passages: Vec<Passage>) -> RunOutput {
        let start = std::time::Instant::now();
        let mut stats = RunStats {
            passages_loaded: passages.len(),
            ..RunStats::default()
        };

        info!("Starting pipeline for persona: {}", query.persona);
        info!("Job to be done: {}", query.job_to_be_done);

        if passages.len() > self.config.max_total_passages {
            stats.passages_capped = passages.len() - self.config.max_total_passages;
            passages.truncate(self.config.max_total_passages);
        }
        debug!(
            "Passages: {} loaded, {} dropped by cap",
            stats.passages_loaded, stats.passages_capped
        );

        // One model per run; dropped with the scorer at the end of this call.
        let mut scorer = RelevanceScorer::new();
        let ranking = rank_sections(&passages, &mut scorer, query);
        stats.passages_ranked = ranking.passages.len();
        stats.warnings = ranking.warnings.iter().map(|w| w.to_string()).collect();

        let mut report = DigestReport::new(query, documents);
        let limits = self.summary_limits();
        for scored in ranking.passages.iter().take(self.config.top_k) {
            let passage = scored.passage;
            report.extracted_sections.push(ExtractedSection::new(
                passage.document_id.clone(),
                &passage.title,
                scored.rank,
                passage.page_number,
            ));
            report.subsection_analysis.push(SummaryRecord {
                document_id: passage.document_id.clone(),
                refined_text: summarize(&passage.text, limits),
                page_number: passage.page_number,
            });
        }
        stats.sections_reported = report.extracted_sections.len();
        stats.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            "Digest complete: ranked={}, reported={}, warnings={}, duration={}ms",
            stats.passages_ranked,
            stats.sections_reported,
            stats.warnings.len(),
            stats.duration_ms
        );

        RunOutput { report, stats }
    }
}
