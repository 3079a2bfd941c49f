//! Digest report assembly and persistence.

use std::path::Path;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use sift_core::{Query, Result};
use tracing::info;

/// Section title used when a passage has none.
pub const UNTITLED_SECTION: &str = "Untitled Section";

/// Run metadata at the top of the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DigestMetadata {
    pub input_documents: Vec<String>,
    pub persona: String,
    pub job_to_be_done: String,
    pub processing_timestamp: DateTime<Local>,
}

/// One ranked section, in rank order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedSection {
    #[serde(rename = "document")]
    pub document_id: String,
    pub section_title: String,
    pub importance_rank: usize,
    pub page_number: usize,
}

impl ExtractedSection {
    pub fn new(
        document_id: impl Into<String>,
        title: &str,
        importance_rank: usize,
        page_number: usize,
    ) -> Self {
        let title = title.trim();
        Self {
            document_id: document_id.into(),
            section_title: if title.is_empty() {
                UNTITLED_SECTION.to_string()
            } else {
                title.to_string()
            },
            importance_rank,
            page_number,
        }
    }
}

/// Extractive summary of one ranked section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRecord {
    #[serde(rename = "document")]
    pub document_id: String,
    pub refined_text: String,
    pub page_number: usize,
}

/// The full digest written at the end of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DigestReport {
    pub metadata: DigestMetadata,
    pub extracted_sections: Vec<ExtractedSection>,
    pub subsection_analysis: Vec<SummaryRecord>,
}

impl DigestReport {
    /// An empty report stamped with the current time.
    pub fn new(query: &Query, input_documents: Vec<String>) -> Self {
        Self {
            metadata: DigestMetadata {
                input_documents,
                persona: query.persona.clone(),
                job_to_be_done: query.job_to_be_done.clone(),
                processing_timestamp: Local::now(),
            },
            extracted_sections: Vec::new(),
            subsection_analysis: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.extracted_sections.is_empty()
    }
}

/// Write the report as pretty-printed JSON, creating parent directories.
pub fn write_report(path: &Path, report: &DigestReport) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;
    info!("Report written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> DigestReport {
        let query = Query::new("Travel planner", "Plan a 4-day trip");
        let mut report = DigestReport::new(&query, vec!["guide.pdf".into()]);
        report
            .extracted_sections
            .push(ExtractedSection::new("guide.pdf", "Coastal towns", 1, 3));
        report.subsection_analysis.push(SummaryRecord {
            document_id: "guide.pdf".into(),
            refined_text: "Nice is a coastal town.".into(),
            page_number: 3,
        });
        report
    }

    #[test]
    fn test_untitled_default() {
        let section = ExtractedSection::new("a.pdf", "   ", 1, 1);
        assert_eq!(section.section_title, UNTITLED_SECTION);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(sample_report()).unwrap();
        assert_eq!(json["metadata"]["persona"], "Travel planner");
        assert_eq!(json["metadata"]["input_documents"][0], "guide.pdf");
        assert!(json["metadata"]["processing_timestamp"].is_string());
        assert_eq!(json["extracted_sections"][0]["document"], "guide.pdf");
        assert_eq!(json["extracted_sections"][0]["section_title"], "Coastal towns");
        assert_eq!(json["extracted_sections"][0]["importance_rank"], 1);
        assert_eq!(json["subsection_analysis"][0]["refined_text"], "Nice is a coastal town.");
        assert_eq!(json["subsection_analysis"][0]["page_number"], 3);
    }

    #[test]
    fn test_write_report_creates_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output/nested/results.json");
        let report = sample_report();
        write_report(&path, &report).unwrap();

        let written: DigestReport =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.extracted_sections, report.extracted_sections);
        assert_eq!(written.subsection_analysis, report.subsection_analysis);
    }
}
