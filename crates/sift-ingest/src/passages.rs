//! Page text → [`Passage`] records.
//!
//! Pages with too little text are skipped here so that no empty passage ever
//! reaches the scorer.

use std::path::Path;

use sift_core::Passage;
use tracing::{error, info, warn};

use crate::file::extract_pages;

/// A page needs more than this many trimmed characters to become a passage.
pub const MIN_PAGE_TEXT_CHARS: usize = 20;
/// Titles longer than this are cut and end in `...`.
pub const TITLE_MAX_CHARS: usize = 100;
const TITLE_ELLIPSIS: &str = "...";

/// First line of the raw page, trimmed, or `"Page {n}"` when that line is blank.
pub fn derive_title(text: &str, page_number: usize) -> String {
    let first = text.lines().next().map(str::trim).unwrap_or("");
    if first.is_empty() {
        return format!("Page {}", page_number);
    }

    if first.chars().count() > TITLE_MAX_CHARS {
        let keep = TITLE_MAX_CHARS - TITLE_ELLIPSIS.len();
        let mut title: String = first.chars().take(keep).collect();
        title.push_str(TITLE_ELLIPSIS);
        title
    } else {
        first.to_string()
    }
}

/// Build a passage from one page, or `None` when the page has too little text.
pub fn build_passage(document_id: &str, page_number: usize, raw: &str) -> Option<Passage> {
    let text = raw.trim();
    if text.chars().count() <= MIN_PAGE_TEXT_CHARS {
        return None;
    }
    Some(Passage::new(
        document_id,
        page_number,
        derive_title(raw, page_number),
        text,
    ))
}

/// Read up to `max_pages` pages from each named document in `dir`.
///
/// Documents that cannot be opened are logged and skipped.
pub fn extract_passages(dir: &Path, documents: &[String], max_pages: usize) -> Vec<Passage> {
    let mut passages = Vec::new();

    for name in documents {
        let path = dir.join(name);
        info!("Processing document: {}", name);

        let pages = match extract_pages(&path) {
            Ok(p) => p,
            Err(e) => {
                error!("Failed to open {}: {}", name, e);
                continue;
            }
        };
        info!("{} has {} pages, processing up to {}", name, pages.len(), max_pages);

        for (i, page) in pages.iter().take(max_pages).enumerate() {
            let page_number = i + 1;
            match build_passage(name, page_number, page) {
                Some(passage) => passages.push(passage),
                None => warn!("Page {} in {} has insufficient text", page_number, name),
            }
        }
    }

    info!(
        "Extracted {} passages from {} documents",
        passages.len(),
        documents.len()
    );
    passages
}
