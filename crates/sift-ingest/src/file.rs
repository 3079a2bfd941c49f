//! Page-level text extraction for supported document formats.

use std::path::Path;

use sift_core::{Error, Result};
use tracing::debug;

/// Page separator in plain-text documents.
pub const PAGE_BREAK: char = '\u{c}';

/// Supported document types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    PlainText,
    Markdown,
    Unknown,
}

impl FileType {
    /// Detect file type from extension.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => Self::Pdf,
            "txt" => Self::PlainText,
            "md" | "markdown" => Self::Markdown,
            _ => Self::Unknown,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        Self::from_extension(ext)
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

/// List supported documents in `dir`, sorted by file name.
pub fn discover_documents(dir: &Path) -> Result<Vec<String>> {
    if !dir.is_dir() {
        return Err(Error::Ingest(format!(
            "input directory '{}' not found",
            dir.display()
        )));
    }

    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() || !FileType::from_path(&path).is_supported() {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            names.push(name.to_string());
        }
    }
    names.sort();
    debug!("Discovered {} documents in {}", names.len(), dir.display());
    Ok(names)
}

/// Extract the text of every page of a document, in page order.
pub fn extract_pages(path: &Path) -> Result<Vec<String>> {
    match FileType::from_path(path) {
        FileType::Pdf => extract_pdf_pages(path),
        FileType::PlainText | FileType::Markdown => {
            let content = std::fs::read_to_string(path)?;
            Ok(content.split(PAGE_BREAK).map(str::to_string).collect())
        }
        FileType::Unknown => Err(Error::Ingest(format!(
            "unsupported document type: {}",
            path.display()
        ))),
    }
}

/// PDF pages via `pdf-extract`, which can panic on malformed input.
fn extract_pdf_pages(path: &Path) -> Result<Vec<String>> {
    match std::panic::catch_unwind(|| pdf_extract::extract_text_by_pages(path)) {
        Ok(Ok(pages)) => Ok(pages),
        Ok(Err(e)) => Err(Error::Ingest(format!(
            "failed to read PDF {}: {}",
            path.display(),
            e
        ))),
        Err(_) => Err(Error::Ingest(format!(
            "PDF parser panicked on {}",
            path.display()
        ))),
    }
}
