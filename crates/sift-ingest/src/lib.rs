//! Sift Ingest — turns a directory of documents into page-level passages.

pub mod file;
pub mod passages;

pub use file::{discover_documents, extract_pages, FileType};
pub use passages::{build_passage, derive_title, extract_passages};
