//! Passage and query types shared by every pipeline stage.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator between persona and job in the rendered query.
pub const QUERY_SEPARATOR: &str = ": ";

/// One unit of rankable text: a single page of a source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passage {
    /// Source document identifier (the file name).
    #[serde(rename = "document")]
    pub document_id: String,
    /// 1-based page number inside the document.
    #[serde(rename = "page")]
    pub page_number: usize,
    #[serde(default)]
    pub title: String,
    pub text: String,
}

impl Passage {
    pub fn new(
        document_id: impl Into<String>,
        page_number: usize,
        title: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            document_id: document_id.into(),
            page_number,
            title: title.into(),
            text: text.into(),
        }
    }
}

/// Caller intent: who is reading and what they need to get done.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub persona: String,
    pub job_to_be_done: String,
}

impl Query {
    pub fn new(persona: impl Into<String>, job_to_be_done: impl Into<String>) -> Self {
        Self {
            persona: persona.into(),
            job_to_be_done: job_to_be_done.into(),
        }
    }

    /// The text the scorer ranks against: `"{persona}: {job}"`.
    pub fn text(&self) -> String {
        format!("{}{}{}", self.persona, QUERY_SEPARATOR, self.job_to_be_done)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.persona, QUERY_SEPARATOR, self.job_to_be_done)
    }
}
