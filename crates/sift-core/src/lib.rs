//! Sift Core — error type, run configuration, passage data model.

pub mod config;
pub mod error;
pub mod types;

pub use config::DigestConfig;
pub use error::{Error, Result};
pub use types::{Passage, Query, QUERY_SEPARATOR};
