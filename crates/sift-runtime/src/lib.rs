//! Runtime orchestrator — sequences one batch digest run.
//!
//! passages → scores → ranking → top-k → summaries → report.

pub mod orchestrator;
pub mod types;

pub use orchestrator::DigestPipeline;
pub use types::*;
