//! Ranker — stable descending sort by score with dense 1..N ranks.

use sift_core::{Error, Passage, Query, Result};
use tracing::{error, info, warn};

use crate::scorer::{DegradedScore, RelevanceScorer};
use crate::vectorizer::TextVectorizer;

/// A passage annotated with its score and rank.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPassage<'a> {
    pub passage: &'a Passage,
    pub score: f64,
    /// 1-based, dense.
    pub rank: usize,
}

/// Ranked passages plus warnings collected while scoring.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ranking<'a> {
    pub passages: Vec<ScoredPassage<'a>>,
    pub warnings: Vec<DegradedScore>,
}

/// Order passages by score, highest first. Equal scores keep input order.
pub fn rank<'a>(passages: &'a [Passage], scores: &[f64]) -> Result<Vec<ScoredPassage<'a>>> {
    if passages.len() != scores.len() {
        return Err(Error::InvalidInput(format!(
            "score count ({}) doesn't match passage count ({})",
            scores.len(),
            passages.len()
        )));
    }

    let mut scored: Vec<ScoredPassage<'a>> = passages
        .iter()
        .zip(scores)
        .map(|(passage, &score)| {
            // `+ 0.0` folds -0.0 into 0.0 so the two compare as a tie.
            let score = if score.is_finite() {
                score + 0.0
            } else {
                warn!(
                    "Non-finite score for {} page {}, using 0.0",
                    passage.document_id, passage.page_number
                );
                0.0
            };
            ScoredPassage {
                passage,
                score,
                rank: 0,
            }
        })
        .collect();

    // sort_by is stable.
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    for (i, sp) in scored.iter_mut().enumerate() {
        sp.rank = i + 1;
    }

    Ok(scored)
}

/// Score passages against the persona/job query and rank them.
///
/// A contract violation between scorer and ranker is logged and yields an
/// empty ranking rather than a partial one.
pub fn rank_sections<'a, V: TextVectorizer>(
    passages: &'a [Passage],
    scorer: &mut RelevanceScorer<V>,
    query: &Query,
) -> Ranking<'a> {
    if passages.is_empty() {
        warn!("No passages provided for ranking");
        return Ranking::default();
    }

    let query_text = query.text();
    info!("Ranking with query: {}", query_text);

    let outcome = scorer.score(&query_text, passages);
    match rank(passages, &outcome.scores) {
        Ok(ranked) => {
            info!("Ranked {} sections", ranked.len());
            Ranking {
                passages: ranked,
                warnings: outcome.warnings,
            }
        }
        Err(e) => {
            error!("Failed to rank sections: {}", e);
            Ranking {
                passages: Vec::new(),
                warnings: outcome.warnings,
            }
        }
    }
}
