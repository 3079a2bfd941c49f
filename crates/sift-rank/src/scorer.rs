//! Relevance scorer — cosine similarity between query and passage TF-IDF vectors.
//!
//! Scoring never aborts a run. Anything that goes wrong inside turns into a
//! zero score for the affected passages and a [`DegradedScore`] in the outcome.

use std::fmt;

use ndarray::Array1;
use sift_core::Passage;
use tracing::{info, warn};

use crate::normalize::normalize;
use crate::vectorizer::{TextVectorizer, VectorSpaceModel};

/// Non-fatal scoring problem. `passage_index` is `None` when it hit every passage.
#[derive(Debug, Clone, PartialEq)]
pub struct DegradedScore {
    pub passage_index: Option<usize>,
    pub reason: String,
}

impl fmt::Display for DegradedScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.passage_index {
            Some(i) => write!(f, "passage {} scored 0.0: {}", i, self.reason),
            None => write!(f, "all passages scored 0.0: {}", self.reason),
        }
    }
}

/// Scores in input order plus any degradation warnings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreOutcome {
    pub scores: Vec<f64>,
    pub warnings: Vec<DegradedScore>,
}

impl ScoreOutcome {
    fn zeros(n: usize) -> Self {
        Self {
            scores: vec![0.0; n],
            warnings: Vec::new(),
        }
    }

    fn degraded(n: usize, reason: impl Into<String>) -> Self {
        let warning = DegradedScore {
            passage_index: None,
            reason: reason.into(),
        };
        warn!("{}", warning);
        Self {
            scores: vec![0.0; n],
            warnings: vec![warning],
        }
    }

    pub fn is_degraded(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Cosine similarity; 0.0 when either vector has zero magnitude or the
/// dimensions disagree.
pub fn cosine_similarity(a: &Array1<f64>, b: &Array1<f64>) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }
    let norm_a = a.dot(a).sqrt();
    let norm_b = b.dot(b).sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    a.dot(b) / (norm_a * norm_b)
}

/// Owns the run's vectorizer and scores passages against queries.
pub struct RelevanceScorer<V: TextVectorizer = VectorSpaceModel> {
    vectorizer: V,
}

impl RelevanceScorer<VectorSpaceModel> {
    pub fn new() -> Self {
        Self::with_vectorizer(VectorSpaceModel::new())
    }
}

impl Default for RelevanceScorer<VectorSpaceModel> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: TextVectorizer> RelevanceScorer<V> {
    pub fn with_vectorizer(vectorizer: V) -> Self {
        Self { vectorizer }
    }

    pub fn vectorizer(&self) -> &V {
        &self.vectorizer
    }

    /// Score every passage against the query, one score per passage.
    pub fn score(&mut self, query: &str, passages: &[Passage]) -> ScoreOutcome {
        let texts: Vec<&str> = passages.iter().map(|p| p.text.as_str()).collect();
        self.score_texts(query, &texts)
    }

    /// Score raw texts against the query, one score per text.
    pub fn score_texts(&mut self, query: &str, texts: &[&str]) -> ScoreOutcome {
        if texts.is_empty() {
            warn!("No passages provided for scoring");
            return ScoreOutcome::default();
        }

        let query = normalize(query);
        if query.is_empty() {
            warn!("Empty query after normalization; all scores are zero");
            return ScoreOutcome::zeros(texts.len());
        }

        let normalized: Vec<String> = texts.iter().map(|t| normalize(t)).collect();
        let corpus: Vec<&str> = normalized
            .iter()
            .map(String::as_str)
            .filter(|t| !t.is_empty())
            .collect();
        if corpus.is_empty() {
            warn!("No passage text left after normalization; all scores are zero");
            return ScoreOutcome::zeros(texts.len());
        }

        if !self.vectorizer.is_fitted() {
            if let Err(e) = self.vectorizer.fit(&corpus) {
                return ScoreOutcome::degraded(texts.len(), format!("fit failed: {}", e));
            }
        }

        let query_vec = match self.vectorizer.transform(&query) {
            Ok(v) => v,
            Err(e) => {
                return ScoreOutcome::degraded(texts.len(), format!("query transform failed: {}", e))
            }
        };

        let mut outcome = ScoreOutcome::zeros(texts.len());
        for (i, text) in normalized.iter().enumerate() {
            let score = match self.vectorizer.transform(text) {
                Ok(v) if v.len() != query_vec.len() => Err(format!(
                    "dimension mismatch: passage {} vs query {}",
                    v.len(),
                    query_vec.len()
                )),
                Ok(v) => {
                    let s = cosine_similarity(&query_vec, &v);
                    if s.is_finite() {
                        Ok(s.clamp(0.0, 1.0))
                    } else {
                        Err(format!("non-finite similarity {}", s))
                    }
                }
                Err(e) => Err(format!("transform failed: {}", e)),
            };

            match score {
                Ok(s) => outcome.scores[i] = s,
                Err(reason) => {
                    let warning = DegradedScore {
                        passage_index: Some(i),
                        reason,
                    };
                    warn!("{}", warning);
                    outcome.warnings.push(warning);
                }
            }
        }

        info!("Calculated relevance scores for {} passages", texts.len());
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use sift_core::{Error, Result};

    fn passage(doc: &str, text: &str) -> Passage {
        Passage::new(doc, 1, "", text)
    }

    #[test]
    fn test_cosine_similarity() {
        let a = array![1.0, 0.0];
        let b = array![1.0, 1.0];
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-12);
        assert!((cosine_similarity(&a, &b) - 1.0 / 2f64.sqrt()).abs() < 1e-12);
        assert_eq!(cosine_similarity(&a, &array![0.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&a, &array![1.0]), 0.0);
    }

    #[test]
    fn test_cats_outrank_tariffs() {
        let passages = vec![
            passage("a.pdf", "Cats are small mammals that purr."),
            passage("b.pdf", "Global trade tariffs increased sharply this year."),
        ];
        let mut scorer = RelevanceScorer::new();
        let outcome = scorer.score("veterinarian: learn about cat biology", &passages);
        assert_eq!(outcome.scores.len(), 2);
        assert!(!outcome.is_degraded());
        assert!(outcome.scores[0] > outcome.scores[1]);
    }

    #[test]
    fn test_empty_query_scores_zero() {
        let passages = vec![passage("a.pdf", "cats purr"), passage("b.pdf", "dogs bark")];
        let mut scorer = RelevanceScorer::new();
        let outcome = scorer.score("", &passages);
        assert_eq!(outcome.scores, vec![0.0, 0.0]);
        assert!(!scorer.vectorizer().is_fitted());
    }

    #[test]
    fn test_no_usable_text_scores_zero() {
        let mut scorer = RelevanceScorer::new();
        let outcome = scorer.score_texts("cats", &["!!!", "..."]);
        assert_eq!(outcome.scores, vec![0.0, 0.0]);
    }

    #[test]
    fn test_empty_passages() {
        let mut scorer = RelevanceScorer::new();
        assert!(scorer.score("cats", &[]).scores.is_empty());
    }

    #[test]
    fn test_scores_bounded() {
        let texts = [
            "Cats cats cats and more cats",
            "The veterinarian studies cat biology in depth",
            "Unrelated content about shipping containers",
            "cat biology veterinarian",
        ];
        let mut scorer = RelevanceScorer::new();
        let outcome = scorer.score_texts("Veterinarian: cat biology", &texts);
        assert_eq!(outcome.scores.len(), texts.len());
        for s in &outcome.scores {
            assert!((0.0..=1.0).contains(s), "score out of bounds: {}", s);
        }
    }

    #[test]
    fn test_query_symmetry_with_punctuation() {
        let texts = ["cat biology notes", "tariff schedule"];
        let mut plain = RelevanceScorer::new();
        let mut noisy = RelevanceScorer::new();
        let a = plain.score_texts("cat biology", &texts);
        let b = noisy.score_texts("CAT, Biology!!", &texts);
        assert_eq!(a.scores, b.scores);
    }

    #[test]
    fn test_second_call_reuses_fitted_vocabulary() {
        let mut scorer = RelevanceScorer::new();
        scorer.score_texts("cats", &["cats purr", "dogs bark"]);
        let dim = scorer.vectorizer().dimension();
        let outcome = scorer.score_texts("zebras", &["zebras gallop", "lions roar"]);
        assert_eq!(scorer.vectorizer().dimension(), dim);
        // Out-of-vocabulary on the frozen model.
        assert_eq!(outcome.scores, vec![0.0, 0.0]);
    }

    /// Vectorizer whose fit always fails.
    struct BrokenFit;

    impl TextVectorizer for BrokenFit {
        fn is_fitted(&self) -> bool {
            false
        }
        fn fit(&mut self, _corpus: &[&str]) -> Result<()> {
            Err(Error::Internal("boom".into()))
        }
        fn transform(&self, _text: &str) -> Result<Array1<f64>> {
            Err(Error::ModelNotFitted)
        }
    }

    /// Vectorizer that returns vectors of the wrong size for long texts.
    struct ShortVectors;

    impl TextVectorizer for ShortVectors {
        fn is_fitted(&self) -> bool {
            true
        }
        fn fit(&mut self, _corpus: &[&str]) -> Result<()> {
            Ok(())
        }
        fn transform(&self, text: &str) -> Result<Array1<f64>> {
            if text.len() > 10 {
                Ok(array![1.0])
            } else {
                Ok(array![1.0, 1.0])
            }
        }
    }

    #[test]
    fn test_fit_failure_degrades_to_zero() {
        let mut scorer = RelevanceScorer::with_vectorizer(BrokenFit);
        let outcome = scorer.score_texts("cats", &["cats purr", "dogs bark"]);
        assert_eq!(outcome.scores, vec![0.0, 0.0]);
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].passage_index, None);
    }

    #[test]
    fn test_per_passage_failure_degrades_only_that_passage() {
        let mut scorer = RelevanceScorer::with_vectorizer(ShortVectors);
        let outcome = scorer.score_texts("cats", &["cats purr", "a much longer passage"]);
        assert!(outcome.scores[0] > 0.99);
        assert_eq!(outcome.scores[1], 0.0);
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].passage_index, Some(1));
    }
}
