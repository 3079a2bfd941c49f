//! TF-IDF vector space over unigrams and bigrams.
//!
//! The model is built unfit, fitted exactly once against the run's corpus,
//! and frozen afterwards. Inputs are expected to be normalized already
//! (see [`crate::normalize`]).

use std::collections::HashMap;

use ndarray::Array1;
use sift_core::{Error, Result};
use tracing::debug;

use crate::normalize::tokenize;
use crate::stemmer::stem;
use crate::stopwords::is_stop_word;

/// Upper bound on vocabulary entries.
pub const MAX_FEATURES: usize = 1000;
/// A term must appear in at least this many documents.
pub const MIN_DOCUMENT_FREQUENCY: usize = 1;
/// A term appearing in more than this share of documents is dropped.
pub const MAX_DOCUMENT_RATIO: f64 = 0.9;
/// Longest n-gram taken from a token stream.
pub const MAX_NGRAM: usize = 2;

/// Seam between the scorer and whatever turns text into vectors.
pub trait TextVectorizer {
    /// Whether `fit` has completed.
    fn is_fitted(&self) -> bool;

    /// Build the vocabulary from a corpus. Called once per run.
    fn fit(&mut self, corpus: &[&str]) -> Result<()>;

    /// Project text into the fitted space.
    fn transform(&self, text: &str) -> Result<Array1<f64>>;
}

/// Vocabulary bounds for [`VectorSpaceModel`].
#[derive(Debug, Clone, PartialEq)]
pub struct VectorizerParams {
    pub max_features: usize,
    pub min_df: usize,
    pub max_df_ratio: f64,
    pub max_ngram: usize,
}

impl Default for VectorizerParams {
    fn default() -> Self {
        Self {
            max_features: MAX_FEATURES,
            min_df: MIN_DOCUMENT_FREQUENCY,
            max_df_ratio: MAX_DOCUMENT_RATIO,
            max_ngram: MAX_NGRAM,
        }
    }
}

/// Frozen vocabulary with per-dimension idf weights.
#[derive(Debug, Clone)]
struct Vocabulary {
    index: HashMap<String, usize>,
    idf: Array1<f64>,
}

/// Fit-once TF-IDF model.
#[derive(Debug, Clone, Default)]
pub struct VectorSpaceModel {
    params: VectorizerParams,
    vocabulary: Option<Vocabulary>,
}

impl VectorSpaceModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(params: VectorizerParams) -> Self {
        Self {
            params,
            vocabulary: None,
        }
    }

    pub fn params(&self) -> &VectorizerParams {
        &self.params
    }

    /// Number of dimensions; 0 before fit.
    pub fn dimension(&self) -> usize {
        self.vocabulary.as_ref().map(|v| v.index.len()).unwrap_or(0)
    }

    /// Dimension index of a stemmed term or space-joined bigram.
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.as_ref()?.index.get(term).copied()
    }

    /// Stemmed, stop-word-filtered unigrams followed by the n-grams built from them.
    fn analyze(&self, text: &str) -> Vec<String> {
        let tokens: Vec<String> = tokenize(text)
            .into_iter()
            .filter(|t| !is_stop_word(t))
            .map(|t| stem(t).into_owned())
            .collect();

        let mut terms = tokens.clone();
        for n in 2..=self.params.max_ngram {
            terms.extend(tokens.windows(n).map(|w| w.join(" ")));
        }
        terms
    }

    fn term_counts(&self, text: &str) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for term in self.analyze(text) {
            *counts.entry(term).or_insert(0) += 1;
        }
        counts
    }
}

impl TextVectorizer for VectorSpaceModel {
    fn is_fitted(&self) -> bool {
        self.vocabulary.is_some()
    }

    fn fit(&mut self, corpus: &[&str]) -> Result<()> {
        if self.vocabulary.is_some() {
            return Err(Error::AlreadyFitted);
        }

        let n_docs = corpus.len();
        // term -> (document frequency, corpus-wide count)
        let mut stats: HashMap<String, (usize, usize)> = HashMap::new();
        for doc in corpus {
            for (term, count) in self.term_counts(doc) {
                let entry = stats.entry(term).or_insert((0, 0));
                entry.0 += 1;
                entry.1 += count;
            }
        }

        let max_doc_count = self.params.max_df_ratio * n_docs as f64;
        let mut kept: Vec<(String, usize, usize)> = stats
            .into_iter()
            .filter(|(_, (df, _))| *df >= self.params.min_df && (*df as f64) <= max_doc_count)
            .map(|(term, (df, total))| (term, df, total))
            .collect();

        // Most frequent first; term order breaks ties so the cut is deterministic.
        kept.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.0.cmp(&b.0)));
        kept.truncate(self.params.max_features);
        kept.sort_by(|a, b| a.0.cmp(&b.0));

        let idf = Array1::from_iter(
            kept.iter()
                .map(|(_, df, _)| ((1.0 + n_docs as f64) / (1.0 + *df as f64)).ln() + 1.0),
        );
        let index = kept
            .into_iter()
            .enumerate()
            .map(|(i, (term, _, _))| (term, i))
            .collect::<HashMap<_, _>>();

        debug!("Fitted vocabulary: {} terms over {} documents", index.len(), n_docs);
        self.vocabulary = Some(Vocabulary { index, idf });
        Ok(())
    }

    fn transform(&self, text: &str) -> Result<Array1<f64>> {
        let vocab = self.vocabulary.as_ref().ok_or(Error::ModelNotFitted)?;

        let mut vector = Array1::<f64>::zeros(vocab.index.len());
        for (term, count) in self.term_counts(text) {
            if let Some(&i) = vocab.index.get(&term) {
                vector[i] = count as f64 * vocab.idf[i];
            }
        }

        let norm = vector.dot(&vector).sqrt();
        if norm > 0.0 {
            vector.mapv_inplace(|v| v / norm);
        }
        Ok(vector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fitted(corpus: &[&str]) -> VectorSpaceModel {
        let mut model = VectorSpaceModel::new();
        model.fit(corpus).unwrap();
        model
    }

    #[test]
    fn test_transform_before_fit() {
        let model = VectorSpaceModel::new();
        assert!(!model.is_fitted());
        assert!(matches!(model.transform("cats"), Err(Error::ModelNotFitted)));
    }

    #[test]
    fn test_second_fit_rejected() {
        let mut model = fitted(&["cats purr softly", "dogs bark loudly"]);
        let dim = model.dimension();
        assert!(matches!(
            model.fit(&["completely different corpus"]),
            Err(Error::AlreadyFitted)
        ));
        // Vocabulary untouched.
        assert_eq!(model.dimension(), dim);
        assert!(model.term_index("cat").is_some());
    }

    #[test]
    fn test_stop_words_stems_and_bigrams() {
        let model = fitted(&["the cats purr", "dogs bark"]);
        assert!(model.term_index("the").is_none());
        assert!(model.term_index("cat").is_some());
        assert!(model.term_index("cats").is_none());
        // Bigram formed after stop-word removal.
        assert!(model.term_index("cat purr").is_some());
        assert!(model.term_index("the cat").is_none());
    }

    #[test]
    fn test_max_df_drops_ubiquitous_terms() {
        let model = fitted(&["common alpha", "common beta", "common gamma"]);
        assert!(model.term_index("common").is_none());
        assert!(model.term_index("alpha").is_some());
    }

    #[test]
    fn test_single_document_has_empty_vocabulary() {
        // df 1 > 0.9 * 1, so every term is pruned.
        let model = fitted(&["lonely page of text"]);
        assert!(model.is_fitted());
        assert_eq!(model.dimension(), 0);
        assert_eq!(model.transform("lonely").unwrap().len(), 0);
    }

    #[test]
    fn test_degenerate_corpus() {
        let model = fitted(&[]);
        assert!(model.is_fitted());
        let v = model.transform("anything at all").unwrap();
        assert!(v.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_max_features_cap() {
        let params = VectorizerParams {
            max_features: 2,
            ..VectorizerParams::default()
        };
        let mut model = VectorSpaceModel::with_params(params);
        model
            .fit(&["apple apple apple pear", "plum plum plum kiwi"])
            .unwrap();
        assert_eq!(model.dimension(), 2);
        assert!(model.term_index("apple").is_some());
        assert!(model.term_index("plum").is_some());
    }

    #[test]
    fn test_transform_unit_norm_and_oov() {
        let model = fitted(&["cats purr softly", "dogs bark loudly"]);
        let v = model.transform("cats purr").unwrap();
        assert_eq!(v.len(), model.dimension());
        assert!((v.dot(&v).sqrt() - 1.0).abs() < 1e-9);
        assert!(v.iter().all(|&x| x >= 0.0));

        let oov = model.transform("zebras gallop").unwrap();
        assert!(oov.iter().all(|&x| x == 0.0));
    }
}
