//! Relevance ranking — normalization, TF-IDF vector space, cosine scoring, ranking.
//!
//! Passages flow one way: raw text → normalized text → TF-IDF vectors →
//! cosine scores against the query → a dense, stable ranking.

pub mod normalize;
pub mod ranker;
pub mod scorer;
pub mod stemmer;
pub mod stopwords;
pub mod vectorizer;

pub use normalize::{normalize, tokenize};
pub use ranker::{rank, rank_sections, Ranking, ScoredPassage};
pub use scorer::{cosine_similarity, DegradedScore, RelevanceScorer, ScoreOutcome};
pub use vectorizer::{TextVectorizer, VectorSpaceModel, VectorizerParams};
