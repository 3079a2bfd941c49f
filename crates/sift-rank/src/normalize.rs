//! Lexical normalization shared by queries and passages.
//!
//! Both sides of a comparison must go through [`normalize`]; any asymmetry
//! silently lowers scores.

use once_cell::sync::Lazy;
use regex::Regex;

/// Word tokens of two or more word characters.
static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("static regex"));

/// Lowercase, replace non-alphanumeric characters with spaces, collapse whitespace.
pub fn normalize(text: &str) -> String {
    let replaced: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c.is_whitespace() { c } else { ' ' })
        .collect();

    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split normalized text into word tokens (single characters are dropped).
pub fn tokenize(text: &str) -> Vec<&str> {
    TOKEN_RE.find_iter(text).map(|m| m.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_basic() {
        assert_eq!(normalize("Hello, World!"), "hello world");
        assert_eq!(normalize("  Tabs\tand\n\nnewlines  "), "tabs and newlines");
        assert_eq!(normalize("state-of-the-art"), "state of the art");
        assert_eq!(normalize("snake_case"), "snake case");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("!!!...???"), "");
    }

    #[test]
    fn test_normalize_idempotent() {
        let samples = [
            "Cats are small mammals that purr.",
            "  Mixed   CASE, punctuation; and\ttabs\r\n",
            "Ünïcödé — dashes… and “quotes”",
            "İstanbul 2024: Q3/Q4 results (draft)",
            "",
            "a",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", s);
        }
    }

    #[test]
    fn test_query_and_passage_normalize_the_same() {
        // Same words with different surface forms must normalize identically.
        let query = "Veterinarian: learn about CAT biology!";
        let passage = "veterinarian learn   about cat\nbiology";
        assert_eq!(normalize(query), normalize(passage));
    }

    #[test]
    fn test_tokenize_drops_single_chars() {
        assert_eq!(tokenize("a cat is 1 of 22 pets"), vec!["cat", "is", "of", "22", "pets"]);
        assert!(tokenize("").is_empty());
    }
}
