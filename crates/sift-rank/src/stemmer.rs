//! Inflectional suffix stripping so "cats" and "cat" share a dimension.
//!
//! Only plural, -ing, -ed and -ly endings are folded; derivational suffixes
//! are left alone to avoid merging unrelated words.

use std::borrow::Cow;

/// Words this short are never stemmed.
pub const MIN_STEM_LEN: usize = 3;

/// `(suffix, replacement)`, longest and most specific first.
const SUFFIX_RULES: &[(&str, &str)] = &[
    // -ing, undoubling consonants
    ("pping", "p"),
    ("tting", "t"),
    ("nning", "n"),
    ("mming", "m"),
    ("dding", "d"),
    ("gging", "g"),
    ("ying", "y"),
    ("eing", "e"),
    ("uing", "ue"),
    ("ing", ""),
    // -ed
    ("pped", "p"),
    ("tted", "t"),
    ("nned", "n"),
    ("mmed", "m"),
    ("dded", "d"),
    ("gged", "g"),
    ("ied", "y"),
    ("eed", "ee"),
    ("ued", "ue"),
    ("ved", "ve"),
    ("ed", ""),
    // plurals
    ("ies", "y"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("xes", "x"),
    ("sses", "ss"),
    ("ss", "ss"),
    ("us", "us"),
    ("is", "is"),
    ("s", ""),
    // adverbs
    ("ily", "y"),
    ("ly", ""),
];

/// Strip one inflectional suffix from a lowercase word.
pub fn stem(word: &str) -> Cow<'_, str> {
    if word.len() <= MIN_STEM_LEN {
        return Cow::Borrowed(word);
    }

    for &(suffix, replacement) in SUFFIX_RULES {
        if word.len() > suffix.len() + 1 && word.ends_with(suffix) {
            let base = &word[..word.len() - suffix.len()];
            return Cow::Owned(format!("{}{}", base, replacement));
        }
    }

    Cow::Borrowed(word)
}
