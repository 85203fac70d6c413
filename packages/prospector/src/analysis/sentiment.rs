//! Lexicon-based sentiment polarity.

/// Positive lexicon.
const POSITIVE_WORDS: &[&str] = &[
    "good",
    "great",
    "excellent",
    "best",
    "love",
    "helpful",
    "useful",
    "quality",
    "amazing",
    "wonderful",
    "easy",
    "free",
    "trusted",
    "reliable",
    "success",
    "enjoy",
    "recommended",
    "valuable",
    "popular",
    "favorite",
];

/// Negative lexicon.
const NEGATIVE_WORDS: &[&str] = &[
    "bad",
    "worst",
    "terrible",
    "awful",
    "hate",
    "scam",
    "spam",
    "broken",
    "useless",
    "poor",
    "problem",
    "fail",
    "failure",
    "wrong",
    "fake",
    "cheap",
    "annoying",
    "error",
    "risk",
    "warning",
];

/// Density multiplier mapping lexicon hits per token into -1.0..1.0.
const DENSITY_SCALE: f64 = 5.0;

/// Compute a sentiment polarity in -1.0..1.0.
///
/// The signed lexicon hit density is scaled and clamped: a text where
/// one token in five is positive saturates at 1.0. Blank content is
/// neutral (0.0).
pub fn polarity(content: &str) -> f64 {
    let tokens: Vec<String> = content
        .split(|c: char| !c.is_ascii_alphabetic())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_ascii_lowercase())
        .collect();

    if tokens.is_empty() {
        return 0.0;
    }

    let positive = tokens
        .iter()
        .filter(|t| POSITIVE_WORDS.contains(&t.as_str()))
        .count() as f64;
    let negative = tokens
        .iter()
        .filter(|t| NEGATIVE_WORDS.contains(&t.as_str()))
        .count() as f64;

    let density = (positive - negative) / tokens.len() as f64;
    (density * DENSITY_SCALE).clamp(-1.0, 1.0)
}
