//! Brandability heuristics over the domain name itself.
//!
//! Works on the leftmost label only and never looks at content, so it
//! is available even when a domain has no history at all.

/// Short dictionary words that make a name feel like a product.
const BRANDABLE_WORDS: &[&str] = &[
    "tech", "web", "digital", "smart", "pro", "express", "global", "prime",
];

/// Character runs that make a name look auto-generated or spammy.
const SPAM_PATTERNS: &[&str] = &["xxx", "zzz", "123", "abc"];

/// Score how memorable/marketable a name label is, 0-100.
///
/// Rewards short pronounceable names with a balanced vowel ratio;
/// penalizes digits, hyphens, excessive length, and spam-looking runs.
pub fn score(label: &str) -> u8 {
    let label = label.to_ascii_lowercase();
    let mut score: i64 = 50;

    let length = label.chars().count();
    if (4..=8).contains(&length) {
        score += 20;
    } else if (9..=12).contains(&length) {
        score += 10;
    } else if length > 15 {
        score -= 20;
    }

    let vowels = label.chars().filter(|c| "aeiou".contains(*c)).count();
    let consonants = label.chars().filter(|c| c.is_ascii_alphabetic()).count() - vowels;
    if vowels > 0 && consonants > 0 && length > 0 {
        let vowel_ratio = vowels as f64 / length as f64;
        if (0.2..=0.6).contains(&vowel_ratio) {
            score += 15;
        }
    }

    if label.chars().any(|c| c.is_ascii_digit()) {
        score -= 15;
    }
    if label.contains('-') {
        score -= 10;
    }

    if BRANDABLE_WORDS.iter().any(|w| label.contains(w)) {
        score += 10;
    }
    if SPAM_PATTERNS.iter().any(|p| label.contains(p)) {
        score -= 25;
    }

    score.clamp(0, 100) as u8
}
