//! Simplified Flesch readability.

/// Characters per estimated syllable. Word length stands in for
/// syllable counting, which keeps the metric dependency-free.
const CHARS_PER_SYLLABLE: f64 = 3.0;

/// Compute a readability score on a 0-100 scale, higher is easier.
///
/// Flesch reading ease with average word length (in characters, divided
/// by `CHARS_PER_SYLLABLE`) as the syllable proxy, clamped to 0-100.
/// Empty content scores 0.
pub fn flesch(content: &str) -> u8 {
    let words: Vec<&str> = content.split_whitespace().collect();
    let sentences = content
        .split(['.', '!', '?'])
        .filter(|s| !s.trim().is_empty())
        .count();

    if words.is_empty() || sentences == 0 {
        return 0;
    }

    let avg_sentence_len = words.len() as f64 / sentences as f64;
    let avg_word_len = words.iter().map(|w| w.chars().count()).sum::<usize>() as f64
        / words.len() as f64;
    let syllables_per_word = avg_word_len / CHARS_PER_SYLLABLE;

    let score = 206.835 - 1.015 * avg_sentence_len - 84.6 * syllables_per_word;
    score.clamp(0.0, 100.0) as u8
}
