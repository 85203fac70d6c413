//! Keyword extraction by term frequency.

use indexmap::IndexMap;

/// Maximum keywords kept per domain.
pub const TOP_KEYWORDS: usize = 20;

/// Common English words excluded from keyword extraction.
const STOPWORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "can", "her", "was", "one", "our",
    "out", "has", "have", "had", "this", "that", "with", "they", "from", "she", "him", "his",
    "been", "more", "when", "will", "would", "there", "their", "what", "about", "which", "were",
    "your", "said", "each", "them", "than", "then", "into", "some", "could", "other", "these",
    "also", "only", "just", "most", "over", "such", "very", "where", "after", "before", "while",
    "here", "how", "why", "who", "its", "any", "may", "get", "use", "two", "way", "day", "did",
    "does", "because",
];

/// Extract the most frequent content keywords.
///
/// Tokens are lowercased alphabetic runs longer than two characters,
/// minus stopwords. Ties in frequency keep first-seen order so the
/// result is deterministic.
pub fn extract(content: &str, limit: usize) -> Vec<String> {
    let mut frequencies: IndexMap<String, usize> = IndexMap::new();

    for token in content.split(|c: char| !c.is_ascii_alphabetic()) {
        if token.len() <= 2 {
            continue;
        }
        let token = token.to_ascii_lowercase();
        if STOPWORDS.contains(&token.as_str()) {
            continue;
        }
        *frequencies.entry(token).or_insert(0) += 1;
    }

    let mut ranked: Vec<(String, usize)> = frequencies.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked
        .into_iter()
        .take(limit)
        .map(|(word, _)| word)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_ranks_by_frequency() {
        let content = "recipes recipes recipes cooking cooking kitchen";
        let keywords = extract(content, 10);
        assert_eq!(keywords, vec!["recipes", "cooking", "kitchen"]);
    }

    #[test]
    fn test_extract_skips_stopwords_and_short_tokens() {
        let content = "the and for it is cooking";
        let keywords = extract(content, 10);
        assert_eq!(keywords, vec!["cooking"]);
    }

    #[test]
    fn test_extract_bounded() {
        let mut words = Vec::new();
        for a in b'a'..=b'z' {
            for b in b'a'..=b'z' {
                words.push(format!("term{}{}", a as char, b as char));
            }
        }
        let content = words[..100].join(" ");

        let keywords = extract(&content, TOP_KEYWORDS);
        assert_eq!(keywords.len(), TOP_KEYWORDS);
    }

    #[test]
    fn test_extract_deterministic_on_ties() {
        let content = "alpha beta gamma alpha beta gamma";
        assert_eq!(extract(content, 10), extract(content, 10));
        // First-seen order wins among equal counts.
        assert_eq!(extract(content, 10), vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_extract_empty() {
        assert!(extract("", 10).is_empty());
    }
}
