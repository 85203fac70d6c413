//! Content quality assessment.

/// Phrases that drag quality down.
const SPAM_PHRASES: &[&str] = &[
    "click here",
    "buy now",
    "guaranteed",
    "free money",
    "limited time",
    "act now",
];

/// Phrases that indicate substantive, instructional content.
const EDUCATIONAL_PHRASES: &[&str] = &[
    "learn",
    "guide",
    "tutorial",
    "how to",
    "step by step",
    "explanation",
];

/// Assess content quality on a 0-100 scale.
///
/// Starts from a neutral 50 and adjusts for length, sentence structure,
/// spam phrasing, and instructional phrasing. Empty content scores 0.
pub fn assess(content: &str) -> u8 {
    if content.trim().is_empty() {
        return 0;
    }

    let mut score: i64 = 50;
    let lower = content.to_lowercase();

    let word_count = content.split_whitespace().count();
    if word_count > 500 {
        score += 10;
    } else if word_count > 200 {
        score += 5;
    } else if word_count < 50 {
        score -= 20;
    }

    let sentences: Vec<&str> = content
        .split(['.', '!', '?'])
        .filter(|s| !s.trim().is_empty())
        .collect();
    if sentences.len() > 10 {
        let avg_len = sentences
            .iter()
            .map(|s| s.split_whitespace().count())
            .sum::<usize>() as f64
            / sentences.len() as f64;
        if (10.0..=25.0).contains(&avg_len) {
            score += 10;
        }
    }

    let spam_hits: usize = SPAM_PHRASES.iter().map(|p| lower.matches(p).count()).sum();
    score -= spam_hits as i64 * 5;

    let educational_hits: usize = EDUCATIONAL_PHRASES
        .iter()
        .map(|p| lower.matches(p).count())
        .sum();
    score += educational_hits as i64 * 3;

    score.clamp(0, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_content_scores_zero() {
        assert_eq!(assess(""), 0);
        assert_eq!(assess("   "), 0);
    }

    #[test]
    fn test_short_content_penalized() {
        let score = assess("just a few words here");
        assert!(score < 50, "expected penalty, got {score}");
    }

    #[test]
    fn test_educational_content_rewarded() {
        let thin = "some plain words about nothing in particular repeated enough \
                    times to dodge the short content penalty some plain words about \
                    nothing in particular repeated enough times to dodge the short \
                    content penalty and then some more filler words to be safe here";
        let educational = "a step by step guide so you can learn with a tutorial and \
                           explanation for every part repeated enough times to dodge \
                           the short content penalty and then some more filler words \
                           to be safe here with one more guide to learn from today";

        assert!(assess(educational) > assess(thin));
    }

    #[test]
    fn test_spam_phrases_penalized() {
        let spammy = "buy now buy now click here guaranteed free money limited time \
                      act now buy now click here guaranteed free money limited time";
        assert!(assess(spammy) < 50);
    }

    #[test]
    fn test_score_stays_in_bounds() {
        let very_spammy = "buy now click here free money ".repeat(100);
        let score = assess(&very_spammy);
        assert!(score <= 100);
    }
}
