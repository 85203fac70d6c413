//! Niche classification by keyword frequency.

/// Keyword tables per niche. The niche whose keywords occur most often
/// in the content wins.
const NICHES: &[(&str, &[&str])] = &[
    (
        "technology",
        &[
            "technology",
            "software",
            "programming",
            "development",
            "tech",
            "app",
            "digital",
            "code",
            "computer",
            "internet",
        ],
    ),
    (
        "health",
        &[
            "health",
            "medical",
            "fitness",
            "wellness",
            "nutrition",
            "doctor",
            "medicine",
            "healthcare",
            "diet",
            "exercise",
        ],
    ),
    (
        "finance",
        &[
            "finance",
            "money",
            "investment",
            "banking",
            "trading",
            "cryptocurrency",
            "financial",
            "loan",
            "credit",
            "insurance",
        ],
    ),
    (
        "travel",
        &[
            "travel",
            "vacation",
            "hotel",
            "flight",
            "tourism",
            "destination",
            "trip",
            "adventure",
            "explore",
            "journey",
        ],
    ),
    (
        "education",
        &[
            "education",
            "learning",
            "school",
            "university",
            "course",
            "student",
            "teaching",
            "academic",
            "study",
            "knowledge",
        ],
    ),
    (
        "entertainment",
        &[
            "entertainment",
            "movie",
            "music",
            "game",
            "celebrity",
            "news",
            "sports",
            "fun",
            "show",
            "media",
        ],
    ),
    (
        "business",
        &[
            "business",
            "entrepreneur",
            "startup",
            "company",
            "marketing",
            "sales",
            "corporate",
            "management",
            "strategy",
            "success",
        ],
    ),
    (
        "food",
        &[
            "food",
            "recipe",
            "cooking",
            "restaurant",
            "cuisine",
            "chef",
            "meal",
            "ingredients",
            "kitchen",
            "dining",
        ],
    ),
    (
        "fashion",
        &[
            "fashion",
            "style",
            "clothing",
            "designer",
            "trend",
            "outfit",
            "beauty",
            "accessories",
            "brand",
            "wardrobe",
        ],
    ),
];

/// Classify content into a niche.
///
/// Returns `unknown` for blank content and `general` when no niche
/// keyword appears at all.
pub fn classify(content: &str) -> String {
    if content.trim().is_empty() {
        return "unknown".to_string();
    }

    let lower = content.to_lowercase();
    let mut best: Option<(&str, usize)> = None;

    for (niche, keywords) in NICHES {
        let hits: usize = keywords.iter().map(|k| lower.matches(*k).count()).sum();
        match best {
            Some((_, top)) if hits <= top => {}
            _ if hits > 0 => best = Some((*niche, hits)),
            _ => {}
        }
    }

    match best {
        Some((niche, _)) => niche.to_string(),
        None => "general".to_string(),
    }
}
