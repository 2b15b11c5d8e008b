//! Weather description → playlist search keywords. Pure, no I/O.

/// Appended as the last candidate of every mood query.
pub const FALLBACK_KEYWORD: &str = "relax";

/// Weather-term buckets tested in priority order; the first bucket with a
/// matching substring wins and the rest are skipped.
const MOOD_TABLE: &[(&[&str], &str)] = &[
    (&["clear", "sunny"], "feel-good summer"),
    (&["cloud", "overcast"], "lofi chill"),
    (&["rain", "drizzle", "shower"], "rainy day"),
    (&["snow", "blizzard"], "cozy winter"),
    (&["storm", "thunder", "lightning"], "dark ambient"),
    (&["mist", "fog", "haze"], "ambient calm"),
    (&["wind", "breez"], "upbeat indie"),
];

/// Maps a weather description to an ordered list of search keywords, most
/// specific first. The generic fallback is always the final candidate, so
/// the result is never empty.
pub fn mood_keywords(description: &str) -> Vec<String> {
    let description = description.to_lowercase();
    let mut keywords = Vec::with_capacity(2);

    for (terms, keyword) in MOOD_TABLE {
        if terms.iter().any(|term| description.contains(term)) {
            keywords.push((*keyword).to_string());
            break;
        }
    }

    keywords.push(FALLBACK_KEYWORD.to_string());
    keywords
}
