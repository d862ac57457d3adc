/// Minimum Levenshtein similarity for a candidate to be considered at all.
pub const SIMILARITY_THRESHOLD: f64 = 0.2;

pub const EXACT_CONFIDENCE: f64 = 1.0;
pub const SUBSTRING_CONFIDENCE: f64 = 0.9;

/// `1 - distance / max_len` over chars. Both inputs must not be empty.
pub fn levenshtein_similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return EXACT_CONFIDENCE;
    }
    let distance = strsim::levenshtein(a, b);
    1.0 - distance as f64 / max_len as f64
}

/// Both arguments are expected to be normalized already.
pub fn is_similar(query: &str, candidate: &str) -> bool {
    if query.is_empty() || candidate.is_empty() {
        return false;
    }
    contains_either(query, candidate)
        || levenshtein_similarity(query, candidate) >= SIMILARITY_THRESHOLD
}

pub fn confidence(query: &str, candidate: &str) -> f64 {
    if query == candidate {
        return EXACT_CONFIDENCE;
    }
    if contains_either(query, candidate) {
        return SUBSTRING_CONFIDENCE;
    }
    levenshtein_similarity(query, candidate)
}

pub(crate) fn contains_either(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}
