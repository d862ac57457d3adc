use crate::domain::{normalize_name, Candidate, Match};
use crate::matching::similarity::{confidence, is_similar};

/// Any result at or above this confidence narrows the result list.
pub const HIGH_CONFIDENCE: f64 = 0.5;
pub const CONFIDENT_LIMIT: usize = 3;
pub const BROAD_LIMIT: usize = 5;

/// Ranks address-book candidates against free-text names.
#[derive(Debug, Clone, Default)]
pub struct NameMatcher {
    candidates: Vec<Candidate>,
}

impl NameMatcher {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self { candidates }
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Returns matches in descending confidence; ties keep directory order.
    ///
    /// At most [`CONFIDENT_LIMIT`] results are returned when any match
    /// reaches [`HIGH_CONFIDENCE`], otherwise at most [`BROAD_LIMIT`].
    pub fn find_matches(&self, query: &str) -> Vec<Match> {
        let query = normalize_name(query);

        let mut matches: Vec<Match> = self
            .candidates
            .iter()
            .filter_map(|candidate| {
                let name = normalize_name(&candidate.name);
                if !is_similar(&query, &name) {
                    return None;
                }
                Some(Match {
                    name: candidate.name.clone(),
                    phones: candidate.phones.clone(),
                    confidence: confidence(&query, &name),
                })
            })
            .collect();

        // sort_by is stable, which keeps directory order among equal scores.
        matches.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        let limit = if matches
            .iter()
            .any(|item| item.confidence >= HIGH_CONFIDENCE)
        {
            CONFIDENT_LIMIT
        } else {
            BROAD_LIMIT
        };
        matches.truncate(limit);
        matches
    }
}
