pub mod matcher;
pub mod similarity;

pub use matcher::{NameMatcher, BROAD_LIMIT, CONFIDENT_LIMIT, HIGH_CONFIDENCE};
pub use similarity::{confidence, is_similar, levenshtein_similarity, SIMILARITY_THRESHOLD};
