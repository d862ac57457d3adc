use crate::domain::candidate::Match;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedContact {
    #[serde(rename = "match")]
    pub matched: Match,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedGroup {
    pub original_entry: String,
    pub is_group: bool,
    // Ordered by the position of the sub-name within `original_entry`.
    pub contacts: Vec<ResolvedContact>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    NoMatches,
    UserSkipped,
    NoPhone,
}

impl SkipReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            SkipReason::NoMatches => "no-matches",
            SkipReason::UserSkipped => "user-skipped",
            SkipReason::NoPhone => "no-phone",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkipRecord {
    pub name: String,
    pub reason: SkipReason,
}

impl SkipRecord {
    pub fn new(name: impl Into<String>, reason: SkipReason) -> Self {
        Self {
            name: name.into(),
            reason,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Resolution {
    pub resolved: Vec<ResolvedGroup>,
    pub skipped: Vec<SkipRecord>,
}

impl Resolution {
    pub fn skipped_with(&self, reason: SkipReason) -> impl Iterator<Item = &SkipRecord> {
        self.skipped
            .iter()
            .filter(move |record| record.reason == reason)
    }
}
