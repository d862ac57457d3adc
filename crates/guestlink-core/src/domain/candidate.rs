use serde::{Deserialize, Serialize};

/// An address-book entry available for matching. The first phone is the
/// default choice when no disambiguation is needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    pub phones: Vec<String>,
}

impl Candidate {
    pub fn new(name: impl Into<String>, phones: Vec<String>) -> Self {
        Self {
            name: name.into(),
            phones,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Match {
    pub name: String,
    pub phones: Vec<String>,
    pub confidence: f64,
}

impl Match {
    pub fn default_phone(&self) -> Option<&str> {
        self.phones.first().map(String::as_str)
    }
}
