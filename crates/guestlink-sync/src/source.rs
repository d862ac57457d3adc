use crate::directory::{load_directory, CandidateLoad};
use crate::Result;
use guestlink_core::PhoneNormalizer;
use std::path::PathBuf;

/// Anything that can produce the address book for a run.
pub trait CandidateSource {
    fn source_name(&self) -> &'static str;
    fn load_candidates(&self) -> Result<CandidateLoad>;
}

#[derive(Debug, Clone)]
pub struct VcfDirectorySource {
    dir: PathBuf,
    normalizer: PhoneNormalizer,
}

impl VcfDirectorySource {
    pub fn new(dir: impl Into<PathBuf>, normalizer: PhoneNormalizer) -> Self {
        Self {
            dir: dir.into(),
            normalizer,
        }
    }
}

impl CandidateSource for VcfDirectorySource {
    fn source_name(&self) -> &'static str {
        "vcf-directory"
    }

    fn load_candidates(&self) -> Result<CandidateLoad> {
        load_directory(&self.dir, &self.normalizer)
    }
}
