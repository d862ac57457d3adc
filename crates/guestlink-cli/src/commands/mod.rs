use anyhow::{Context as _, Result};
use guestlink_config::AppConfig;
use guestlink_core::NameMatcher;
use guestlink_sync::{CandidateLoad, CandidateSource, VcfDirectorySource};
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, warn};

pub mod build;
pub mod completions;
pub mod contacts;
pub mod lookup;

pub struct Context<'a> {
    pub json: bool,
    pub config: &'a AppConfig,
}

impl Context<'_> {
    /// Loads the address book from `vcards` or the configured directory.
    pub fn load_candidates(&self, vcards: Option<&Path>) -> Result<CandidateLoad> {
        let dir = vcards.unwrap_or(self.config.inputs.vcards_dir.as_path());
        let source = VcfDirectorySource::new(dir, self.config.phone.clone());
        let load = source
            .load_candidates()
            .with_context(|| format!("load contacts from {}", dir.display()))?;

        for warning in &load.warnings {
            warn!(source = source.source_name(), "{warning}");
        }
        debug!(
            files = load.files,
            contacts = load.candidates.len(),
            skipped = load.skipped,
            "contacts loaded"
        );
        Ok(load)
    }

    pub fn load_matcher(&self, vcards: Option<&Path>) -> Result<NameMatcher> {
        let load = self.load_candidates(vcards)?;
        Ok(NameMatcher::new(load.candidates))
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
