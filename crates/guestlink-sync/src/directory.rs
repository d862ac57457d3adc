use crate::error::{Result, SyncError};
use crate::vcf::parse_vcf;
use guestlink_core::{Candidate, PhoneNormalizer};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

const VCF_EXTENSION: &str = ".vcf";
// Sample exports shipped next to real ones are never loaded.
const EXAMPLE_MARKER: &str = "example.vcf";

#[derive(Debug, Clone, Default, Serialize)]
pub struct CandidateLoad {
    pub candidates: Vec<Candidate>,
    pub files: usize,
    pub skipped: usize,
    pub warnings: Vec<String>,
}

/// Loads every vCard file in `dir` into candidates with normalized phones.
///
/// Files are read in name order so candidate order is stable between runs.
/// Cards without a name or without any usable phone are skipped.
pub fn load_directory(dir: &Path, normalizer: &PhoneNormalizer) -> Result<CandidateLoad> {
    let mut load = CandidateLoad::default();

    for path in vcf_files(dir)? {
        let data = fs::read_to_string(&path).map_err(|source| SyncError::Read {
            path: path.clone(),
            source,
        })?;
        let parsed = parse_vcf(&data);
        load.files += 1;
        load.skipped += parsed.skipped;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        load.warnings.extend(
            parsed
                .warnings
                .into_iter()
                .map(|warning| format!("{file_name}: {warning}")),
        );

        for contact in parsed.contacts {
            let phones: Vec<String> = contact
                .phones
                .iter()
                .map(|raw| normalizer.normalize(raw))
                .filter(|phone| !phone.is_empty())
                .collect();
            if phones.is_empty() {
                load.skipped += 1;
                load.warnings.push(format!(
                    "{file_name}: no phone number for {}; skipping",
                    contact.display_name
                ));
                continue;
            }
            load.candidates
                .push(Candidate::new(contact.display_name, phones));
        }
    }

    Ok(load)
}

fn vcf_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|source| SyncError::Read {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_lowercase();
        if name.ends_with(VCF_EXTENSION) && !name.contains(EXAMPLE_MARKER) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
