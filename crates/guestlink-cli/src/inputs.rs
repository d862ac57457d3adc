use anyhow::{Context as _, Result};
use std::fs;
use std::path::Path;

/// One guest-list entry per non-blank line, trimmed.
pub fn read_names(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("read names file {}", path.display()))?;
    Ok(parse_names(&content))
}

pub fn parse_names(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn read_message(path: &Path) -> Result<String> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("read message template {}", path.display()))?;
    Ok(content.trim().to_string())
}
