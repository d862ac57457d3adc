/// Lowercases and trims a name for comparison. Accents are kept.
pub fn normalize_name(raw: &str) -> String {
    raw.trim().to_lowercase()
}
