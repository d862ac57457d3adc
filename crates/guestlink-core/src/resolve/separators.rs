use crate::error::CoreError;
use regex::Regex;
use std::sync::LazyLock;

pub const DEFAULT_SEPARATORS: [&str; 2] = [",", " e "];

// Escaped alternation of DEFAULT_SEPARATORS.
static DEFAULT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(",| e ").expect("default separator pattern"));

/// Literal delimiters that mark a guest-list entry as a group.
///
/// All separators are compiled into a single alternation so an entry is split
/// in one pass. Separators are escaped; they never act as regex syntax.
#[derive(Debug, Clone)]
pub struct Separators {
    items: Vec<String>,
    pattern: Option<Regex>,
}

impl Separators {
    pub fn new(items: Vec<String>) -> Result<Self, CoreError> {
        if items.iter().any(|item| item.is_empty()) {
            return Err(CoreError::EmptySeparator);
        }

        let pattern = if items.is_empty() {
            None
        } else {
            let alternation = items
                .iter()
                .map(|item| regex::escape(item))
                .collect::<Vec<_>>()
                .join("|");
            let regex = Regex::new(&alternation)
                .map_err(|err| CoreError::InvalidSeparators(err.to_string()))?;
            Some(regex)
        };

        Ok(Self { items, pattern })
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    pub fn is_group(&self, entry: &str) -> bool {
        self.items.iter().any(|item| entry.contains(item.as_str()))
    }

    /// Splits `entry` into trimmed sub-names. Empty pieces are dropped.
    pub fn split_entry(&self, entry: &str) -> (bool, Vec<String>) {
        let pattern = match &self.pattern {
            Some(pattern) if self.is_group(entry) => pattern,
            _ => return (false, vec![entry.to_string()]),
        };

        let names = pattern
            .split(entry)
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .map(str::to_string)
            .collect();
        (true, names)
    }
}

impl Default for Separators {
    fn default() -> Self {
        Self {
            items: DEFAULT_SEPARATORS.iter().map(|s| s.to_string()).collect(),
            pattern: Some(DEFAULT_PATTERN.clone()),
        }
    }
}

/// Removes a parenthesized note such as `"John (bring a gift)"` -> `"John"`.
///
/// Everything from the first `(` to the last `)` goes, along with the
/// whitespace on either side of it. The remaining text is joined as is, so
/// `"Ana (prima) Costa"` becomes `"AnaCosta"`.
pub fn strip_annotation(name: &str) -> String {
    let Some(open) = name.find('(') else {
        return name.trim().to_string();
    };
    let Some(close) = name.rfind(')').filter(|close| *close > open) else {
        return name.trim().to_string();
    };

    let before = name[..open].trim_end();
    let after = name[close + 1..].trim_start();
    format!("{before}{after}").trim().to_string()
}
