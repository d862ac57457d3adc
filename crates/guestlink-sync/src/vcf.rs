use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VcfContact {
    pub display_name: String,
    // Raw TEL values in card order.
    pub phones: Vec<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ParsedVcf {
    pub contacts: Vec<VcfContact>,
    pub warnings: Vec<String>,
    pub skipped: usize,
}

/// Never fails: malformed cards become warnings or skips.
pub fn parse_vcf(data: &str) -> ParsedVcf {
    let mut parsed = ParsedVcf::default();

    let mut current: Option<RawCard> = None;
    for line in unfold_lines(data) {
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("BEGIN:VCARD") {
            if current.is_some() {
                parsed
                    .warnings
                    .push("nested BEGIN:VCARD encountered".to_string());
            }
            current = Some(RawCard::default());
            continue;
        }

        if trimmed.eq_ignore_ascii_case("END:VCARD") {
            match current.take() {
                Some(card) => card.finish(&mut parsed),
                None => parsed
                    .warnings
                    .push("END:VCARD without matching BEGIN:VCARD".to_string()),
            }
            continue;
        }

        let Some(card) = current.as_mut() else {
            continue;
        };

        let Some((key, raw_value)) = split_property(trimmed) else {
            continue;
        };

        let value = unescape_vcard_value(&raw_value);
        let value = value.trim();
        if value.is_empty() {
            continue;
        }

        match key.as_str() {
            "FN" if card.fn_name.is_none() => card.fn_name = Some(value.to_string()),
            "EMAIL" if card.email.is_none() => card.email = Some(value.to_string()),
            "TEL" => card.phones.push(value.to_string()),
            _ => {}
        }
    }

    if let Some(card) = current.take() {
        parsed
            .warnings
            .push("missing END:VCARD at end of file".to_string());
        card.finish(&mut parsed);
    }

    parsed
}

#[derive(Default)]
struct RawCard {
    fn_name: Option<String>,
    phones: Vec<String>,
    email: Option<String>,
}

impl RawCard {
    fn finish(self, parsed: &mut ParsedVcf) {
        let Some(display_name) = self.fn_name else {
            parsed.warnings.push("missing FN; skipping vCard".to_string());
            parsed.skipped += 1;
            return;
        };

        parsed.contacts.push(VcfContact {
            display_name,
            phones: self.phones,
            email: self.email,
        });
    }
}

fn unfold_lines(input: &str) -> Vec<String> {
    let input = normalize_line_endings(input);
    let mut lines: Vec<String> = Vec::new();
    for line in input.lines() {
        if let Some(rest) = line.strip_prefix(|ch: char| ch == ' ' || ch == '\t') {
            match lines.last_mut() {
                Some(last) => last.push_str(rest),
                None => lines.push(rest.to_string()),
            }
        } else {
            lines.push(line.to_string());
        }
    }
    lines
}

fn normalize_line_endings(input: &str) -> Cow<'_, str> {
    if !input.contains('\r') {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\r' {
            if matches!(chars.peek(), Some('\n')) {
                chars.next();
            }
            out.push('\n');
        } else {
            out.push(ch);
        }
    }
    Cow::Owned(out)
}

/// Splits `item1.TEL;TYPE=CELL:+55 11` into `("TEL", "+55 11")`.
fn split_property(line: &str) -> Option<(String, String)> {
    let (left, value) = line.split_once(':')?;
    let mut name = left.split(';').next()?.trim();
    if let Some((_, grouped)) = name.rsplit_once('.') {
        name = grouped;
    }
    if name.is_empty() {
        return None;
    }
    Some((name.to_ascii_uppercase(), value.to_string()))
}

fn unescape_vcard_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some('n') | Some('N') | Some('r') | Some('R') => out.push('\n'),
                Some(other) => out.push(other),
                None => break,
            }
        } else {
            out.push(ch);
        }
    }
    out
}
