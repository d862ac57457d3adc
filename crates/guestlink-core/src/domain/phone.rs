use crate::error::CoreError;

pub const DEFAULT_COUNTRY_CODES: [&str; 3] = ["55", "372", "358"];
pub const DEFAULT_COUNTRY_CODE: &str = "55";

const NATIONAL_LENGTHS: [usize; 2] = [10, 11];

/// Canonicalizes free-form phone numbers into `+<digits>` form.
///
/// Rules are applied in order, first match wins:
/// a known country-code prefix, then a bare national number (10 or 11
/// digits, default country code prepended), then a long number that already
/// carries an unknown country code. Anything shorter is returned untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNormalizer {
    country_codes: Vec<String>,
    default_country_code: String,
}

impl PhoneNormalizer {
    pub fn new(
        country_codes: Vec<String>,
        default_country_code: impl Into<String>,
    ) -> Result<Self, CoreError> {
        let default_country_code = default_country_code.into();
        validate_country_code(&default_country_code)?;
        for code in &country_codes {
            validate_country_code(code)?;
        }
        Ok(Self {
            country_codes,
            default_country_code,
        })
    }

    pub fn country_codes(&self) -> &[String] {
        &self.country_codes
    }

    pub fn default_country_code(&self) -> &str {
        &self.default_country_code
    }

    pub fn normalize(&self, raw: &str) -> String {
        if raw.is_empty() {
            return String::new();
        }

        let digits = phone_digits(raw);

        if self
            .country_codes
            .iter()
            .any(|code| digits.starts_with(code.as_str()))
        {
            return format!("+{digits}");
        }

        if NATIONAL_LENGTHS.contains(&digits.len()) {
            return format!("+{}{digits}", self.default_country_code);
        }

        if digits.len() > NATIONAL_LENGTHS[1] {
            if raw.starts_with('+') {
                return raw.to_string();
            }
            return format!("+{digits}");
        }

        raw.to_string()
    }
}

impl Default for PhoneNormalizer {
    fn default() -> Self {
        Self {
            country_codes: DEFAULT_COUNTRY_CODES
                .iter()
                .map(|code| code.to_string())
                .collect(),
            default_country_code: DEFAULT_COUNTRY_CODE.to_string(),
        }
    }
}

pub fn normalize_phone(raw: &str) -> String {
    PhoneNormalizer::default().normalize(raw)
}

pub fn phone_digits(raw: &str) -> String {
    raw.chars().filter(|ch| ch.is_ascii_digit()).collect()
}

fn validate_country_code(code: &str) -> Result<(), CoreError> {
    if code.is_empty() || !code.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(CoreError::InvalidCountryCode(code.to_string()));
    }
    Ok(())
}
