use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use guestlink_core::domain::phone::{DEFAULT_COUNTRY_CODE, DEFAULT_COUNTRY_CODES};
use guestlink_core::{CoreError, PhoneNormalizer, Separators};
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "guestlink";
const CONFIG_FILENAME: &str = "config.toml";

pub const SEPARATORS_ENV: &str = "GUESTLINK_GROUP_SEPARATORS";
pub const COUNTRY_CODES_ENV: &str = "GUESTLINK_COUNTRY_CODES";

pub const DEFAULT_NAMES_PATH: &str = "data/names.txt";
pub const DEFAULT_VCARDS_DIR: &str = "data/vcards";
pub const DEFAULT_INDIVIDUAL_MESSAGE_PATH: &str = "data/individual_message.txt";
pub const DEFAULT_GROUP_MESSAGE_PATH: &str = "data/group_message.txt";
pub const DEFAULT_OUTPUT_PATH: &str = "dist/index.html";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub separators: Separators,
    pub phone: PhoneNormalizer,
    pub inputs: InputsConfig,
    pub output: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputsConfig {
    pub names: PathBuf,
    pub vcards_dir: PathBuf,
    pub individual_message: PathBuf,
    pub group_message: PathBuf,
}

impl Default for InputsConfig {
    fn default() -> Self {
        Self {
            names: PathBuf::from(DEFAULT_NAMES_PATH),
            vcards_dir: PathBuf::from(DEFAULT_VCARDS_DIR),
            individual_message: PathBuf::from(DEFAULT_INDIVIDUAL_MESSAGE_PATH),
            group_message: PathBuf::from(DEFAULT_GROUP_MESSAGE_PATH),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            separators: Separators::default(),
            phone: PhoneNormalizer::default(),
            inputs: InputsConfig::default(),
            output: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("invalid separators: {0}")]
    InvalidSeparators(#[source] CoreError),
    #[error("invalid phone settings: {0}")]
    InvalidPhone(#[source] CoreError),
    #[error("invalid {field}: path cannot be empty")]
    EmptyPath { field: &'static str },
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    separators: Option<Vec<String>>,
    phone: Option<PhoneFile>,
    inputs: Option<InputsFile>,
    output: Option<OutputFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PhoneFile {
    country_codes: Option<Vec<String>>,
    default_country_code: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct InputsFile {
    names: Option<PathBuf>,
    vcards_dir: Option<PathBuf>,
    individual_message: Option<PathBuf>,
    group_message: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct OutputFile {
    path: Option<PathBuf>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    load_with_env(config_path, |key| env::var(key).ok())
}

/// Loads the config file (if any) and applies overrides from `lookup`.
pub fn load_with_env<F>(config_path: Option<PathBuf>, lookup: F) -> Result<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let required = config_path.is_some();
    let parsed = match resolve_config_path(config_path) {
        Ok(path) => load_at_path(&path, required)?,
        Err(ConfigError::MissingHomeDir) if !required => None,
        Err(ConfigError::InvalidConfigPath(_)) if !required => None,
        Err(err) => return Err(err),
    };
    merge_config(parsed.unwrap_or_default(), lookup)
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<ConfigFile>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(parsed))
}

fn merge_config<F>(parsed: ConfigFile, lookup: F) -> Result<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = AppConfig::default();

    // Separators are literal and may carry meaningful spaces (" e "), so the
    // environment value is split on '|' without trimming.
    let separators = match lookup(SEPARATORS_ENV) {
        Some(raw) => Some(raw.split('|').map(str::to_string).collect::<Vec<_>>()),
        None => parsed.separators,
    };
    if let Some(items) = separators {
        config.separators = Separators::new(items).map_err(ConfigError::InvalidSeparators)?;
    }

    let phone = parsed.phone;
    let mut country_codes = phone.as_ref().and_then(|p| p.country_codes.clone());
    if let Some(raw) = lookup(COUNTRY_CODES_ENV) {
        country_codes = Some(
            raw.split(',')
                .map(str::trim)
                .filter(|code| !code.is_empty())
                .map(str::to_string)
                .collect(),
        );
    }
    let default_country_code = phone.and_then(|p| p.default_country_code);
    if country_codes.is_some() || default_country_code.is_some() {
        let codes = country_codes.unwrap_or_else(|| {
            DEFAULT_COUNTRY_CODES
                .iter()
                .map(|code| code.to_string())
                .collect()
        });
        let default_code = default_country_code.unwrap_or_else(|| DEFAULT_COUNTRY_CODE.to_string());
        config.phone =
            PhoneNormalizer::new(codes, default_code).map_err(ConfigError::InvalidPhone)?;
    }

    if let Some(inputs) = parsed.inputs {
        if let Some(path) = inputs.names {
            config.inputs.names = non_empty_path("inputs.names", path)?;
        }
        if let Some(path) = inputs.vcards_dir {
            config.inputs.vcards_dir = non_empty_path("inputs.vcards_dir", path)?;
        }
        if let Some(path) = inputs.individual_message {
            config.inputs.individual_message = non_empty_path("inputs.individual_message", path)?;
        }
        if let Some(path) = inputs.group_message {
            config.inputs.group_message = non_empty_path("inputs.group_message", path)?;
        }
    }

    if let Some(path) = parsed.output.and_then(|output| output.path) {
        config.output = non_empty_path("output.path", path)?;
    }

    Ok(config)
}

fn non_empty_path(field: &'static str, path: PathBuf) -> Result<PathBuf> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::EmptyPath { field });
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::{
        load_at_path, load_with_env, merge_config, ConfigError, ConfigFile, InputsFile, PhoneFile,
        COUNTRY_CODES_ENV, SEPARATORS_ENV,
    };
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn no_env(_key: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_without_file() {
        let config = merge_config(ConfigFile::default(), no_env).expect("merge");
        assert_eq!(
            config.separators.as_slice(),
            &[",".to_string(), " e ".to_string()]
        );
        assert_eq!(config.phone.default_country_code(), "55");
        assert_eq!(config.phone.country_codes().len(), 3);
        assert_eq!(config.inputs.names, PathBuf::from("data/names.txt"));
        assert_eq!(config.output, PathBuf::from("dist/index.html"));
    }

    #[test]
    fn merge_config_applies_values() {
        let parsed = ConfigFile {
            separators: Some(vec![" & ".to_string(), ";".to_string()]),
            phone: Some(PhoneFile {
                country_codes: Some(vec!["1".to_string()]),
                default_country_code: Some("49".to_string()),
            }),
            inputs: Some(InputsFile {
                names: Some(PathBuf::from("guests.txt")),
                vcards_dir: None,
                individual_message: None,
                group_message: None,
            }),
            output: None,
        };
        let merged = merge_config(parsed, no_env).expect("merge");
        assert_eq!(merged.separators.as_slice(), &[" & ".to_string(), ";".to_string()]);
        assert_eq!(merged.phone.normalize("3012345678"), "+493012345678");
        assert_eq!(merged.inputs.names, PathBuf::from("guests.txt"));
        assert_eq!(merged.inputs.vcards_dir, PathBuf::from("data/vcards"));
    }

    #[test]
    fn environment_overrides_file_values() {
        let parsed = ConfigFile {
            separators: Some(vec![";".to_string()]),
            ..ConfigFile::default()
        };
        let merged = merge_config(parsed, |key| match key {
            SEPARATORS_ENV => Some(", | e ".to_string()),
            COUNTRY_CODES_ENV => Some(" 44, 1 ".to_string()),
            _ => None,
        })
        .expect("merge");
        assert_eq!(merged.separators.as_slice(), &[", ".to_string(), " e ".to_string()]);
        assert_eq!(merged.phone.country_codes(), &["44".to_string(), "1".to_string()]);
        assert_eq!(merged.phone.default_country_code(), "55");
    }

    #[test]
    fn empty_separator_is_a_config_error() {
        let err = merge_config(ConfigFile::default(), |key| {
            (key == SEPARATORS_ENV).then(|| ",||;".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSeparators(_)));
    }

    #[test]
    fn invalid_country_code_is_a_config_error() {
        let parsed = ConfigFile {
            phone: Some(PhoneFile {
                country_codes: Some(vec!["+55".to_string()]),
                default_country_code: None,
            }),
            ..ConfigFile::default()
        };
        let err = merge_config(parsed, no_env).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPhone(_)));
    }

    #[test]
    fn load_at_path_requires_file_when_requested() {
        let temp = TempDir::new().expect("tempdir");
        let missing = temp.path().join("config.toml");
        let err = load_at_path(&missing, true).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn load_parses_toml() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "separators = [\",\", \" and \"]\n\n[phone]\ndefault_country_code = \"372\"\n\n[output]\npath = \"out/invites.html\"\n",
        )
        .expect("write config");

        let config = load_with_env(Some(path), no_env).expect("load");
        assert_eq!(config.separators.as_slice(), &[",".to_string(), " and ".to_string()]);
        assert_eq!(config.phone.default_country_code(), "372");
        assert_eq!(config.output, PathBuf::from("out/invites.html"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "seperators = [\",\"]\n").expect("write config");
        let err = load_with_env(Some(path), no_env).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
