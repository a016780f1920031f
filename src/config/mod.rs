use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{errors::TrackerError, utils::paths, view::NumberFormat};

const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// Display preferences for the shell.
///
/// Setting `locale` resets both separators to that locale's defaults; the
/// separators can still be overridden afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub locale: String,
    #[serde(default = "Config::default_decimal_separator")]
    pub decimal_separator: char,
    #[serde(default = "Config::default_grouping_separator")]
    pub grouping_separator: char,
    #[serde(default)]
    pub plain_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            decimal_separator: Self::default_decimal_separator(),
            grouping_separator: Self::default_grouping_separator(),
            plain_mode: false,
        }
    }
}

impl Config {
    pub const KEYS: [&'static str; 4] =
        ["locale", "decimal_separator", "grouping_separator", "plain_mode"];

    fn default_decimal_separator() -> char {
        '.'
    }

    fn default_grouping_separator() -> char {
        ','
    }

    pub fn number_format(&self) -> NumberFormat {
        NumberFormat {
            decimal_separator: self.decimal_separator,
            grouping_separator: self.grouping_separator,
        }
    }

    /// Updates one setting from its textual form, keeping the separators distinct.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), TrackerError> {
        match key {
            "locale" => {
                let locale = value.trim();
                if locale.is_empty() {
                    return Err(TrackerError::Config("locale cannot be empty".into()));
                }
                let (decimal, grouping) = separators_for(locale);
                self.locale = locale.to_string();
                self.decimal_separator = decimal;
                self.grouping_separator = grouping;
            }
            "decimal_separator" => {
                let separator = single_char(key, value)?;
                ensure_distinct(separator, self.grouping_separator)?;
                self.decimal_separator = separator;
            }
            "grouping_separator" => {
                let separator = single_char(key, value)?;
                ensure_distinct(self.decimal_separator, separator)?;
                self.grouping_separator = separator;
            }
            "plain_mode" => {
                self.plain_mode = parse_flag(value)?;
            }
            other => {
                return Err(TrackerError::Config(format!(
                    "unknown setting `{other}` (expected one of: {})",
                    Self::KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "locale" => Some(self.locale.clone()),
            "decimal_separator" => Some(self.decimal_separator.to_string()),
            "grouping_separator" => Some(self.grouping_separator.to_string()),
            "plain_mode" => Some(self.plain_mode.to_string()),
            _ => None,
        }
    }
}

/// Decimal and grouping separators conventionally used by a locale's language.
pub fn separators_for(locale: &str) -> (char, char) {
    let language = locale
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    match language.as_str() {
        "de" | "es" | "it" | "nl" | "pt" | "da" | "id" | "tr" => (',', '.'),
        "fr" | "pl" | "cs" | "sv" | "nb" | "fi" | "ru" | "uk" => (',', ' '),
        _ => ('.', ','),
    }
}

fn single_char(key: &str, value: &str) -> Result<char, TrackerError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) if !ch.is_ascii_digit() => Ok(ch),
        _ => Err(TrackerError::Config(format!(
            "`{key}` must be a single non-digit character"
        ))),
    }
}

fn ensure_distinct(decimal: char, grouping: char) -> Result<(), TrackerError> {
    if decimal == grouping {
        return Err(TrackerError::Config(
            "decimal and grouping separators must differ".into(),
        ));
    }
    Ok(())
}

fn parse_flag(value: &str) -> Result<bool, TrackerError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        other => Err(TrackerError::Config(format!("`{other}` is not a boolean"))),
    }
}

/// Loads and saves [`Config`] under the application home directory.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, TrackerError> {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, TrackerError> {
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    /// Reads the config file, falling back to defaults when it does not exist.
    pub fn load(&self) -> Result<Config, TrackerError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), TrackerError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_file(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), "config saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<(), TrackerError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
