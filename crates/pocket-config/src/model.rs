use serde::{de::Deserializer, Deserialize, Serialize};
use std::{fmt, path::PathBuf};

use crate::ConfigError;

const APP_DIR_NAME: &str = "PocketLedger";

/// Stores user preferences and where ledger data lives on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub locale: String,
    #[serde(default)]
    pub theme: Theme,
    /// Currency proposed when creating a new profile.
    #[serde(default = "Config::default_currency_value")]
    pub default_currency: String,
    #[serde(default = "Config::default_country_code_value")]
    pub default_country_code: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for the profile book. Defaults to `~/Documents/PocketLedger`.
    pub data_root: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_root: Option<PathBuf>,

    #[serde(default = "Config::default_backup_retention")]
    pub backup_retention: usize,

    /// `tracing` filter directive, e.g. `pocket_ledger=debug`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "es-ES".into(),
            theme: Theme::default(),
            default_currency: Self::default_currency_value(),
            default_country_code: Self::default_country_code_value(),
            data_root: None,
            backup_root: None,
            backup_retention: Self::default_backup_retention(),
            log_filter: None,
        }
    }
}

impl Config {
    pub fn default_currency_value() -> String {
        "EUR".into()
    }

    pub fn default_country_code_value() -> String {
        "ES".into()
    }

    pub fn default_backup_retention() -> usize {
        5
    }

    pub fn resolve_data_root(&self) -> PathBuf {
        if let Some(path) = &self.data_root {
            return path.clone();
        }
        app_base_dir()
    }

    pub fn resolve_backup_root(&self) -> PathBuf {
        if let Some(path) = &self.backup_root {
            return path.clone();
        }
        self.resolve_data_root().join("backups")
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backup_retention == 0 {
            return Err(ConfigError::Invalid(
                "backup_retention must keep at least one backup".into(),
            ));
        }
        if !is_code(&self.default_currency, 3) {
            return Err(ConfigError::Invalid(format!(
                "`{}` is not a three-letter currency code",
                self.default_currency
            )));
        }
        if !is_code(&self.default_country_code, 2) {
            return Err(ConfigError::Invalid(format!(
                "`{}` is not a two-letter country code",
                self.default_country_code
            )));
        }
        Ok(())
    }
}

fn app_base_dir() -> PathBuf {
    let base = dirs::document_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    base.join(APP_DIR_NAME)
}

fn is_code(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_alphabetic())
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    fn from_value(value: Option<String>) -> Self {
        value
            .map(|v| Theme::from_str(v.trim()))
            .unwrap_or_default()
    }

    /// Anything other than `dark` falls back to the light theme.
    pub fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Light
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        };
        f.write_str(label)
    }
}

impl<'de> Deserialize<'de> for Theme {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(Theme::from_value(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_theme_falls_back_to_light() {
        let config: Config =
            serde_json::from_str(r#"{"locale":"es-ES","theme":"sepia"}"#).unwrap();
        assert_eq!(config.theme, Theme::Light);
        assert_eq!(config.backup_retention, 5);

        let config: Config = serde_json::from_str(r#"{"locale":"es-ES","theme":null}"#).unwrap();
        assert_eq!(config.theme, Theme::Light);
    }

    #[test]
    fn backup_root_follows_custom_data_root() {
        let mut config = Config::default();
        config.data_root = Some(PathBuf::from("/tmp/pocket"));
        assert_eq!(config.resolve_backup_root(), PathBuf::from("/tmp/pocket/backups"));
    }

    #[test]
    fn validation_rejects_bad_codes() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());
        config.default_currency = "EURO".into();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
