use std::time::Duration;

use crate::kernel::locale::Locale;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug, PartialEq)]
pub struct AssistConfig {
    pub llm_url: String,
    pub llm_timeout: Duration,
    pub primary_locale: Locale,
    pub secondary_locale: Locale,
    pub follow_up_window: Duration,
    pub screen_settle: Duration,
    pub highlight_duration: Duration,
    pub alternate_delimiter: String,
}

impl Default for AssistConfig {
    fn default() -> Self {
        Self {
            llm_url: "http://localhost:8080/assist".to_string(),
            llm_timeout: Duration::from_millis(15_000),
            primary_locale: Locale::Russian,
            secondary_locale: Locale::English,
            follow_up_window: Duration::from_millis(8_000),
            screen_settle: Duration::from_millis(700),
            highlight_duration: Duration::from_millis(2_500),
            alternate_delimiter: "|".to_string(),
        }
    }
}

impl AssistConfig {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary key source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let llm_url = lookup("ASSIST_LLM_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.llm_url);

        let primary_locale = locale_var(&lookup, "ASSIST_PRIMARY_LOCALE", defaults.primary_locale)?;
        let secondary_locale =
            locale_var(&lookup, "ASSIST_SECONDARY_LOCALE", defaults.secondary_locale)?;
        if primary_locale == secondary_locale {
            return Err(ConfigError::InvalidValue(
                "ASSIST_SECONDARY_LOCALE".to_string(),
                format!("must differ from the primary locale {primary_locale}"),
            ));
        }

        // Whitespace is a legitimate delimiter, so no trimming here.
        let alternate_delimiter = match lookup("ASSIST_ALTERNATE_DELIMITER") {
            Some(v) if !v.is_empty() => v,
            Some(_) => {
                return Err(ConfigError::InvalidValue(
                    "ASSIST_ALTERNATE_DELIMITER".to_string(),
                    "must not be empty".to_string(),
                ))
            }
            None => defaults.alternate_delimiter,
        };

        Ok(Self {
            llm_url,
            llm_timeout: millis_var(&lookup, "ASSIST_LLM_TIMEOUT_MS", defaults.llm_timeout)?,
            primary_locale,
            secondary_locale,
            follow_up_window: millis_var(
                &lookup,
                "ASSIST_FOLLOW_UP_WINDOW_MS",
                defaults.follow_up_window,
            )?,
            screen_settle: millis_var(&lookup, "ASSIST_SCREEN_SETTLE_MS", defaults.screen_settle)?,
            highlight_duration: millis_var(
                &lookup,
                "ASSIST_HIGHLIGHT_MS",
                defaults.highlight_duration,
            )?,
            alternate_delimiter,
        })
    }
}

fn millis_var(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: Duration,
) -> Result<Duration, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|e| ConfigError::InvalidValue(key.to_string(), format!("'{raw}': {e}"))),
    }
}

fn locale_var(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: Locale,
) -> Result<Locale, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => Locale::from_tag(&raw).ok_or_else(|| {
            ConfigError::InvalidValue(key.to_string(), format!("'{raw}' is not a supported locale"))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AssistConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AssistConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_config_error_display() {
        let invalid_value =
            ConfigError::InvalidValue("TEST_VAR".to_string(), "bad_value".to_string());
        assert_eq!(
            format!("{}", invalid_value),
            "Invalid value for environment variable TEST_VAR: bad_value"
        );
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = load(&[]).expect("Config should load successfully");
        assert_eq!(config, AssistConfig::default());
        assert_eq!(config.alternate_delimiter, "|");
        assert_eq!(config.llm_timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_custom_values() {
        let config = load(&[
            ("ASSIST_LLM_URL", "https://assist.example/v1"),
            ("ASSIST_LLM_TIMEOUT_MS", "3000"),
            ("ASSIST_PRIMARY_LOCALE", "en"),
            ("ASSIST_SECONDARY_LOCALE", "ru_RU"),
            ("ASSIST_FOLLOW_UP_WINDOW_MS", " 1000 "),
            ("ASSIST_ALTERNATE_DELIMITER", ";"),
        ])
        .expect("Config should load successfully");

        assert_eq!(config.llm_url, "https://assist.example/v1");
        assert_eq!(config.llm_timeout, Duration::from_millis(3000));
        assert_eq!(config.primary_locale, Locale::English);
        assert_eq!(config.secondary_locale, Locale::Russian);
        assert_eq!(config.follow_up_window, Duration::from_millis(1000));
        assert_eq!(config.alternate_delimiter, ";");
    }

    #[test]
    fn test_invalid_timeout() {
        match load(&[("ASSIST_LLM_TIMEOUT_MS", "soon")]) {
            Err(ConfigError::InvalidValue(var, _)) => assert_eq!(var, "ASSIST_LLM_TIMEOUT_MS"),
            other => panic!("Expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn test_locales_must_differ() {
        match load(&[("ASSIST_SECONDARY_LOCALE", "ru")]) {
            Err(ConfigError::InvalidValue(var, _)) => assert_eq!(var, "ASSIST_SECONDARY_LOCALE"),
            other => panic!("Expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_locale() {
        assert!(load(&[("ASSIST_PRIMARY_LOCALE", "de-DE")]).is_err());
    }
}
