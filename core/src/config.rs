//! Environment-driven settings shared by front ends.

use crate::view::{Locale, UnknownLocale};

/// Port 8000 on localhost, where `mock-server` listens by default.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

pub const BASE_URL_VAR: &str = "TODO_API_URL";
pub const LANG_VAR: &str = "TODO_LANG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub locale: Locale,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            locale: Locale::default(),
        }
    }
}

impl Config {
    /// Reads `TODO_API_URL` and `TODO_LANG`, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if `TODO_LANG` names an unsupported locale.
    pub fn from_env() -> Result<Self, UnknownLocale> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, UnknownLocale> {
        let base_url = lookup(BASE_URL_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let locale = match lookup(LANG_VAR) {
            Some(lang) if !lang.trim().is_empty() => lang.parse()?,
            _ => Locale::default(),
        };
        Ok(Self { base_url, locale })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            (BASE_URL_VAR, "http://todo.internal:9000/"),
            (LANG_VAR, "ja"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://todo.internal:9000/");
        assert_eq!(config.locale, Locale::Ja);
    }

    #[test]
    fn unknown_lang_is_an_error() {
        assert!(Config::from_lookup(lookup(&[(LANG_VAR, "xx")])).is_err());
    }
}
