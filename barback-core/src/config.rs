//! Engine configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::alternates::AlternateNames;
use crate::catalog::{CocktailDbClient, DEFAULT_BASE_URL};
use crate::error::{CatalogError, TableError};
use crate::http::ReqwestClient;
use crate::vocabulary::Vocabulary;

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue { var: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarbackConfig {
    /// Base URL of the TheCocktailDB-compatible API.
    pub catalog_url: String,
    pub timeout: Duration,
    /// Milliseconds between requests to the same host; 0 disables.
    pub rate_limit_ms: u64,
    /// Replacement vocabulary file (another display locale).
    pub vocabulary_path: Option<PathBuf>,
    /// Replacement alternate-name file.
    pub alternates_path: Option<PathBuf>,
    /// Preferred localized instructions, e.g. "DE".
    pub instructions_locale: Option<String>,
}

impl Default for BarbackConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            rate_limit_ms: 0,
            vocabulary_path: None,
            alternates_path: None,
            instructions_locale: None,
        }
    }
}

impl BarbackConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `BARBACK_CATALOG_URL`: API base URL (default: TheCocktailDB v1 test key)
    /// - `BARBACK_HTTP_TIMEOUT_SECS`: request timeout (default: 30)
    /// - `BARBACK_RATE_LIMIT_MS`: delay between requests to one host (default: 0)
    /// - `BARBACK_VOCABULARY`: path to a vocabulary JSON file
    /// - `BARBACK_ALTERNATES`: path to an alternates JSON file
    /// - `BARBACK_INSTRUCTIONS_LOCALE`: preferred instructions language, e.g. "DE"
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let timeout = match non_empty("BARBACK_HTTP_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(parse_u64("BARBACK_HTTP_TIMEOUT_SECS", &v)?),
            None => defaults.timeout,
        };

        let rate_limit_ms = match non_empty("BARBACK_RATE_LIMIT_MS") {
            Some(v) => parse_u64("BARBACK_RATE_LIMIT_MS", &v)?,
            None => defaults.rate_limit_ms,
        };

        Ok(Self {
            catalog_url: non_empty("BARBACK_CATALOG_URL").unwrap_or(defaults.catalog_url),
            timeout,
            rate_limit_ms,
            vocabulary_path: non_empty("BARBACK_VOCABULARY").map(PathBuf::from),
            alternates_path: non_empty("BARBACK_ALTERNATES").map(PathBuf::from),
            instructions_locale: non_empty("BARBACK_INSTRUCTIONS_LOCALE"),
        })
    }

    pub fn load_vocabulary(&self) -> Result<Vocabulary, TableError> {
        match &self.vocabulary_path {
            Some(path) => Vocabulary::from_path(path),
            None => Ok(Vocabulary::builtin().clone()),
        }
    }

    pub fn load_alternates(&self) -> Result<AlternateNames, TableError> {
        match &self.alternates_path {
            Some(path) => AlternateNames::from_path(path),
            None => Ok(AlternateNames::builtin().clone()),
        }
    }

    /// HTTP-backed catalog client for this configuration.
    pub fn catalog_client(&self) -> Result<CocktailDbClient, CatalogError> {
        let http = ReqwestClient::builder()
            .timeout(self.timeout)
            .rate_limit_ms(self.rate_limit_ms)
            .build()?;
        Ok(CocktailDbClient::with_base_url(Arc::new(http), &self.catalog_url)
            .instructions_locale(self.instructions_locale.clone()))
    }
}

fn parse_u64(var: &str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue {
            var: var.to_string(),
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_vars(vars: &[(&str, &str)]) -> Result<BarbackConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        BarbackConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = from_vars(&[]).unwrap();
        assert_eq!(config, BarbackConfig::default());
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_overrides() {
        let config = from_vars(&[
            ("BARBACK_CATALOG_URL", "http://localhost:8080/api"),
            ("BARBACK_HTTP_TIMEOUT_SECS", "5"),
            ("BARBACK_RATE_LIMIT_MS", " 250 "),
            ("BARBACK_VOCABULARY", "/etc/barback/de.json"),
            ("BARBACK_ALTERNATES", ""),
        ])
        .unwrap();
        assert_eq!(config.catalog_url, "http://localhost:8080/api");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.rate_limit_ms, 250);
        assert_eq!(config.vocabulary_path, Some(PathBuf::from("/etc/barback/de.json")));
        assert_eq!(config.alternates_path, None);
    }

    #[test]
    fn test_invalid_number() {
        assert_eq!(
            from_vars(&[("BARBACK_RATE_LIMIT_MS", "fast")]),
            Err(ConfigError::InvalidValue {
                var: "BARBACK_RATE_LIMIT_MS".to_string(),
                value: "fast".to_string(),
            })
        );
    }

    #[test]
    fn test_missing_vocabulary_file() {
        let config = BarbackConfig {
            vocabulary_path: Some(PathBuf::from("/nonexistent/vocabulary.json")),
            ..BarbackConfig::default()
        };
        assert!(matches!(config.load_vocabulary(), Err(TableError::Io { .. })));
        assert!(config.load_alternates().is_ok());
    }
}
