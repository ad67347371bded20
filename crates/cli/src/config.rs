//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `HPANEL_CATALOG` - Path to a YAML price list (default: built-in catalog)
//! - `HPANEL_FORMAT` - Quote output, `text` or `json` (default: text)
//! - `HPANEL_LOG_FORMAT` - Log output on stderr, `pretty` or `json` (default: pretty)
//! - `RUST_LOG` - Log filter (default: `hostpanel_cli=info`)
//!
//! Command-line flags take precedence over the environment.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use hostpanel_core::{Catalog, CatalogError};
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Catalog file not found: {0}")]
    CatalogNotFound(PathBuf),
    #[error("Failed to read catalog {0}: {1}")]
    Read(PathBuf, std::io::Error),
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid catalog: {0}")]
    Invalid(#[from] CatalogError),
}

/// How quotes are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// How logs are written to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// CLI configuration.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// YAML catalog to load instead of the built-in one
    pub catalog_path: Option<PathBuf>,
    /// Quote output format
    pub format: OutputFormat,
    /// Log output format
    pub log_format: LogFormat,
}

impl CliConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a variable has an unknown value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a variable has an unknown value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let catalog_path = lookup("HPANEL_CATALOG")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let format = match lookup("HPANEL_FORMAT").as_deref() {
            None | Some("text") => OutputFormat::Text,
            Some("json") => OutputFormat::Json,
            Some(other) => {
                return Err(ConfigError::InvalidEnvVar(
                    "HPANEL_FORMAT".to_string(),
                    format!("expected text or json, got {other}"),
                ));
            }
        };

        let log_format = match lookup("HPANEL_LOG_FORMAT").as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::InvalidEnvVar(
                    "HPANEL_LOG_FORMAT".to_string(),
                    format!("expected pretty or json, got {other}"),
                ));
            }
        };

        Ok(Self {
            catalog_path,
            format,
            log_format,
        })
    }

    /// Load the configured catalog, or the built-in one if none is set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is missing, unreadable, not valid
    /// YAML, or fails catalog validation.
    pub fn load_catalog(&self) -> Result<Catalog, ConfigError> {
        match &self.catalog_path {
            Some(path) => load_catalog_file(path),
            None => Ok(Catalog::standard()),
        }
    }
}

/// Read and validate a YAML catalog file.
///
/// # Errors
///
/// See [`CliConfig::load_catalog`].
pub fn load_catalog_file(path: &Path) -> Result<Catalog, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::CatalogNotFound(path.to_path_buf()));
    }

    let content =
        std::fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
    let catalog = parse_catalog(&content)?;

    tracing::debug!(
        path = %path.display(),
        tlds = catalog.tlds.len(),
        plans = catalog.hosting_plans.len(),
        "Loaded catalog"
    );

    Ok(catalog)
}

/// Parse and validate a YAML catalog.
///
/// # Errors
///
/// Returns `ConfigError::Parse` or `ConfigError::Invalid`.
pub fn parse_catalog(yaml: &str) -> Result<Catalog, ConfigError> {
    let catalog: Catalog = serde_yaml::from_str(yaml)?;
    catalog.validate()?;
    Ok(catalog)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use hostpanel_core::CurrencyCode;
    use rust_decimal_macros::dec;

    use super::*;

    const EXAMPLE_CATALOG: &str = include_str!("../config/catalog.example.yaml");

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CliConfig::from_lookup(lookup(&[])).unwrap();
        assert!(config.catalog_path.is_none());
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_reads_all_variables() {
        let config = CliConfig::from_lookup(lookup(&[
            ("HPANEL_CATALOG", "/etc/hpanel/catalog.yaml"),
            ("HPANEL_FORMAT", "json"),
            ("HPANEL_LOG_FORMAT", "json"),
        ]))
        .unwrap();
        assert_eq!(
            config.catalog_path,
            Some(PathBuf::from("/etc/hpanel/catalog.yaml"))
        );
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_blank_catalog_path_is_ignored() {
        let config = CliConfig::from_lookup(lookup(&[("HPANEL_CATALOG", "  ")])).unwrap();
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn test_invalid_format() {
        let result = CliConfig::from_lookup(lookup(&[("HPANEL_FORMAT", "xml")]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_missing_catalog_file() {
        let result = load_catalog_file(Path::new("/nonexistent/catalog.yaml"));
        assert!(matches!(result, Err(ConfigError::CatalogNotFound(_))));
    }

    #[test]
    fn test_builtin_catalog_without_path() {
        let catalog = CliConfig::default().load_catalog().unwrap();
        assert_eq!(catalog, Catalog::standard());
    }

    #[test]
    fn test_parse_example_catalog() {
        let catalog = parse_catalog(EXAMPLE_CATALOG).unwrap();
        assert_eq!(catalog.currency, CurrencyCode::BIF);
        assert_eq!(catalog.tld(".bi").unwrap().registration_price, dec!(60000));
        assert_eq!(catalog.discounts.hosting_renewal.len(), 3);
        assert_eq!(catalog.funds_minimum, dec!(10000));
    }

    #[test]
    fn test_parse_rejects_invalid_catalog() {
        let yaml = EXAMPLE_CATALOG.replace("fee_percent: 2.5", "fee_percent: -2.5");
        assert!(matches!(
            parse_catalog(&yaml),
            Err(ConfigError::Invalid(CatalogError::NegativeFee { .. }))
        ));
    }

    #[test]
    fn test_parse_rejects_malformed_yaml() {
        assert!(matches!(
            parse_catalog("tlds: [unterminated"),
            Err(ConfigError::Parse(_))
        ));
    }
}
