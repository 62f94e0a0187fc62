//! Dashboard configuration loaded from TOML.
//!
//! Lookup order for the file is `--config`, then `HOUSE_INSIGHTS_CONFIG`,
//! then built-in defaults. Every key is optional.
//!
//! ```toml
//! dataset = "data/house-data.csv"
//! sample_cap = 500
//! page_size = 10
//! top_zipcodes = 10
//! theme = "color"
//!
//! [bedroom_display]
//! min = 1
//! max = 6
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "HOUSE_INSIGHTS_CONFIG";
/// Environment variable naming the dataset file.
pub const DATA_ENV: &str = "HOUSE_INSIGHTS_DATA";

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path that caused the error.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`DashboardConfig`].
    #[error("Invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    /// No dataset path was given anywhere.
    #[error("No dataset configured: pass --data, set {DATA_ENV}, or set `dataset` in the config")]
    MissingDataset,
}

/// Output styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    /// No styling.
    #[default]
    Plain,
    /// Bold, colored headings.
    Color,
}

/// Inclusive bedroom range shown by the bedrooms view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BedroomDisplay {
    /// Smallest bedroom count shown.
    pub min: u32,
    /// Largest bedroom count shown.
    pub max: u32,
}

impl Default for BedroomDisplay {
    fn default() -> Self {
        Self { min: 1, max: 6 }
    }
}

impl BedroomDisplay {
    /// Whether `bedrooms` is inside the display range.
    #[must_use]
    pub const fn contains(&self, bedrooms: u32) -> bool {
        bedrooms >= self.min && bedrooms <= self.max
    }
}

/// Presentation settings for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Path to the dataset CSV.
    pub dataset: Option<PathBuf>,
    /// Maximum points in the price-vs-area sample.
    pub sample_cap: usize,
    /// Rows per property-table page.
    pub page_size: usize,
    /// Entries in the top-zipcode views.
    pub top_zipcodes: usize,
    /// Bedroom counts shown by the bedrooms view.
    pub bedroom_display: BedroomDisplay,
    /// Output styling.
    pub theme: Theme,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset: None,
            sample_cap: house_insights_analytics::SAMPLE_CAP,
            page_size: 10,
            top_zipcodes: 10,
            bedroom_display: BedroomDisplay::default(),
            theme: Theme::default(),
        }
    }
}

impl DashboardConfig {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] if the document is malformed.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::de::from_str(text)?)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&text)
    }

    /// Loads from `path`, else from [`CONFIG_ENV`], else defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a named file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            log::debug!("Loading config from {}", path.display());
            return Self::from_file(path);
        }
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            log::debug!("Loading config from {CONFIG_ENV}={path}");
            return Self::from_file(Path::new(&path));
        }
        log::debug!("No config file, using defaults");
        Ok(Self::default())
    }

    /// Resolves the dataset path: `cli_override`, then [`DATA_ENV`], then
    /// the configured `dataset`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingDataset`] if none is set.
    pub fn dataset_path(&self, cli_override: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
        cli_override
            .or_else(|| std::env::var(DATA_ENV).ok().map(PathBuf::from))
            .or_else(|| self.dataset.clone())
            .ok_or(ConfigError::MissingDataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = DashboardConfig::from_toml_str("").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.sample_cap, 500);
        assert_eq!(config.bedroom_display, BedroomDisplay { min: 1, max: 6 });
    }

    #[test]
    fn partial_document_overrides_given_keys() {
        let config = DashboardConfig::from_toml_str(
            r#"
            dataset = "data/house-data.csv"
            page_size = 25
            theme = "color"

            [bedroom_display]
            min = 0
            max = 8
            "#,
        )
        .unwrap();
        assert_eq!(config.dataset, Some(PathBuf::from("data/house-data.csv")));
        assert_eq!(config.page_size, 25);
        assert_eq!(config.theme, Theme::Color);
        assert_eq!(config.top_zipcodes, 10);
        assert!(config.bedroom_display.contains(0));
        assert!(!config.bedroom_display.contains(9));
    }

    #[test]
    fn rejects_malformed_documents() {
        assert!(matches!(
            DashboardConfig::from_toml_str("page_size = \"ten\""),
            Err(ConfigError::Toml(_))
        ));
        assert!(DashboardConfig::from_toml_str("theme = \"neon\"").is_err());
    }

    #[test]
    fn cli_override_wins() {
        let config = DashboardConfig {
            dataset: Some(PathBuf::from("from-config.csv")),
            ..DashboardConfig::default()
        };
        let path = config
            .dataset_path(Some(PathBuf::from("from-cli.csv")))
            .unwrap();
        assert_eq!(path, PathBuf::from("from-cli.csv"));
    }

    #[test]
    fn missing_config_file_is_an_io_error() {
        let err = DashboardConfig::from_file(Path::new("/nonexistent/dashboard.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
