//! Application Configuration
//! Dataset paths, column roles and display settings, loaded from an optional JSON file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Runtime settings for the explorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub logo_path: PathBuf,
    pub category_column: String,
    pub calorie_column: String,
    pub name_column: String,
    /// Rows shown in the overview sample table
    pub sample_rows: usize,
    pub logo_width: f32,
    /// Grid resolution of the density curve
    pub kde_points: usize,
    pub window_size: [f32; 2],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/cleaned_starbucks.csv"),
            logo_path: PathBuf::from("Starbucks-logo.png"),
            category_column: "Beverage_category".to_string(),
            calorie_column: "Calories".to_string(),
            name_column: "Beverage".to_string(),
            sample_rows: 5,
            logo_width: 300.0,
            kde_points: 200,
            window_size: [1400.0, 800.0],
        }
    }
}

impl AppConfig {
    /// Load config from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Defaults when no path is given; an explicit path must exist.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Apply command line overrides.
    pub fn with_overrides(mut self, data: Option<PathBuf>, logo: Option<PathBuf>) -> Self {
        if let Some(data) = data {
            self.data_path = data;
        }
        if let Some(logo) = logo {
            self.logo_path = logo;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.data_path, PathBuf::from("data/cleaned_starbucks.csv"));
        assert_eq!(config.category_column, "Beverage_category");
        assert_eq!(config.calorie_column, "Calories");
        assert_eq!(config.sample_rows, 5);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = AppConfig::from_json(r#"{ "sample_rows": 10, "calorie_column": "kcal" }"#)
            .expect("valid json");
        assert_eq!(config.sample_rows, 10);
        assert_eq!(config.calorie_column, "kcal");
        assert_eq!(config.name_column, "Beverage");
        assert_eq!(config.kde_points, 200);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{ "data_path": "menu.csv", "logo_width": 120.0 }}"#).expect("write");

        let config = AppConfig::load(file.path()).expect("load");
        assert_eq!(config.data_path, PathBuf::from("menu.csv"));
        assert_eq!(config.logo_width, 120.0);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("nope.json");
        let err = AppConfig::load_or_default(Some(&missing)).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = AppConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_cli_overrides() {
        let config = AppConfig::default()
            .with_overrides(Some(PathBuf::from("other.csv")), None);
        assert_eq!(config.data_path, PathBuf::from("other.csv"));
        assert_eq!(config.logo_path, PathBuf::from("Starbucks-logo.png"));
    }
}
