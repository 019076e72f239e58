//! Configuration management
//!
//! Configuration file: ~/.config/pulso/pulso.yaml
//!
//! ```yaml
//! window_days: 40
//! data_dir: /var/lib/pulso
//! color: auto
//! ```

use crate::paths::Paths;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// When to emit ANSI colours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Global Pulso configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Trailing window of calendar days fetched for the dashboard
    #[serde(default = "default_window_days")]
    pub window_days: u32,

    /// Override for the data directory
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    #[serde(default)]
    pub color: ColorMode,
}

fn default_window_days() -> u32 {
    40
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
            data_dir: None,
            color: ColorMode::default(),
        }
    }
}

impl Config {
    /// Load configuration from default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Paths::new().config_file())
    }

    /// Load configuration from a specific path, falling back to defaults
    /// when the file does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {:?}", path))
    }

    /// Resolved database path, honouring `data_dir`
    pub fn database_path(&self, paths: &Paths) -> PathBuf {
        match &self.data_dir {
            Some(dir) => dir.join("pulso.db"),
            None => paths.database(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("nope.yaml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.window_days, 40);
        assert_eq!(config.color, ColorMode::Auto);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pulso.yaml");
        std::fs::write(&path, "color: never\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.color, ColorMode::Never);
        assert_eq!(config.window_days, 40);
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_full_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pulso.yaml");
        std::fs::write(
            &path,
            "window_days: 60\ndata_dir: /tmp/pulso-data\ncolor: always\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.window_days, 60);
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/pulso-data")));
        assert_eq!(config.color, ColorMode::Always);
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pulso.yaml");
        std::fs::write(&path, "window_days: [not a number").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_database_path_override() {
        let paths = Paths::new();
        let config = Config {
            data_dir: Some(PathBuf::from("/srv/pulso")),
            ..Default::default()
        };
        assert_eq!(config.database_path(&paths), PathBuf::from("/srv/pulso/pulso.db"));
        assert_eq!(Config::default().database_path(&paths), paths.database());
    }
}
