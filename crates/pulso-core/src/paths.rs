//! Standard paths used by Pulso tools

use std::path::PathBuf;

/// Standard Pulso paths
pub struct Paths {
    /// Data directory (~/.local/share/pulso)
    pub data: PathBuf,
    /// Config directory (~/.config/pulso)
    pub config: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self::new()
    }
}

impl Paths {
    pub fn new() -> Self {
        let data = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("~/.local/share"))
            .join("pulso");

        let config = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("pulso");

        Self { data, config }
    }

    /// Path of the main configuration file
    pub fn config_file(&self) -> PathBuf {
        self.config.join("pulso.yaml")
    }

    /// Path of the local entries database
    pub fn database(&self) -> PathBuf {
        self.data.join("pulso.db")
    }
}
