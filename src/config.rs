//! Dashboard configuration, loaded from a YAML file.
//!
//! The configuration owns everything the window needs before a user logs in:
//! the title, the credential mapping, feature toggles, and where (if
//! anywhere) session state is persisted.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Top-level configuration. Every field has a default so a minimal file can
/// contain only `credentials`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Window and page title.
    pub title: String,
    /// Username → password mapping fed to
    /// [`StaticCredentials`](crate::auth::StaticCredentials).
    pub credentials: BTreeMap<String, String>,
    /// Where to save/restore dashboard state; `None` disables persistence.
    pub state_file: Option<PathBuf>,
    /// Show the filtered-rows table under the chart.
    pub show_table: bool,
    /// Show the CSV export button.
    pub show_export: bool,
    /// Use the dark visuals (the light theme otherwise).
    pub dark_theme: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            title: "Petrol Dashboard".to_string(),
            credentials: BTreeMap::new(),
            state_file: None,
            show_table: true,
            show_export: true,
            dark_theme: true,
        }
    }
}

impl DashboardConfig {
    /// Load from a YAML file.
    pub fn load(path: &Path) -> Result<DashboardConfig, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_yaml_uses_defaults() {
        let cfg: DashboardConfig =
            serde_yaml::from_str("credentials:\n  alice: s3cret\n").unwrap();
        assert_eq!(cfg.credentials.get("alice").unwrap(), "s3cret");
        assert_eq!(cfg.title, "Petrol Dashboard");
        assert!(cfg.show_table && cfg.show_export && cfg.dark_theme);
        assert!(cfg.state_file.is_none());
    }
}
