use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;
use serde_json::Error as SerdeError;
use tracing::{debug, warn};

use crate::infra::loader::DEFAULT_DATA_URL;

const APP_QUALIFIER: &str = "no";
const APP_ORG: &str = "DeliveryDashboard";
const APP_NAME: &str = "DeliveryDashboard";
const CONFIG_FILE: &str = "dashboard.json";

/// User-editable settings, read from `dashboard.json` in the platform config directory.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// URL or file path of the analysis report.
    pub data_source: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_source: DEFAULT_DATA_URL.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Parse(#[from] SerdeError),
}

fn config_file() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// Loads the config, falling back to defaults when it is absent or unreadable.
pub fn load_config() -> DashboardConfig {
    let Some(path) = config_file() else {
        debug!("no config directory available; using defaults");
        return DashboardConfig::default();
    };
    load_config_from(&path).unwrap_or_else(|err| {
        warn!("ignoring config at {}: {err}", path.display());
        DashboardConfig::default()
    })
}

/// A missing file is not an error; it yields the defaults.
pub fn load_config_from(path: &Path) -> Result<DashboardConfig, ConfigError> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!("config {} not found; using defaults", path.display());
            return Ok(DashboardConfig::default());
        }
        Err(err) => return Err(err.into()),
    };
    Ok(serde_json::from_str(&data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = load_config_from(&dir.path().join(CONFIG_FILE)).expect("defaults");
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.data_source, DEFAULT_DATA_URL);
    }

    #[test]
    fn reads_data_source() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, r#"{"data_source": "/srv/analysis/latest.json"}"#).expect("write");

        let config = load_config_from(&path).expect("config");
        assert_eq!(config.data_source, "/srv/analysis/latest.json");
    }

    #[test]
    fn empty_object_uses_default_fields() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "{}").expect("write");

        assert_eq!(
            load_config_from(&path).expect("config"),
            DashboardConfig::default()
        );
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "data_source = 'toml?'").expect("write");

        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));
    }
}
