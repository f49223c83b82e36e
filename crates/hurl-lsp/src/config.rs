//! Configuration for the Hurl language server.
//!
//! The server looks for `.hurl-ls.json` in its working directory first,
//! then for `~/.config/hurl-ls/config.json` (or the platform equivalent).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Name of the per-project config file.
pub const LOCAL_CONFIG_FILE: &str = ".hurl-ls.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HurlLsConfig {
    /// OpenAPI definition used for request signature help and path
    /// completion. Relative paths resolve against the config file's
    /// directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openapi_def: Option<PathBuf>,
}

/// Get the path to the user config file.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("hurl-ls").join("config.json"))
}

/// The config file that applies in `dir`, if any exists.
pub fn find_config(dir: &Path) -> Option<PathBuf> {
    let local = dir.join(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }

    config_path().filter(|path| path.is_file())
}

/// Load the configuration that applies to the current working directory.
///
/// Returns `Ok(None)` if there is no config file.
pub fn load_config() -> Result<Option<HurlLsConfig>, LoadConfigError> {
    let dir = std::env::current_dir().map_err(|e| LoadConfigError::Io {
        path: PathBuf::from("."),
        error: e,
    })?;

    let Some(path) = find_config(&dir) else {
        debug!(?dir, "No config file found");
        return Ok(None);
    };

    load_config_from(&path).map(Some)
}

/// Load a config file, resolving `openapi_def` against its directory.
pub fn load_config_from(path: &Path) -> Result<HurlLsConfig, LoadConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| LoadConfigError::Io {
        path: path.to_path_buf(),
        error: e,
    })?;

    let mut config: HurlLsConfig =
        serde_json::from_str(&content).map_err(|e| LoadConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

    if let (Some(def), Some(parent)) = (&config.openapi_def, path.parent()) {
        if def.is_relative() {
            config.openapi_def = Some(parent.join(def));
        }
    }

    info!(?path, openapi_def = ?config.openapi_def, "Loaded config");
    Ok(config)
}

/// Error loading the config.
#[derive(Debug)]
pub enum LoadConfigError {
    Io { path: PathBuf, error: std::io::Error },
    Parse { path: PathBuf, error: String },
}

impl std::fmt::Display for LoadConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadConfigError::Io { path, error } => {
                write!(f, "Failed to read config at {}: {}", path.display(), error)
            }
            LoadConfigError::Parse { path, error } => {
                write!(f, "Failed to parse config at {}: {}", path.display(), error)
            }
        }
    }
}

impl std::error::Error for LoadConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("hurl-ls-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_local_config_resolves_relative_def() {
        let dir = scratch_dir("relative");
        let path = dir.join(LOCAL_CONFIG_FILE);
        std::fs::write(&path, r#"{"openapi_def": "api/openapi.yaml"}"#).unwrap();

        assert_eq!(find_config(&dir), Some(path.clone()));
        let config = load_config_from(&path).unwrap();
        assert_eq!(config.openapi_def, Some(dir.join("api/openapi.yaml")));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_absolute_def_and_empty_config() {
        let dir = scratch_dir("absolute");
        let path = dir.join(LOCAL_CONFIG_FILE);

        std::fs::write(&path, r#"{"openapi_def": "/srv/openapi.json"}"#).unwrap();
        let config = load_config_from(&path).unwrap();
        assert_eq!(config.openapi_def, Some(PathBuf::from("/srv/openapi.json")));

        std::fs::write(&path, "{}").unwrap();
        assert_eq!(load_config_from(&path).unwrap(), HurlLsConfig::default());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_malformed_config() {
        let dir = scratch_dir("malformed");
        let path = dir.join(LOCAL_CONFIG_FILE);
        std::fs::write(&path, r#"{"openapi_def": 3}"#).unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, LoadConfigError::Parse { .. }));
        assert!(err.to_string().starts_with("Failed to parse config at"));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_config_file() {
        let err = load_config_from(Path::new("/nonexistent/.hurl-ls.json")).unwrap_err();
        assert!(matches!(err, LoadConfigError::Io { .. }));
    }
}
