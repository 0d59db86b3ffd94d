use crate::error::{CliError, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub output: Option<PathBuf>,
    pub combine: Option<String>,
    pub chunk_size: Option<usize>,
    pub backup: Option<bool>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|source| CliError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Location of the per-user configuration file, whether or not it exists.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "caltechmsc", "make-ndx")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Loads `explicit` if given (it must exist), otherwise the per-user file if present,
    /// otherwise an empty configuration.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => {
                debug!("No configuration file found; using built-in defaults.");
                Ok(Self::default())
            }
        }
    }
}
