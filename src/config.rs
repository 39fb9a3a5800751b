//! Application configuration
//!
//! Read from `lexiloop.toml`, either passed explicitly or found in the data
//! directory. Every field has a default, so an empty or missing file is valid:
//!
//! ```toml
//! data_dir = "/home/me/.vocab"
//!
//! [scheduling]
//! intervals = [1, 3, 7, 14, 30, 90, 180]
//!
//! [session]
//! new_words_per_session = 5
//! reviews_per_session = 20
//! judge_min_overlap = 2
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scheduling::IntervalTable;

pub const CONFIG_FILE: &str = "lexiloop.toml";
pub const PROGRESS_FILE: &str = "progress.json";
pub const CATALOG_FILE: &str = "words.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Could not determine a data directory")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingConfig {
    /// Interval ladder in days
    pub intervals: IntervalTable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// New words offered per learning session
    pub new_words_per_session: usize,
    /// Due words offered per review session
    pub reviews_per_session: usize,
    /// Shared terms the offline judge needs to accept an explanation
    pub judge_min_overlap: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            new_words_per_session: 5,
            reviews_per_session: 20,
            judge_min_overlap: 2,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where progress and the word catalog live
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    pub scheduling: SchedulingConfig,
    pub session: SessionConfig,
}

impl AppConfig {
    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("lexiloop"))
            .ok_or(ConfigError::DataDirNotFound)
    }

    /// Parse a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the config from `explicit` if given, else from the data
    /// directory, else fall back to defaults.
    pub fn load(explicit: Option<&Path>, data_dir: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            log::debug!("Loading config from {:?}", path);
            return Self::from_file(path);
        }

        let dir = match data_dir {
            Some(dir) => dir.to_path_buf(),
            None => Self::default_data_dir()?,
        };
        let path = dir.join(CONFIG_FILE);
        if path.exists() {
            log::debug!("Loading config from {:?}", path);
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Data directory: configured value, else the platform default
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Self::default_data_dir(),
        }
    }

    pub fn progress_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join(PROGRESS_FILE))
    }

    pub fn catalog_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join(CATALOG_FILE))
    }
}
