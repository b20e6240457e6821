/// Runtime configuration
///
/// Resolves where data lives. The data directory comes from the command
/// line or `DATAVISTA_HOME`, falling back to `~/.datavista`.

use crate::core::PROJECTS_KEY;
use crate::error::{DataVistaError, Result};
use std::path::{Path, PathBuf};

/// Default directory name under the user's home
const DEFAULT_DIR_NAME: &str = ".datavista";

/// Database file name inside the data directory
const DB_FILE_NAME: &str = "projects.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    data_dir: PathBuf,
    storage_key: String,
}

impl Config {
    /// Build a config rooted at an explicit directory
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            storage_key: PROJECTS_KEY.to_string(),
        }
    }

    /// Use `data_dir` when given, otherwise `~/.datavista`
    pub fn resolve(data_dir: Option<PathBuf>) -> Result<Self> {
        match data_dir {
            Some(dir) => Ok(Self::new(dir)),
            None => {
                let home = dirs::home_dir().ok_or_else(|| {
                    DataVistaError::Config("could not find home directory".to_string())
                })?;
                Ok(Self::new(home.join(DEFAULT_DIR_NAME)))
            }
        }
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }
}
