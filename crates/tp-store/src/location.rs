//! Resolution of the store file's location.
//!
//! The store lives at `<home>/<file_name>`. `home` defaults to the current
//! user's home directory and `file_name` to [`DEFAULT_FILE_NAME`]; both can be
//! overridden (the CLI reads `TELEPORT_HOME` and `TELEPORT_FILE`).

use std::path::PathBuf;

use crate::error::{Result, StoreError};

/// File name of the store when no override is given.
pub const DEFAULT_FILE_NAME: &str = ".tp";

/// Where the warp point store file lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreLocation {
    /// Directory override. `None` means the user's home directory.
    pub home: Option<PathBuf>,
    /// File name within the directory.
    pub file_name: String,
}

impl Default for StoreLocation {
    fn default() -> Self {
        Self {
            home: None,
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

impl StoreLocation {
    /// Build a location from optional overrides. Empty overrides count as unset.
    pub fn new(home: Option<PathBuf>, file_name: Option<String>) -> Self {
        Self {
            home: home.filter(|h| !h.as_os_str().is_empty()),
            file_name: file_name
                .filter(|f| !f.is_empty())
                .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string()),
        }
    }

    /// Resolve the full path of the store file.
    pub fn resolve(&self) -> Result<PathBuf> {
        self.resolve_with_home(dirs::home_dir())
    }

    fn resolve_with_home(&self, user_home: Option<PathBuf>) -> Result<PathBuf> {
        let dir = match &self.home {
            Some(home) => home.clone(),
            None => user_home.ok_or(StoreError::NoHomeDirectory)?,
        };
        Ok(dir.join(&self.file_name))
    }
}
