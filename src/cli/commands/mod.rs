pub mod create_keys;
pub mod init;
pub mod translate;

use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tracing::debug;

use crate::config::{Config, load_config};

/// Loaded configuration plus the directory its relative paths resolve from.
pub struct ProjectContext {
    pub config: Config,
    /// Directory holding the config file, or the working directory when none was found.
    pub root: PathBuf,
}

impl ProjectContext {
    /// Load the configuration for the current directory, applying the
    /// message keys directory override.
    pub fn load(message_keys_dir: Option<&Path>) -> Result<Self> {
        let cwd = env::current_dir().context("Failed to read the current directory")?;
        let loaded = load_config(&cwd)?;
        let root = loaded
            .path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| cwd.clone());

        match &loaded.path {
            Some(path) => debug!("using config file {}", path.display()),
            None => debug!("no config file found, using defaults"),
        }

        let mut config = loaded.config;
        if let Some(dir) = message_keys_dir {
            config.message_keys_dir = cwd.join(dir).to_string_lossy().into_owned();
        }

        Ok(Self { config, root })
    }

    /// Resolve a configured path against the project root.
    pub fn path(&self, configured: &str) -> PathBuf {
        self.root.join(configured)
    }

    pub fn message_keys_dir(&self) -> PathBuf {
        self.path(&self.config.message_keys_dir)
    }
}
