//! Pre-mutation backups of source and destination files.
//!
//! Copies are keyed by basename only, so two files with the same name from
//! different directories overwrite each other's backup. Failures are logged
//! and never abort the operation.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Backup {
    dir: PathBuf,
}

impl Backup {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Copy each existing file into the backup directory.
    ///
    /// Returns the backup paths that were written.
    pub fn save(&self, files: &[&Path]) -> Vec<PathBuf> {
        let mut saved = Vec::new();
        for file in files {
            if !file.exists() {
                continue;
            }
            match self.copy_one(file) {
                Ok(path) => {
                    info!(source = %file.display(), backup = %path.display(), "backed up file");
                    saved.push(path);
                }
                Err(err) => warn!("backup of {} failed: {:#}", file.display(), err),
            }
        }
        saved
    }

    fn copy_one(&self, file: &Path) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create directory: {}", self.dir.display()))?;
        let name = file
            .file_name()
            .with_context(|| format!("No file name in path: {}", file.display()))?;
        let target = self.dir.join(name);
        fs::copy(file, &target).with_context(|| {
            format!("Failed to copy {} to {}", file.display(), target.display())
        })?;
        Ok(target)
    }
}
