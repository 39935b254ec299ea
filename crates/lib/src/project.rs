//! Project discovery.
//!
//! A directory is a pinbuild project when it contains the manifest file.
//! The check runs before any backend invocation so an uninitialized project
//! is reported on its own rather than as a build failure.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::consts::MANIFEST_FILE;

#[derive(Debug, Error)]
pub enum ProjectError {
  #[error("project not initialized: {} not found", manifest.display())]
  NotInitialized { manifest: PathBuf },

  #[error("failed to canonicalize path {}: {source}", path.display())]
  Canonicalize { path: PathBuf, source: std::io::Error },
}

/// An initialized project rooted at `root`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
  root: PathBuf,
}

impl Project {
  /// Locate the project rooted at `dir`.
  ///
  /// Only `dir` itself is checked; parent directories are not searched.
  pub fn locate(dir: &Path) -> Result<Self, ProjectError> {
    let manifest = dir.join(MANIFEST_FILE);
    if !manifest.is_file() {
      return Err(ProjectError::NotInitialized { manifest });
    }

    let root = dunce::canonicalize(dir).map_err(|e| ProjectError::Canonicalize {
      path: dir.to_path_buf(),
      source: e,
    })?;

    debug!(root = %root.display(), "located project");
    Ok(Project { root })
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  pub fn manifest_path(&self) -> PathBuf {
    self.root.join(MANIFEST_FILE)
  }
}
