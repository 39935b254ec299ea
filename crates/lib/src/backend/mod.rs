//! Build backend invocation.
//!
//! The backend is the external sandboxed build engine. pinbuild treats it as a
//! black box: it is run once per build, synchronously, and reports either
//! success or the raw text it printed on failure.

mod nix;

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::project::Project;

pub use nix::NixBackend;

/// Errors raised when the backend cannot be run at all.
///
/// A build that runs and fails is not an error here; it is a
/// [`BuildOutcome`] with `succeeded == false`.
#[derive(Debug, Error)]
pub enum BackendError {
  #[error("build backend not found: {} (is it installed and on PATH?)", program.display())]
  NotFound { program: PathBuf },

  #[error("failed to run build backend {}: {source}", program.display())]
  Spawn { program: PathBuf, source: std::io::Error },
}

/// Result of one build invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildOutcome {
  pub succeeded: bool,
  /// Backend diagnostics, verbatim. Empty when the build succeeded.
  pub raw_error: String,
}

impl BuildOutcome {
  pub fn success() -> Self {
    BuildOutcome {
      succeeded: true,
      raw_error: String::new(),
    }
  }

  pub fn failure(raw_error: impl Into<String>) -> Self {
    BuildOutcome {
      succeeded: false,
      raw_error: raw_error.into(),
    }
  }
}

/// Something that can build a project.
///
/// Implementations block until the build has finished and must not retry.
pub trait BuildBackend {
  fn invoke(&self, project: &Project) -> Result<BuildOutcome, BackendError>;
}
