//! What the operator is told after a build.
//!
//! The pipeline reports through a [`Presenter`] it is handed, so terminal
//! styling stays in the CLI and tests can record what would have been shown.

use serde::Serialize;

use crate::classify::{ClassifiedError, ErrorKind};
use crate::clipboard::ClipboardError;
use crate::project::Project;

/// Next step for a failed build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Remediation {
  /// Put `hash` in the manifest's build section and regenerate lock files.
  PinHash { hash: String, copied: bool },
  /// A hash mismatch whose computed hash could not be found in the output.
  HashMismatch { message: String },
  /// Files are missing from the sandbox; add them to version control.
  CommitFiles { message: String },
  /// Nothing specific to suggest.
  Unclassified { message: String },
}

impl Remediation {
  /// Pick the remediation for a classified failure.
  ///
  /// `copied` records whether the extracted hash reached the clipboard and is
  /// only meaningful for [`Remediation::PinHash`].
  pub fn for_error(error: &ClassifiedError, copied: bool) -> Self {
    let message = error.original_message.clone();
    match (error.kind, &error.extracted_hash) {
      (ErrorKind::HashMismatch, Some(hash)) => Remediation::PinHash {
        hash: hash.clone(),
        copied,
      },
      (ErrorKind::HashMismatch, None) => Remediation::HashMismatch { message },
      (ErrorKind::MissingFile, _) => Remediation::CommitFiles { message },
      (ErrorKind::Generic, _) => Remediation::Unclassified { message },
    }
  }
}

/// Receives progress and results from [`crate::pipeline::run_build`].
pub trait Presenter {
  /// Called once, before the backend is invoked.
  fn building(&mut self, project: &Project);

  fn succeeded(&mut self);

  /// The extracted hash could not be copied. The build result still follows.
  fn clipboard_failed(&mut self, error: &ClipboardError);

  fn failed(&mut self, error: &ClassifiedError, remediation: &Remediation);
}
