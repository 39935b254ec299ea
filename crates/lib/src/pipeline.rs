//! The build pipeline: invoke the backend, classify a failure, remediate.

use serde::Serialize;
use tracing::{info, warn};

use crate::backend::{BackendError, BuildBackend, BuildOutcome};
use crate::classify::{ClassifiedError, classify};
use crate::clipboard::Clipboard;
use crate::project::Project;
use crate::report::{Presenter, Remediation};

/// A failed build after classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildFailure {
  pub error: ClassifiedError,
  pub remediation: Remediation,
}

/// Everything one `pinbuild build` produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildReport {
  pub outcome: BuildOutcome,
  /// Set exactly when `outcome.succeeded` is false.
  pub failure: Option<BuildFailure>,
}

impl BuildReport {
  pub fn is_success(&self) -> bool {
    self.outcome.succeeded
  }

  /// Process exit status for this report: 0 on success, 1 on any failure.
  pub fn exit_code(&self) -> i32 {
    if self.is_success() { 0 } else { 1 }
  }
}

/// Run one build of `project`.
///
/// The backend is invoked exactly once. When it fails, the failure text is
/// classified and, if a computed hash was found and a clipboard is given, the
/// hash is copied. A clipboard failure is reported to the presenter and
/// otherwise ignored.
///
/// # Errors
///
/// Only when the backend could not be started. A build that ran and failed
/// is returned as a report.
pub fn run_build(
  project: &Project,
  backend: &dyn BuildBackend,
  clipboard: Option<&dyn Clipboard>,
  presenter: &mut dyn Presenter,
) -> Result<BuildReport, BackendError> {
  presenter.building(project);

  let outcome = backend.invoke(project)?;
  if outcome.succeeded {
    presenter.succeeded();
    return Ok(BuildReport { outcome, failure: None });
  }

  let error = classify(&outcome.raw_error);
  info!(kind = %error.kind, "build failed");

  let copied = match (&error.extracted_hash, clipboard) {
    (Some(hash), Some(clipboard)) => match clipboard.copy(hash) {
      Ok(()) => true,
      Err(e) => {
        warn!(error = %e, "failed to copy hash to clipboard");
        presenter.clipboard_failed(&e);
        false
      }
    },
    _ => false,
  };

  let remediation = Remediation::for_error(&error, copied);
  presenter.failed(&error, &remediation);

  Ok(BuildReport {
    outcome,
    failure: Some(BuildFailure { error, remediation }),
  })
}
