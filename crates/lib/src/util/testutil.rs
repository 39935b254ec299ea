//! Test utilities for pinbuild-lib.
//!
//! Fakes for the pipeline's collaborators and helpers for tests that need a
//! real project directory or a stand-in executable.

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};

use crate::backend::{BackendError, BuildBackend, BuildOutcome};
use crate::classify::ClassifiedError;
use crate::clipboard::{Clipboard, ClipboardError};
use crate::consts::MANIFEST_FILE;
use crate::project::Project;
use crate::report::{Presenter, Remediation};

/// Create an initialized project in `dir`.
pub fn init_project(dir: &Path) -> Project {
  std::fs::write(dir.join(MANIFEST_FILE), "").unwrap();
  Project::locate(dir).unwrap()
}

/// Write an executable `/bin/sh` script named `name` into `dir`.
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
  use std::os::unix::fs::PermissionsExt;

  let path = dir.join(name);
  std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
  std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
  path
}

/// Backend that returns a fixed outcome and counts invocations.
pub struct ScriptedBackend {
  outcome: Option<BuildOutcome>,
  calls: Cell<usize>,
}

impl ScriptedBackend {
  pub fn new(outcome: BuildOutcome) -> Self {
    ScriptedBackend {
      outcome: Some(outcome),
      calls: Cell::new(0),
    }
  }

  /// A backend whose program cannot be found.
  pub fn unavailable() -> Self {
    ScriptedBackend {
      outcome: None,
      calls: Cell::new(0),
    }
  }

  pub fn calls(&self) -> usize {
    self.calls.get()
  }
}

impl BuildBackend for ScriptedBackend {
  fn invoke(&self, _project: &Project) -> Result<BuildOutcome, BackendError> {
    self.calls.set(self.calls.get() + 1);
    self.outcome.clone().ok_or_else(|| BackendError::NotFound {
      program: PathBuf::from("nix"),
    })
  }
}

/// In-memory clipboard.
#[derive(Default)]
pub struct FakeClipboard {
  fail: bool,
  copied: RefCell<Vec<String>>,
}

impl FakeClipboard {
  pub fn failing() -> Self {
    FakeClipboard {
      fail: true,
      ..FakeClipboard::default()
    }
  }

  pub fn contents(&self) -> Vec<String> {
    self.copied.borrow().clone()
  }
}

impl Clipboard for FakeClipboard {
  fn copy(&self, text: &str) -> Result<(), ClipboardError> {
    if self.fail {
      return Err(ClipboardError::Unavailable {
        tried: "fake".to_string(),
      });
    }
    self.copied.borrow_mut().push(text.to_string());
    Ok(())
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
  Building,
  Succeeded,
  ClipboardFailed,
  Failed(Remediation),
}

/// Presenter that records calls in order.
#[derive(Default)]
pub struct RecordingPresenter {
  pub events: Vec<Event>,
}

impl Presenter for RecordingPresenter {
  fn building(&mut self, _project: &Project) {
    self.events.push(Event::Building);
  }

  fn succeeded(&mut self) {
    self.events.push(Event::Succeeded);
  }

  fn clipboard_failed(&mut self, _error: &ClipboardError) {
    self.events.push(Event::ClipboardFailed);
  }

  fn failed(&mut self, _error: &ClassifiedError, remediation: &Remediation) {
    self.events.push(Event::Failed(remediation.clone()));
  }
}
