//! `nix build` backend.

use std::io::ErrorKind as IoErrorKind;
use std::path::PathBuf;
use std::process::Command;

use tracing::{debug, info};

use super::{BackendError, BuildBackend, BuildOutcome};
use crate::consts::{DEFAULT_FLAKE_REF, DEFAULT_NIX_PROGRAM};
use crate::project::Project;

/// Runs `<program> build <flake_ref> [extra_args...]` in the project root.
///
/// Sandboxing is left to Nix. Only files visible to the flake (for git
/// flakes, tracked files) are available to the build, which is why missing
/// files usually mean uncommitted files.
#[derive(Debug, Clone)]
pub struct NixBackend {
  pub program: PathBuf,
  pub flake_ref: String,
  pub extra_args: Vec<String>,
}

impl Default for NixBackend {
  fn default() -> Self {
    NixBackend {
      program: PathBuf::from(DEFAULT_NIX_PROGRAM),
      flake_ref: DEFAULT_FLAKE_REF.to_string(),
      extra_args: Vec::new(),
    }
  }
}

impl NixBackend {
  fn command(&self, project: &Project) -> Command {
    let mut command = Command::new(&self.program);
    command
      .arg("build")
      .arg(&self.flake_ref)
      .args(&self.extra_args)
      .current_dir(project.root());
    command
  }
}

impl BuildBackend for NixBackend {
  fn invoke(&self, project: &Project) -> Result<BuildOutcome, BackendError> {
    info!(program = %self.program.display(), flake = %self.flake_ref, "starting build");

    let mut command = self.command(project);
    debug!(command = ?command, root = %project.root().display(), "spawning backend");

    let output = command.output().map_err(|e| match e.kind() {
      IoErrorKind::NotFound => BackendError::NotFound {
        program: self.program.clone(),
      },
      _ => BackendError::Spawn {
        program: self.program.clone(),
        source: e,
      },
    })?;

    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);

    if !stdout.is_empty() {
      debug!(stdout = %stdout, "backend stdout");
    }

    if output.status.success() {
      info!("build succeeded");
      return Ok(BuildOutcome::success());
    }

    debug!(code = ?output.status.code(), "build failed");
    Ok(BuildOutcome::failure(join_streams(&stderr, &stdout)))
  }
}

/// Backend diagnostics: stderr first, then stdout, each kept intact.
fn join_streams(stderr: &str, stdout: &str) -> String {
  if stdout.is_empty() {
    return stderr.to_string();
  }
  if stderr.is_empty() {
    return stdout.to_string();
  }

  let mut text = String::with_capacity(stderr.len() + stdout.len() + 1);
  text.push_str(stderr);
  if !stderr.ends_with('\n') {
    text.push('\n');
  }
  text.push_str(stdout);
  text
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn join_prefers_stderr_first() {
    assert_eq!(join_streams("err\n", "out\n"), "err\nout\n");
    assert_eq!(join_streams("err", "out"), "err\nout");
    assert_eq!(join_streams("err", ""), "err");
    assert_eq!(join_streams("", "out"), "out");
    assert_eq!(join_streams("", ""), "");
  }

  #[test]
  fn default_targets_generated_flake() {
    let backend = NixBackend::default();

    assert_eq!(backend.program, PathBuf::from("nix"));
    assert_eq!(backend.flake_ref, "pinbuild/.");
    assert!(backend.extra_args.is_empty());
  }

  #[cfg(unix)]
  mod process {
    use super::*;
    use crate::util::testutil::{init_project, write_script};
    use tempfile::TempDir;

    fn backend_for(script: PathBuf) -> NixBackend {
      NixBackend {
        program: script,
        ..NixBackend::default()
      }
    }

    #[test]
    fn success_has_empty_error() {
      let temp = TempDir::new().unwrap();
      let project = init_project(temp.path());
      let script = write_script(temp.path(), "nix", "echo building; exit 0");

      let outcome = backend_for(script).invoke(&project).unwrap();

      assert_eq!(outcome, BuildOutcome::success());
    }

    #[test]
    fn failure_keeps_text_verbatim() {
      let temp = TempDir::new().unwrap();
      let project = init_project(temp.path());
      let script = write_script(
        temp.path(),
        "nix",
        "printf '  error: hash mismatch\\n   got:    sha256-AAAA=  \\n' >&2; exit 1",
      );

      let outcome = backend_for(script).invoke(&project).unwrap();

      assert!(!outcome.succeeded);
      assert_eq!(outcome.raw_error, "  error: hash mismatch\n   got:    sha256-AAAA=  \n");
    }

    #[test]
    fn passes_build_flake_and_extra_args() {
      let temp = TempDir::new().unwrap();
      let project = init_project(temp.path());
      let script = write_script(temp.path(), "nix", "echo \"$@\" >&2; exit 1");
      let backend = NixBackend {
        extra_args: vec!["--print-build-logs".to_string()],
        ..backend_for(script)
      };

      let outcome = backend.invoke(&project).unwrap();

      assert_eq!(outcome.raw_error, "build pinbuild/. --print-build-logs\n");
    }

    #[test]
    fn runs_in_project_root() {
      let temp = TempDir::new().unwrap();
      let project = init_project(temp.path());
      let script = write_script(temp.path(), "nix", "pwd; exit 1");

      let outcome = backend_for(script).invoke(&project).unwrap();

      assert_eq!(outcome.raw_error.trim_end(), project.root().to_string_lossy());
    }

    #[test]
    fn missing_program_is_not_found() {
      let temp = TempDir::new().unwrap();
      let project = init_project(temp.path());

      let err = backend_for(temp.path().join("no-such-nix")).invoke(&project).unwrap_err();

      assert!(matches!(err, BackendError::NotFound { .. }));
    }
  }
}
