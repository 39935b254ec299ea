//! Implementation of the `pinbuild build` command.
//!
//! This command checks that the project is initialized, runs the sandboxed
//! backend once, and tells the operator how to fix a failed build.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use clap::builder::BoolishValueParser;
use tracing::debug;

use pinbuild_lib::backend::NixBackend;
use pinbuild_lib::clipboard::{Clipboard, SystemClipboard};
use pinbuild_lib::consts::{DEFAULT_FLAKE_REF, DEFAULT_NIX_PROGRAM};
use pinbuild_lib::pipeline::{BuildReport, run_build};
use pinbuild_lib::project::{Project, ProjectError};

use crate::output::{JsonPresenter, OutputFormat, TerminalPresenter, print_error, print_hint, print_json};

#[derive(Args, Debug)]
pub struct BuildArgs {
  /// Project root containing pinbuild.hcl
  #[arg(short = 'C', long, env = "PINBUILD_PROJECT_DIR", default_value = ".")]
  pub project_dir: PathBuf,

  /// Build backend program
  #[arg(long, env = "PINBUILD_NIX", default_value = DEFAULT_NIX_PROGRAM)]
  pub nix: PathBuf,

  /// Flake reference to build, relative to the project root
  #[arg(long, env = "PINBUILD_FLAKE", default_value = DEFAULT_FLAKE_REF)]
  pub flake: String,

  /// Do not copy a computed hash to the clipboard (implied when CI is set)
  #[arg(long, env = "PINBUILD_NO_CLIPBOARD", value_parser = BoolishValueParser::new())]
  pub no_clipboard: bool,

  /// Output format
  #[arg(short = 'o', long, value_enum, default_value = "text")]
  pub output: OutputFormat,

  /// Extra arguments passed to the backend
  #[arg(last = true)]
  pub backend_args: Vec<String>,
}

impl BuildArgs {
  fn clipboard_enabled(&self) -> bool {
    !self.no_clipboard && std::env::var_os("CI").is_none()
  }

  fn backend(&self) -> NixBackend {
    NixBackend {
      program: self.nix.clone(),
      flake_ref: self.flake.clone(),
      extra_args: self.backend_args.clone(),
    }
  }
}

/// Execute the build command.
///
/// Returns the process exit code: 0 when the build succeeded, 1 when the
/// project is not initialized or the build failed.
///
/// # Errors
///
/// Returns an error if the backend could not be started at all.
pub fn cmd_build(args: &BuildArgs) -> Result<i32> {
  let project = match Project::locate(&args.project_dir) {
    Ok(project) => project,
    Err(ProjectError::NotInitialized { manifest }) => {
      debug!(manifest = %manifest.display(), "manifest missing");
      if args.output.is_json() {
        print_json(&serde_json::json!({
          "succeeded": false,
          "error": "project not initialized",
          "manifest": manifest,
        }))?;
      } else {
        print_error("error: Has the project been initialized?");
        print_hint("run `pinbuild init` to initialize the project");
      }
      return Ok(1);
    }
    Err(e) => return Err(e).context("Failed to locate project"),
  };

  let backend = args.backend();
  let system_clipboard = args.clipboard_enabled().then(SystemClipboard::from_env);
  let clipboard = system_clipboard.as_ref().map(|c| c as &dyn Clipboard);

  let report = if args.output.is_json() {
    let mut presenter = JsonPresenter::default();
    let report = run_build(&project, &backend, clipboard, &mut presenter).context("Build failed to start")?;
    print_json(&json_report(&report, presenter.clipboard_error.as_deref()))?;
    report
  } else {
    let mut presenter = TerminalPresenter::default();
    run_build(&project, &backend, clipboard, &mut presenter).context("Build failed to start")?
  };

  Ok(report.exit_code())
}

fn json_report(report: &BuildReport, clipboard_error: Option<&str>) -> serde_json::Value {
  match &report.failure {
    None => serde_json::json!({ "succeeded": true }),
    Some(failure) => serde_json::json!({
      "succeeded": false,
      "kind": failure.error.kind,
      "hash": failure.error.extracted_hash,
      "remediation": failure.remediation,
      "clipboard_error": clipboard_error,
      "message": failure.error.original_message,
    }),
  }
}
