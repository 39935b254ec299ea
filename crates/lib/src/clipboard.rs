//! System clipboard access.
//!
//! The clipboard is reached through the platform's clipboard utility
//! (`pbcopy`, `clip.exe`, `wl-copy`, `xclip` or `xsel`), which reads the text
//! on stdin. Setting `PINBUILD_CLIPBOARD` to a program path skips detection.

use std::io::{ErrorKind as IoErrorKind, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::debug;

use crate::consts::CLIPBOARD_ENV;

#[derive(Debug, Error)]
pub enum ClipboardError {
  #[error("no clipboard utility found (tried {tried})")]
  Unavailable { tried: String },

  #[error("failed to run {program}: {source}")]
  Io { program: String, source: std::io::Error },

  #[error("{program} exited with code {code:?}")]
  Failed { program: String, code: Option<i32> },
}

/// A place to put text for the operator to paste.
pub trait Clipboard {
  fn copy(&self, text: &str) -> Result<(), ClipboardError>;
}

/// A clipboard utility invocation: program plus arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Provider {
  program: PathBuf,
  args: Vec<&'static str>,
}

impl Provider {
  fn new(program: impl Into<PathBuf>, args: &[&'static str]) -> Self {
    Provider {
      program: program.into(),
      args: args.to_vec(),
    }
  }

  fn name(&self) -> String {
    self.program.display().to_string()
  }
}

/// Clipboard backed by the platform clipboard utility.
#[derive(Debug, Clone)]
pub struct SystemClipboard {
  providers: Vec<Provider>,
}

impl SystemClipboard {
  /// Build the provider list from `PINBUILD_CLIPBOARD` or the platform defaults.
  pub fn from_env() -> Self {
    let providers = match std::env::var_os(CLIPBOARD_ENV) {
      Some(program) if !program.is_empty() => vec![Provider::new(program, &[])],
      _ => platform_providers(),
    };
    SystemClipboard { providers }
  }

  /// Use a single program that reads the text on stdin.
  pub fn with_program(program: impl Into<PathBuf>) -> Self {
    SystemClipboard {
      providers: vec![Provider::new(program, &[])],
    }
  }
}

impl Clipboard for SystemClipboard {
  fn copy(&self, text: &str) -> Result<(), ClipboardError> {
    // First provider that exists wins; a provider that runs and fails is final.
    for provider in &self.providers {
      match run_provider(provider, text) {
        Err(ClipboardError::Io { source, .. }) if source.kind() == IoErrorKind::NotFound => {
          debug!(program = %provider.name(), "clipboard utility not found");
        }
        result => return result,
      }
    }

    let tried = self.providers.iter().map(Provider::name).collect::<Vec<_>>().join(", ");
    Err(ClipboardError::Unavailable { tried })
  }
}

fn run_provider(provider: &Provider, text: &str) -> Result<(), ClipboardError> {
  let io_err = |source: std::io::Error| ClipboardError::Io {
    program: provider.name(),
    source,
  };

  let mut child = Command::new(&provider.program)
    .args(&provider.args)
    .stdin(Stdio::piped())
    .stdout(Stdio::null())
    .stderr(Stdio::null())
    .spawn()
    .map_err(io_err)?;

  if let Some(mut stdin) = child.stdin.take() {
    stdin.write_all(text.as_bytes()).map_err(io_err)?;
  }

  let status = child.wait().map_err(io_err)?;
  if !status.success() {
    return Err(ClipboardError::Failed {
      program: provider.name(),
      code: status.code(),
    });
  }

  debug!(program = %provider.name(), "copied to clipboard");
  Ok(())
}

#[cfg(target_os = "macos")]
fn platform_providers() -> Vec<Provider> {
  vec![Provider::new("pbcopy", &[])]
}

#[cfg(windows)]
fn platform_providers() -> Vec<Provider> {
  vec![Provider::new("clip.exe", &[])]
}

#[cfg(all(unix, not(target_os = "macos")))]
fn platform_providers() -> Vec<Provider> {
  let mut providers = Vec::new();
  if std::env::var_os("WAYLAND_DISPLAY").is_some() {
    providers.push(Provider::new("wl-copy", &[]));
  }
  providers.push(Provider::new("xclip", &["-selection", "clipboard"]));
  providers.push(Provider::new("xsel", &["--clipboard", "--input"]));
  providers
}
