//! CLI output formatting utilities.
//!
//! Provides consistent formatting for terminal output including colored status
//! messages, and the presenters that render build results as text or JSON.

use std::time::{Duration, Instant};

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};
use pinbuild_lib::classify::ClassifiedError;
use pinbuild_lib::clipboard::ClipboardError;
use pinbuild_lib::consts::MANIFEST_FILE;
use pinbuild_lib::project::Project;
use pinbuild_lib::report::{Presenter, Remediation};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const WARNING: &str = "⚠";
  pub const INFO: &str = "•";
  pub const HINT: &str = "→";
  pub const CLIPBOARD: &str = "📋";
}

pub fn format_duration(duration: Duration) -> String {
  let secs = duration.as_secs();
  let millis = duration.subsec_millis();

  if secs >= 60 {
    let mins = secs / 60;
    let remaining_secs = secs % 60;
    format!("{}m {}s", mins, remaining_secs)
  } else if secs > 0 {
    format!("{}.{:02}s", secs, millis / 10)
  } else {
    format!("{}ms", millis)
  }
}

pub fn print_success(message: &str) {
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}

pub fn print_warning(message: &str) {
  eprintln!(
    "{} {}",
    symbols::WARNING.if_supports_color(Stream::Stderr, |s| s.yellow()),
    message.if_supports_color(Stream::Stderr, |s| s.yellow())
  );
}

pub fn print_info(message: &str) {
  println!(
    "{} {}",
    symbols::INFO.if_supports_color(Stream::Stdout, |s| s.blue()),
    message
  );
}

pub fn print_hint(message: &str) {
  println!(
    "{} {}",
    symbols::HINT.if_supports_color(Stream::Stdout, |s| s.cyan()),
    message.if_supports_color(Stream::Stdout, |s| s.dimmed())
  );
}

pub fn print_highlight(message: &str) {
  println!("  {}", message.if_supports_color(Stream::Stdout, |s| s.bold()));
}

pub fn print_stat(label: &str, value: &str) {
  println!(
    "  {}: {}",
    label.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    value
  );
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}

/// The line shown for a computed hash.
pub fn hash_line(hash: &str, copied: bool) -> String {
  if copied {
    format!("{} (copied to clipboard) {}", hash, symbols::CLIPBOARD)
  } else {
    hash.to_string()
  }
}

/// Renders build progress and remediation for a person at a terminal.
#[derive(Default)]
pub struct TerminalPresenter {
  started: Option<Instant>,
}

impl Presenter for TerminalPresenter {
  fn building(&mut self, project: &Project) {
    self.started = Some(Instant::now());
    print_info(&format!("Building {}...", project.root().display()));
  }

  fn succeeded(&mut self) {
    print_success("Build completed successfully, please check the result directory");
    if let Some(started) = self.started {
      print_stat("Duration", &format_duration(started.elapsed()));
    }
  }

  fn clipboard_failed(&mut self, error: &ClipboardError) {
    print_warning(&format!("Failed to copy hash to clipboard: {}", error));
  }

  fn failed(&mut self, _error: &ClassifiedError, remediation: &Remediation) {
    match remediation {
      Remediation::PinHash { hash, copied } => {
        print_error("Hash mismatch detected.");
        print_hint(&format!(
          "1) insert the following hash in the build app/module section (ex: vendorHash, vendorSha256) of {}:",
          MANIFEST_FILE
        ));
        print_highlight(&hash_line(hash, *copied));
        print_hint("2) run `pinbuild generate` to lock dependencies and generate Nix files");
      }
      Remediation::HashMismatch { message } => {
        print_error(message);
        print_hint(&format!(
          "a pinned hash in {} does not match the fetched content; update it and run `pinbuild generate`",
          MANIFEST_FILE
        ));
      }
      Remediation::CommitFiles { message } => {
        print_error(message);
        print_error("Please ensure all necessary files are added/committed in your version control system");
        print_hint("run `git add .`");
      }
      Remediation::Unclassified { message } => {
        print_error(&format!("error: {}", message));
      }
    }
  }
}

/// Collects what the JSON document needs; prints nothing itself.
#[derive(Default)]
pub struct JsonPresenter {
  pub clipboard_error: Option<String>,
}

impl Presenter for JsonPresenter {
  fn building(&mut self, _project: &Project) {}

  fn succeeded(&mut self) {}

  fn clipboard_failed(&mut self, error: &ClipboardError) {
    self.clipboard_error = Some(error.to_string());
  }

  fn failed(&mut self, _error: &ClassifiedError, _remediation: &Remediation) {}
}
