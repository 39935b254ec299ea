//! Classification of backend failure text.
//!
//! Backend diagnostics are free text. Rather than parse them, the classifier
//! recognizes a small number of literal signatures that map to a concrete fix
//! and falls back to [`ErrorKind::Generic`] for everything else. Every pattern
//! the tool matches against backend output lives in this module.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Version of the pattern set below. Bump when a pattern changes.
pub const RULES_VERSION: u32 = 1;

const HASH_MISMATCH_PHRASE: &str = "hash mismatch";
const MISSING_FILE_PHRASE: &str = "No such file or directory";

static GOT_HASH: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"got:\s+(sha256-\S+)").expect("GOT_HASH pattern is valid"));

/// Category assigned to a failed build's diagnostic text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
  /// A pinned content hash does not match the fetched content.
  HashMismatch,
  /// A file the build needs is not visible inside the sandbox.
  MissingFile,
  /// Anything the classifier does not recognize.
  Generic,
}

impl fmt::Display for ErrorKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      ErrorKind::HashMismatch => "hash mismatch",
      ErrorKind::MissingFile => "missing file",
      ErrorKind::Generic => "generic",
    };
    f.write_str(name)
  }
}

/// A classified build failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedError {
  pub kind: ErrorKind,
  /// The `sha256-...` token the backend computed. Only set for hash mismatches.
  pub extracted_hash: Option<String>,
  /// The raw backend text, unmodified.
  pub original_message: String,
}

/// Classify raw backend failure text.
///
/// Rules are checked in order and the first match wins:
/// 1. `"hash mismatch"` anywhere in the text. The `got: sha256-...` token is
///    extracted when present.
/// 2. `"No such file or directory"` anywhere in the text.
/// 3. Otherwise the failure is generic.
pub fn classify(raw_error: &str) -> ClassifiedError {
  let (kind, extracted_hash) = if raw_error.contains(HASH_MISMATCH_PHRASE) {
    (ErrorKind::HashMismatch, extract_got_hash(raw_error))
  } else if raw_error.contains(MISSING_FILE_PHRASE) {
    (ErrorKind::MissingFile, None)
  } else {
    (ErrorKind::Generic, None)
  };

  ClassifiedError {
    kind,
    extracted_hash,
    original_message: raw_error.to_string(),
  }
}

/// Find the hash following `got:`, e.g. `got:    sha256-AAAA...=`.
fn extract_got_hash(text: &str) -> Option<String> {
  GOT_HASH
    .captures(text)
    .and_then(|caps| caps.get(1))
    .map(|m| m.as_str().to_string())
}
