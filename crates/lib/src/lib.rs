//! pinbuild-lib: build invocation and failure classification for pinbuild
//!
//! This crate provides the pieces behind `pinbuild build`:
//! - `Project`: the project root, located by its `pinbuild.hcl` manifest
//! - `BuildBackend`: runs the sandboxed backend and reports a `BuildOutcome`
//! - `classify`: maps raw backend diagnostics to a `ClassifiedError`
//! - `Remediation`/`Presenter`: what the operator is told to do next

pub mod backend;
pub mod classify;
pub mod clipboard;
pub mod consts;
pub mod pipeline;
pub mod project;
pub mod report;
pub mod util;
