/// Manifest that marks a directory as an initialized project.
pub const MANIFEST_FILE: &str = "pinbuild.hcl";

/// Flake reference handed to `nix build` when none is configured.
pub const DEFAULT_FLAKE_REF: &str = "pinbuild/.";

pub const DEFAULT_NIX_PROGRAM: &str = "nix";

/// Overrides clipboard program auto-detection.
pub const CLIPBOARD_ENV: &str = "PINBUILD_CLIPBOARD";
