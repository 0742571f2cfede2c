//! Command-line interface for the `bzstream` binary.
//!
//! | Submodule     | Responsibility |
//! |---------------|---------------|
//! | [`constants`] | Program identity strings, file extensions and the shared `DISPLAY_LEVEL` atomic. |
//! | [`arg_utils`] | Path basename, executable-name matching, integer parsing. |
//! | [`op_mode`]   | `OpMode`, output-name derivation and environment-based defaults. |
//! | [`init`]      | `CliInit`, the initial state built from the binary name (`bunzip2`, `bzcat`). |
//! | [`args`]      | `ParsedArgs`, produced by the clap-based parser. |
//!
//! Typical call sequence: `detect_alias` → `parse_args` → dispatch to the I/O layer.

pub mod constants;
pub mod arg_utils;
pub mod op_mode;
pub mod init;
pub mod args;
