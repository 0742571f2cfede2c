//! CLI initialization and binary-alias detection.
//!
//! Installed under several names (`bunzip2`, `bzcat`) via links, the program
//! picks its default operation from `argv[0]` before any flag is parsed.
//! [`detect_alias`] returns a [`CliInit`] carrying those defaults; the
//! argument parser layers explicit flags on top.

use crate::cli::arg_utils::{exe_name_match, last_name_from_path};
use crate::cli::op_mode::{init_c_level, init_work_factor, OpMode};
use crate::io::prefs::Prefs;

pub const BUNZIP2: &str = "bunzip2";
pub const BZCAT: &str = "bzcat";

/// Initial CLI state derived from the binary name and environment.
#[derive(Debug, Clone)]
pub struct CliInit {
    /// Preferences seeded from the environment.
    pub prefs: Prefs,
    /// Initial operation mode, set by alias detection.
    pub op_mode: OpMode,
    /// Output forced to stdout (`bzcat`).
    pub force_stdout: bool,
}

/// Detect the operation mode and initial settings from `argv[0]`.
///
/// | Binary name | Effect                         |
/// |-------------|--------------------------------|
/// | `bunzip2`   | Decompress                     |
/// | `bzcat`     | Decompress + force stdout      |
pub fn detect_alias(argv0: &str) -> CliInit {
    let exe_name = last_name_from_path(argv0);

    let mut prefs = Prefs::default();
    prefs.set_compression_level(init_c_level());
    prefs.set_work_factor(init_work_factor());

    let mut op_mode = OpMode::Auto;
    let mut force_stdout = false;

    if exe_name_match(exe_name, BUNZIP2) {
        op_mode = OpMode::Decompress;
    }

    if exe_name_match(exe_name, BZCAT) {
        op_mode = OpMode::Decompress;
        force_stdout = true;
    }

    CliInit {
        prefs,
        op_mode,
        force_stdout,
    }
}
