//! Operation mode selection, output naming and startup defaults for the CLI.
//!
//! - [`OpMode`]: what the CLI should do with each input.
//! - [`determine_op_mode`]: infers compress vs. decompress from a filename.
//! - [`compressed_name`] / [`decompressed_name`]: automatic output names.
//! - [`init_c_level`] / [`init_work_factor`]: per-process defaults read from
//!   the `BZ2_CLEVEL` / `BZ2_WORKFACTOR` environment variables.

use crate::cli::arg_utils::read_u32_from_str;
use crate::cli::constants::{
    BZ2_EXTENSION, OUT_EXTENSION, TAR_EXTENSION, TBZ2_EXTENSION, TBZ_EXTENSION,
};
use crate::config::{CLEVEL_DEFAULT, CLEVEL_MAX, CLEVEL_MIN, WORK_FACTOR_DEFAULT, WORK_FACTOR_MAX};
use crate::displaylevel;

/// What the CLI should do with its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpMode {
    /// Decompress files ending in a bzip2 extension, compress everything else.
    Auto,
    Compress,
    Decompress,
    /// Verify integrity without writing output.
    Test,
}

/// Infer the operation mode from `filename`'s extension.
pub fn determine_op_mode(filename: &str) -> OpMode {
    if has_bz2_suffix(filename) {
        OpMode::Decompress
    } else {
        OpMode::Compress
    }
}

/// `true` for names ending in `.bz2`, `.tbz2` or `.tbz`.
pub fn has_bz2_suffix(filename: &str) -> bool {
    [BZ2_EXTENSION, TBZ2_EXTENSION, TBZ_EXTENSION]
        .iter()
        .any(|ext| filename.len() > ext.len() && filename.ends_with(ext))
}

/// Output name when compressing `src`.
pub fn compressed_name(src: &str) -> String {
    format!("{src}{BZ2_EXTENSION}")
}

/// Output name when decompressing `src`.
///
/// `.bz2` is stripped, `.tbz2`/`.tbz` become `.tar`, anything else gets
/// `.out` appended.
pub fn decompressed_name(src: &str) -> String {
    for (ext, replacement) in [
        (TBZ2_EXTENSION, TAR_EXTENSION),
        (TBZ_EXTENSION, TAR_EXTENSION),
        (BZ2_EXTENSION, ""),
    ] {
        if let Some(stem) = src.strip_suffix(ext) {
            if !stem.is_empty() {
                return format!("{stem}{replacement}");
            }
        }
    }
    format!("{src}{OUT_EXTENSION}")
}

/// Read the default compression level from `BZ2_CLEVEL`.
pub fn init_c_level() -> u32 {
    init_c_level_from(std::env::var("BZ2_CLEVEL").ok().as_deref())
}

/// Testable core of [`init_c_level`]: parse an optional `BZ2_CLEVEL` value.
///
/// Values outside 1..=9 and non-numeric values are ignored with a warning.
pub fn init_c_level_from(env_val: Option<&str>) -> u32 {
    const ENV_CLEVEL: &str = "BZ2_CLEVEL";
    if let Some(env) = env_val {
        if let Some((val, "")) = read_u32_from_str(env) {
            if (CLEVEL_MIN..=CLEVEL_MAX).contains(&val) {
                return val;
            }
        }
        displaylevel!(
            2,
            "Ignore environment variable setting {}={}: not a level in {}..={}\n",
            ENV_CLEVEL,
            env,
            CLEVEL_MIN,
            CLEVEL_MAX
        );
    }
    CLEVEL_DEFAULT
}

/// Read the default work factor from `BZ2_WORKFACTOR`.
pub fn init_work_factor() -> u32 {
    init_work_factor_from(std::env::var("BZ2_WORKFACTOR").ok().as_deref())
}

/// Testable core of [`init_work_factor`].
pub fn init_work_factor_from(env_val: Option<&str>) -> u32 {
    const ENV_WORKFACTOR: &str = "BZ2_WORKFACTOR";
    if let Some(env) = env_val {
        if let Some((val, "")) = read_u32_from_str(env) {
            if val <= WORK_FACTOR_MAX {
                return val;
            }
        }
        displaylevel!(
            2,
            "Ignore environment variable setting {}={}: not a work factor in 0..={}\n",
            ENV_WORKFACTOR,
            env,
            WORK_FACTOR_MAX
        );
    }
    WORK_FACTOR_DEFAULT
}
