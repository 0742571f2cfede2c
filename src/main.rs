//! Binary entry point for the `bzstream` command-line tool.
//!
//! # Control flow
//!
//! 1. [`detect_alias`] inspects `argv[0]` to infer an initial mode
//!    (e.g. `bunzip2` implies decompress).
//! 2. [`parse_args`] processes all flags and builds a [`ParsedArgs`] value.
//! 3. [`run`] resolves each input's operation and output name, dispatches to
//!    the I/O layer and returns an exit code.

use std::io::IsTerminal;

use anyhow::{bail, Context};

use bzstream::cli::args::{parse_args, ParsedArgs};
use bzstream::cli::constants::{display_level, set_display_level, COMPRESSOR_NAME};
use bzstream::cli::init::detect_alias;
use bzstream::cli::op_mode::{
    compressed_name, decompressed_name, determine_op_mode, has_bz2_suffix, OpMode,
};
use bzstream::{display, displaylevel};
use bzstream::io::{
    compress_filename, decompress_filename, test_filename, Prefs, STDIN_MARK, STDOUT_MARK,
};

// ── Per-file dispatch ─────────────────────────────────────────────────────────

/// Resolve the concrete operation for `src` when the mode is still `Auto`.
fn resolve_op_mode(op_mode: OpMode, src: &str) -> OpMode {
    match op_mode {
        OpMode::Auto if src == STDIN_MARK => OpMode::Compress,
        OpMode::Auto => determine_op_mode(src),
        other => other,
    }
}

/// Process one input. Returns `Ok(false)` when the input was skipped.
fn process_file(prefs: &Prefs, op_mode: OpMode, force_stdout: bool, src: &str) -> anyhow::Result<bool> {
    let op_mode = resolve_op_mode(op_mode, src);
    let to_stdout = force_stdout || src == STDIN_MARK;

    match op_mode {
        OpMode::Test => {
            if src == STDIN_MARK && std::io::stdin().is_terminal() {
                bail!("refusing to read compressed data from a terminal");
            }
            test_filename(prefs, src).with_context(|| format!("{src}: integrity test failed"))?;
            displaylevel!(2, "{}: ok\n", src);
        }
        OpMode::Decompress => {
            if src == STDIN_MARK && std::io::stdin().is_terminal() {
                bail!("refusing to read compressed data from a terminal");
            }
            let dst = if to_stdout {
                STDOUT_MARK.to_owned()
            } else {
                let dst = decompressed_name(src);
                if !has_bz2_suffix(src) {
                    displaylevel!(2, "{}: can't guess original name, using {}\n", src, dst);
                }
                dst
            };
            decompress_filename(prefs, src, &dst)
                .with_context(|| format!("{src}: decompression failed"))?;
        }
        OpMode::Compress | OpMode::Auto => {
            if !to_stdout && has_bz2_suffix(src) {
                displaylevel!(1, "{}: {} already has a bzip2 suffix, skipping\n", COMPRESSOR_NAME, src);
                return Ok(false);
            }
            if to_stdout && std::io::stdout().is_terminal() {
                bail!("refusing to write compressed data to a terminal");
            }
            let dst = if to_stdout {
                STDOUT_MARK.to_owned()
            } else {
                compressed_name(src)
            };
            displaylevel!(4, "Compressing {} into {}\n", src, dst);
            compress_filename(prefs, src, &dst)
                .with_context(|| format!("{src}: compression failed"))?;
        }
    }
    Ok(true)
}

// ── Dispatch ──────────────────────────────────────────────────────────────────

/// Execute the operation selected by argument parsing.
///
/// Returns the process exit code (0 = success, 1 = at least one input failed).
fn run(args: ParsedArgs) -> i32 {
    let ParsedArgs {
        mut prefs,
        op_mode,
        force_stdout,
        in_file_names,
        exit_early: _,
    } = args;

    displaylevel!(
        4,
        "*** {} v{}, {}-bit ***\n",
        COMPRESSOR_NAME,
        bzstream::version_string(),
        std::mem::size_of::<*const ()>() * 8
    );

    let inputs: Vec<String> = if in_file_names.is_empty() {
        vec![STDIN_MARK.to_owned()]
    } else {
        in_file_names
            .into_iter()
            .map(|f| if f == "-" { STDIN_MARK.to_owned() } else { f })
            .collect()
    };

    if force_stdout {
        prefs.set_remove_src_file(false);
    }
    let writes_stdout = force_stdout || inputs.iter().any(|f| f == STDIN_MARK);
    if (writes_stdout || inputs.len() > 1) && display_level() == 2 {
        set_display_level(1);
    }

    let mut failures = 0usize;
    for src in &inputs {
        if let Err(e) = process_file(&prefs, op_mode, force_stdout, src) {
            displaylevel!(1, "{}: {:#}\n", COMPRESSOR_NAME, e);
            failures += 1;
        }
    }

    if failures > 0 {
        1
    } else {
        0
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let argv0 = std::env::args()
        .next()
        .unwrap_or_else(|| COMPRESSOR_NAME.to_owned());
    let init = detect_alias(&argv0);

    let args = match parse_args(init) {
        Ok(a) => a,
        Err(e) => {
            display!("{}: {}\n", COMPRESSOR_NAME, e);
            std::process::exit(1);
        }
    };

    if args.exit_early {
        std::process::exit(0);
    }

    std::process::exit(run(args));
}
