//! Command-line argument parsing for the `bzstream` / `bunzip2` / `bzcat` family.
//!
//! The entry points are [`parse_args`] (reads `std::env::args()`) and
//! [`parse_args_from`] (takes an explicit slice, suitable for unit-testing).
//! Both return a [`ParsedArgs`] value that captures every option and filename
//! discovered during the parse.
//!
//! Flags are declared with `clap`'s derive API. The bzip2-style `-1` .. `-9`
//! level shorthands are rewritten to `--level N` before clap sees them.
//! Bad or unrecognised options return an `Err` carrying clap's message.

use anyhow::anyhow;
use clap::error::ErrorKind as ClapErrorKind;
use clap::{ArgAction, Parser};

use crate::cli::constants::{display_level, set_display_level, COMPRESSOR_NAME};
use crate::cli::init::CliInit;
use crate::cli::op_mode::OpMode;
use crate::config::{CLEVEL_MAX, CLEVEL_MIN, WORK_FACTOR_MAX};
use crate::io::prefs::Prefs;

// ── Flag declarations ─────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = COMPRESSOR_NAME,
    version,
    about = "Compress or decompress files in the bzip2 format",
    after_help = "With no FILE, or when FILE is -, read standard input and write standard output."
)]
struct Cli {
    /// Force compression
    #[arg(short = 'z', long, conflicts_with_all = ["decompress", "test"])]
    compress: bool,

    /// Force decompression
    #[arg(short = 'd', long, conflicts_with = "test")]
    decompress: bool,

    /// Test compressed file integrity
    #[arg(short = 't', long)]
    test: bool,

    /// Write to standard output, keep input files
    #[arg(short = 'c', long)]
    stdout: bool,

    /// Keep input files (default)
    #[arg(short = 'k', long, conflicts_with = "rm")]
    keep: bool,

    /// Remove input files after a successful operation
    #[arg(long)]
    rm: bool,

    /// Overwrite existing output files
    #[arg(short = 'f', long)]
    force: bool,

    /// Use less memory when decompressing
    #[arg(short = 's', long)]
    small: bool,

    /// Block size in units of 100k (also `-1` .. `-9`)
    #[arg(short = 'l', long, value_name = "N",
          value_parser = clap::value_parser!(u32).range(CLEVEL_MIN as i64..=CLEVEL_MAX as i64))]
    level: Option<u32>,

    /// Alias for -1
    #[arg(long, conflicts_with_all = ["level", "best"])]
    fast: bool,

    /// Alias for -9
    #[arg(long, conflicts_with = "level")]
    best: bool,

    /// Effort spent on repetitive input before the fallback sort (0 = default)
    #[arg(long, value_name = "N",
          value_parser = clap::value_parser!(u32).range(0..=WORK_FACTOR_MAX as i64))]
    work_factor: Option<u32>,

    /// Stop after the first stream when decompressing
    #[arg(long)]
    single_stream: bool,

    /// Increase verbosity
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity
    #[arg(short = 'q', long, action = ArgAction::Count)]
    quiet: u8,

    /// Input files
    #[arg(value_name = "FILE")]
    files: Vec<String>,
}

// ── Public output type ─────────────────────────────────────────────────────────

/// Complete set of options and filenames produced by argument parsing.
#[derive(Debug)]
pub struct ParsedArgs {
    /// Compression/decompression/IO preferences.
    pub prefs: Prefs,
    /// Resolved operation mode (may still be `Auto`, resolved per file).
    pub op_mode: OpMode,
    /// Write every output to stdout.
    pub force_stdout: bool,
    /// Input filenames; empty means stdin.
    pub in_file_names: Vec<String>,
    /// When `true`, `--help` or `--version` was printed; the caller should
    /// exit 0 without performing any I/O operation.
    pub exit_early: bool,
}

// ── Public API ─────────────────────────────────────────────────────────────────

/// Parse `std::env::args()` using `init` as the starting state.
pub fn parse_args(init: CliInit) -> anyhow::Result<ParsedArgs> {
    let exe_name = std::env::args()
        .next()
        .unwrap_or_else(|| COMPRESSOR_NAME.to_owned());
    let argv: Vec<String> = std::env::args().skip(1).collect();
    parse_args_from(init, &exe_name, &argv)
}

/// Parse an explicit argument list using `init` as the starting state.
///
/// `exe_name` is argv[0]. `argv` is argv[1..].
pub fn parse_args_from(
    init: CliInit,
    exe_name: &str,
    argv: &[String],
) -> anyhow::Result<ParsedArgs> {
    let CliInit {
        mut prefs,
        op_mode: init_op_mode,
        force_stdout: init_force_stdout,
    } = init;

    let expanded = std::iter::once(exe_name.to_owned()).chain(expand_level_shorthands(argv));
    let cli = match Cli::try_parse_from(expanded) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion) => {
            e.print()?;
            return Ok(ParsedArgs {
                prefs,
                op_mode: init_op_mode,
                force_stdout: init_force_stdout,
                in_file_names: Vec::new(),
                exit_early: true,
            });
        }
        Err(e) => return Err(anyhow!("bad usage: {}", e.render().to_string().trim_end())),
    };

    let op_mode = if cli.test {
        OpMode::Test
    } else if cli.decompress {
        OpMode::Decompress
    } else if cli.compress {
        OpMode::Compress
    } else {
        init_op_mode
    };

    if let Some(level) = cli.level {
        prefs.set_compression_level(level);
    } else if cli.fast {
        prefs.set_compression_level(CLEVEL_MIN);
    } else if cli.best {
        prefs.set_compression_level(CLEVEL_MAX);
    }
    if let Some(wf) = cli.work_factor {
        prefs.set_work_factor(wf);
    }
    prefs.set_small(cli.small);
    prefs.set_overwrite(cli.force);
    prefs.set_remove_src_file(cli.rm && !cli.keep);
    prefs.set_multi_stream(!cli.single_stream);

    let level = (display_level() + u32::from(cli.verbose)).saturating_sub(u32::from(cli.quiet));
    set_display_level(level);

    let in_file_names = cli
        .files
        .into_iter()
        .filter(|f| !f.is_empty())
        .collect();

    Ok(ParsedArgs {
        prefs,
        op_mode,
        force_stdout: init_force_stdout || cli.stdout,
        in_file_names,
        exit_early: false,
    })
}

/// Rewrite `-1` .. `-9` into `--level N`, leaving everything after `--` alone.
fn expand_level_shorthands(argv: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(argv.len());
    let mut all_files = false;
    for arg in argv {
        if all_files {
            out.push(arg.clone());
            continue;
        }
        if arg == "--" {
            all_files = true;
            out.push(arg.clone());
            continue;
        }
        match arg.as_bytes() {
            [b'-', d @ b'1'..=b'9'] => {
                out.push("--level".to_owned());
                out.push(char::from(*d).to_string());
            }
            _ => out.push(arg.clone()),
        }
    }
    out
}
