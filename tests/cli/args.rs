// Integration tests for src/cli/args.rs - parse_args_from over explicit argv.

use bzstream::cli::args::parse_args_from;
use bzstream::cli::init::CliInit;
use bzstream::cli::op_mode::OpMode;
use bzstream::io::prefs::Prefs;

fn init(op_mode: OpMode) -> CliInit {
    CliInit {
        prefs: Prefs::default(),
        op_mode,
        force_stdout: false,
    }
}

fn argv(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

#[test]
fn files_are_collected_in_order() {
    let p = parse_args_from(init(OpMode::Auto), "bzstream", &argv(&["a", "b", "c"])).unwrap();
    assert_eq!(p.in_file_names, argv(&["a", "b", "c"]));
    assert!(!p.exit_early);
}

#[test]
fn explicit_mode_overrides_alias() {
    let p = parse_args_from(init(OpMode::Decompress), "bunzip2", &argv(&["-z", "f"])).unwrap();
    assert_eq!(p.op_mode, OpMode::Compress);
}

#[test]
fn test_flag_wins_over_alias() {
    let p = parse_args_from(init(OpMode::Decompress), "bunzip2", &argv(&["-t", "f.bz2"])).unwrap();
    assert_eq!(p.op_mode, OpMode::Test);
}

#[test]
fn level_and_work_factor() {
    let p = parse_args_from(
        init(OpMode::Auto),
        "bzstream",
        &argv(&["-2", "--work-factor", "77", "f"]),
    )
    .unwrap();
    assert_eq!(p.prefs.params.level, 2);
    assert_eq!(p.prefs.params.work_factor, 77);
}

#[test]
fn long_level_with_equals() {
    let p = parse_args_from(init(OpMode::Auto), "bzstream", &argv(&["--level=6"])).unwrap();
    assert_eq!(p.prefs.params.level, 6);
}

#[test]
fn help_exits_early() {
    let p = parse_args_from(init(OpMode::Auto), "bzstream", &argv(&["--help"])).unwrap();
    assert!(p.exit_early);
}

#[test]
fn version_exits_early() {
    let p = parse_args_from(init(OpMode::Auto), "bzstream", &argv(&["--version"])).unwrap();
    assert!(p.exit_early);
}

#[test]
fn bad_value_is_error() {
    let err = parse_args_from(init(OpMode::Auto), "bzstream", &argv(&["--work-factor", "x"]))
        .unwrap_err();
    assert!(err.to_string().contains("bad usage"));
}
