// Integration tests for src/main.rs - per-file dispatch through the binary.
//
// `run()` is private to the binary crate, so these tests invoke the compiled
// executable. Cargo sets `CARGO_BIN_EXE_bzstream` when running `cargo test`.
//
//   - auto mode: plain file → .bz2, .bz2 → stripped name
//   - stdin → stdout piping in both directions
//   - -t integrity test, exit status on corrupt input
//   - -c keeps inputs and writes to stdout
//   - --rm removes the source, -f overwrites
//   - a failing input does not stop the remaining ones

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_bzstream"))
}

fn content() -> Vec<u8> {
    b"bzstream command line dispatch test line\n"
        .iter()
        .cycle()
        .take(50_000)
        .copied()
        .collect()
}

fn setup_input(name: &str, data: &[u8]) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("TempDir::new");
    let input = dir.path().join(name);
    fs::write(&input, data).expect("write input");
    (dir, input)
}

fn run(args: &[&str]) -> Output {
    Command::new(bin())
        .args(args)
        .stdin(Stdio::null())
        .output()
        .expect("spawn bzstream")
}

fn run_with_stdin(args: &[&str], input: &[u8]) -> Output {
    let mut child = Command::new(bin())
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn bzstream");
    let mut stdin = child.stdin.take().unwrap();
    let data = input.to_vec();
    let feeder = std::thread::spawn(move || {
        stdin.write_all(&data).unwrap();
    });
    let out = child.wait_with_output().unwrap();
    feeder.join().unwrap();
    out
}

fn p(path: &Path) -> &str {
    path.to_str().unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// Smoke
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn help_exits_zero() {
    let out = run(&["--help"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("Usage"));
}

#[test]
fn unknown_option_exits_one() {
    let out = run(&["--no-such-flag"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("bad usage"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Files
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn auto_mode_round_trip_on_files() {
    let (dir, input) = setup_input("doc.txt", &content());
    let packed = dir.path().join("doc.txt.bz2");

    let out = run(&[p(&input)]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(packed.exists());
    assert!(input.exists(), "input kept without --rm");

    fs::remove_file(&input).unwrap();
    let out = run(&[p(&packed)]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(fs::read(&input).unwrap(), content());
}

#[test]
fn compressed_file_decodes_with_bzip2_crate() {
    let (dir, input) = setup_input("x.bin", &content());
    assert!(run(&["-z", "-3", p(&input)]).status.success());
    let packed = fs::read(dir.path().join("x.bin.bz2")).unwrap();
    assert_eq!(&packed[..4], b"BZh3");
    let mut out = Vec::new();
    bzip2::read::BzDecoder::new(&packed[..])
        .read_to_end(&mut out)
        .unwrap();
    assert_eq!(out, content());
}

#[test]
fn rm_removes_source() {
    let (dir, input) = setup_input("gone.txt", b"remove me");
    assert!(run(&["--rm", p(&input)]).status.success());
    assert!(!input.exists());
    assert!(dir.path().join("gone.txt.bz2").exists());
}

#[test]
fn existing_output_needs_force() {
    let (dir, input) = setup_input("a.txt", &content());
    let packed = dir.path().join("a.txt.bz2");
    fs::write(&packed, b"old").unwrap();

    let out = run(&[p(&input)]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(fs::read(&packed).unwrap(), b"old");

    assert!(run(&["-f", p(&input)]).status.success());
    assert_ne!(fs::read(&packed).unwrap(), b"old");
}

#[test]
fn already_compressed_input_is_skipped() {
    let (dir, input) = setup_input("twice.bz2", b"whatever");
    let out = run(&["-z", p(&input)]);
    assert!(out.status.success());
    assert!(!dir.path().join("twice.bz2.bz2").exists());
}

#[test]
fn one_bad_input_does_not_stop_others() {
    let (dir, good) = setup_input("good.txt", &content());
    let missing = dir.path().join("missing.txt");
    let out = run(&["-z", p(&missing), p(&good)]);
    assert_eq!(out.status.code(), Some(1));
    assert!(dir.path().join("good.txt.bz2").exists());
}

// ─────────────────────────────────────────────────────────────────────────────
// Test mode
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_mode_ok_and_corrupt() {
    let (dir, input) = setup_input("t.txt", &content());
    assert!(run(&[p(&input)]).status.success());
    let packed = dir.path().join("t.txt.bz2");

    let out = run(&["-t", p(&packed)]);
    assert!(out.status.success());
    assert!(!dir.path().join("t.txt.out").exists());

    let mut bytes = fs::read(&packed).unwrap();
    let mid = bytes.len() / 2;
    bytes[mid] ^= 0x55;
    bytes.truncate(bytes.len() - 4);
    fs::write(&packed, &bytes).unwrap();
    let out = run(&["-t", p(&packed)]);
    assert_eq!(out.status.code(), Some(1));
}

// ─────────────────────────────────────────────────────────────────────────────
// Pipes
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn stdin_to_stdout_round_trip() {
    let packed = run_with_stdin(&["-z"], &content());
    assert!(packed.status.success());
    assert_eq!(&packed.stdout[..3], b"BZh");

    let plain = run_with_stdin(&["-d"], &packed.stdout);
    assert!(plain.status.success());
    assert_eq!(plain.stdout, content());
}

#[test]
fn stdin_garbage_fails() {
    let out = run_with_stdin(&["-d"], b"nope, not bzip2");
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
}

#[test]
fn stdout_flag_keeps_input() {
    let (_dir, input) = setup_input("c.txt", &content());
    let out = Command::new(bin())
        .args(["-c", "--rm", p(&input)])
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(input.exists());
    assert_eq!(bzstream::bz_decompress_to_vec(&out.stdout).unwrap(), content());
}
