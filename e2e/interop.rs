//! Interoperability tests against the reference `bzip2` tool and crate.
//!
//! Tests that need the system `bzip2` binary print a skip message and return
//! when it is not installed, so they always appear in the test count.

use std::io::{Read, Write};
use std::process::{Command, Stdio};

use bzstream::{bz_compress_to_vec, bz_decompress_to_vec};

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Returns the path to the system `bzip2` binary, or `None` if not found.
fn system_bzip2() -> Option<String> {
    if let Ok(p) = std::env::var("BZIP2_BIN") {
        if std::path::Path::new(&p).exists() {
            return Some(p);
        }
    }
    let out = Command::new("which").arg("bzip2").output().ok()?;
    if out.status.success() {
        let path = String::from_utf8_lossy(&out.stdout).trim().to_string();
        if !path.is_empty() {
            return Some(path);
        }
    }
    None
}

fn rust_bzstream() -> &'static str {
    env!("CARGO_BIN_EXE_bzstream")
}

fn fixture() -> Vec<u8> {
    let mut out = Vec::with_capacity(300_000);
    let mut x: u32 = 0x1234_5678;
    while out.len() < 300_000 {
        // xorshift; every eighth byte repeats the previous one to keep it compressible.
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        let b = if out.len() % 8 == 7 { out[out.len() - 1] } else { b'a' + (x % 26) as u8 };
        out.push(b);
    }
    out
}

/// Pipe `input` through `program args` and return stdout.
fn pipe(program: &str, args: &[&str], input: &[u8]) -> Vec<u8> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn");
    let mut stdin = child.stdin.take().unwrap();
    let data = input.to_vec();
    let feeder = std::thread::spawn(move || stdin.write_all(&data).unwrap());
    let out = child.wait_with_output().unwrap();
    feeder.join().unwrap();
    assert!(out.status.success(), "{program} {args:?} failed");
    out.stdout
}

// ─────────────────────────────────────────────────────────────────────────────
// System binary
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn system_bzip2_decodes_our_output() {
    let Some(bzip2) = system_bzip2() else {
        eprintln!("skip: bzip2 binary not found");
        return;
    };
    let data = fixture();
    let compressed = bz_compress_to_vec(&data, 9).unwrap();
    assert_eq!(pipe(&bzip2, &["-dc"], &compressed), data);
}

#[test]
fn we_decode_system_bzip2_output() {
    let Some(bzip2) = system_bzip2() else {
        eprintln!("skip: bzip2 binary not found");
        return;
    };
    let data = fixture();
    let compressed = pipe(&bzip2, &["-c", "-1"], &data);
    assert_eq!(bz_decompress_to_vec(&compressed).unwrap(), data);
}

#[test]
fn cli_output_matches_system_bzip2_bytes() {
    let Some(bzip2) = system_bzip2() else {
        eprintln!("skip: bzip2 binary not found");
        return;
    };
    let data = fixture();
    let theirs = pipe(&bzip2, &["-c", "-9"], &data);
    let ours = pipe(rust_bzstream(), &["-z", "-9"], &data);
    assert_eq!(ours, theirs);
}

// ─────────────────────────────────────────────────────────────────────────────
// bzip2 crate
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn multi_stream_agrees_with_bzip2_crate() {
    let mut joined = bz_compress_to_vec(b"first stream, ", 9).unwrap();
    joined.extend(bz_compress_to_vec(b"second stream", 1).unwrap());

    let mut theirs = Vec::new();
    bzip2::read::MultiBzDecoder::new(&joined[..])
        .read_to_end(&mut theirs)
        .unwrap();
    assert_eq!(bz_decompress_to_vec(&joined).unwrap(), theirs);
    assert_eq!(theirs, b"first stream, second stream");
}

#[test]
fn cli_pipe_decodes_bzip2_crate_output() {
    let data = fixture();
    let mut enc = bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::fast());
    enc.write_all(&data).unwrap();
    let compressed = enc.finish().unwrap();
    assert_eq!(pipe(rust_bzstream(), &["-d"], &compressed), data);
}
