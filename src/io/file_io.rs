//! File I/O primitives for the bzip2 streaming pipeline.
//!
//! - [`open_src_file`] resolves a path string to a `Box<dyn Read>`, handling
//!   the `"stdin"` sentinel and rejecting directories.
//! - [`open_dst_file`] resolves a path string to a [`DstFile`], handling the
//!   `"stdout"` and null-device sentinels and enforcing the overwrite policy.

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, Read, Write};
use std::path::Path;

use crate::displaylevel;
use crate::io::prefs::Prefs;

// ---------------------------------------------------------------------------
// Sentinel strings
// ---------------------------------------------------------------------------

/// Sentinel: read from standard input.
pub const STDIN_MARK: &str = "stdin";

/// Sentinel: write to standard output.
pub const STDOUT_MARK: &str = "stdout";

/// Sentinel: discard output.
#[cfg(windows)]
pub const NUL_MARK: &str = "nul";
#[cfg(not(windows))]
pub const NUL_MARK: &str = "/dev/null";

#[inline]
pub fn is_stdin(s: &str) -> bool {
    s == STDIN_MARK
}

#[inline]
pub fn is_stdout(s: &str) -> bool {
    s == STDOUT_MARK
}

#[inline]
fn is_dev_null(s: &str) -> bool {
    s == NUL_MARK
}

// ---------------------------------------------------------------------------
// Source file
// ---------------------------------------------------------------------------

/// Opens a source for reading.
///
/// `"stdin"` returns standard input; a directory is rejected with
/// [`io::ErrorKind::InvalidInput`]; anything else is opened and buffered.
pub fn open_src_file(path: &str) -> io::Result<Box<dyn Read>> {
    if is_stdin(path) {
        displaylevel!(4, "Using stdin for input\n");
        return Ok(Box::new(io::stdin().lock()));
    }

    if Path::new(path).is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{path}: is a directory"),
        ));
    }

    let f = File::open(path)?;
    Ok(Box::new(BufReader::new(f)))
}

// ---------------------------------------------------------------------------
// Destination file
// ---------------------------------------------------------------------------

/// A write-capable destination produced by [`open_dst_file`].
pub struct DstFile {
    inner: Box<dyn Write>,
    /// `true` when writing to standard output.
    pub is_stdout: bool,
    /// `true` when the destination is a regular file this call created, so a
    /// failed operation may delete it.
    pub is_regular: bool,
}

impl Write for DstFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }
    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Opens a destination for writing.
///
/// `"stdout"` maps to standard output and [`NUL_MARK`] to [`io::sink`]. For
/// regular paths an existing file is only replaced when `prefs.overwrite` is
/// set; otherwise the call fails with [`io::ErrorKind::AlreadyExists`].
pub fn open_dst_file(path: &str, prefs: &Prefs) -> io::Result<DstFile> {
    if is_stdout(path) {
        displaylevel!(4, "Using stdout for output\n");
        return Ok(DstFile {
            inner: Box::new(io::stdout().lock()),
            is_stdout: true,
            is_regular: false,
        });
    }

    if is_dev_null(path) {
        return Ok(DstFile {
            inner: Box::new(io::sink()),
            is_stdout: false,
            is_regular: false,
        });
    }

    if !prefs.overwrite && Path::new(path).exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{path}: already exists; not overwritten"),
        ));
    }

    let f = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;

    Ok(DstFile {
        inner: Box::new(io::BufWriter::new(f)),
        is_stdout: false,
        is_regular: true,
    })
}

// ---------------------------------------------------------------------------
// Byte counters
// ---------------------------------------------------------------------------

/// `Read` adapter that counts bytes passing through.
pub struct CountingReader<R> {
    inner: R,
    count: u64,
}

impl<R: Read> CountingReader<R> {
    pub fn new(inner: R) -> Self {
        CountingReader { inner, count: 0 }
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}

impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.count += n as u64;
        Ok(n)
    }
}

/// `Write` adapter that counts bytes passing through.
pub struct CountingWriter<W> {
    inner: W,
    count: u64,
}

impl<W: Write> CountingWriter<W> {
    pub fn new(inner: W) -> Self {
        CountingWriter { inner, count: 0 }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.count += n as u64;
        Ok(n)
    }
    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
