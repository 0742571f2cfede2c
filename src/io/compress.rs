//! File-level bzip2 compression.
//!
//! [`compress_stream`] pumps any reader through a [`BzWriter`];
//! [`compress_filename`] adds path resolution, overwrite policy, cleanup of a
//! partial destination on failure and optional source removal.

use std::fs;
use std::io::{self, Read, Write};

use crate::config::{BzParams, IO_CHUNK_SIZE};
use crate::displaylevel;
use crate::file::BzWriter;
use crate::io::file_io::{is_stdin, open_dst_file, open_src_file, CountingWriter};
use crate::io::prefs::Prefs;

/// Byte totals of one file operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpStats {
    /// Bytes read from the source.
    pub bytes_in: u64,
    /// Bytes written to the destination.
    pub bytes_out: u64,
}

impl OpStats {
    /// Print the bzip2-style ratio line at display level 3.
    pub fn report(&self, name: &str, compressing: bool) {
        let (raw, packed) = if compressing {
            (self.bytes_in, self.bytes_out)
        } else {
            (self.bytes_out, self.bytes_in)
        };
        if raw == 0 || packed == 0 {
            displaylevel!(3, "{name}: no data compressed.\n");
            return;
        }
        let ratio = raw as f64 / packed as f64;
        let bits_per_byte = 8.0 * packed as f64 / raw as f64;
        let saved = 100.0 * (1.0 - packed as f64 / raw as f64);
        displaylevel!(
            3,
            "{name}: {ratio:6.3}:1, {bits_per_byte:6.3} bits/byte, {saved:5.2}% saved, {raw} in, {packed} out.\n"
        );
    }
}

/// Compress everything `src` yields into `dst` as one bzip2 stream.
pub fn compress_stream<R: Read, W: Write>(
    mut src: R,
    dst: W,
    params: &BzParams,
) -> io::Result<OpStats> {
    let mut bz = BzWriter::with_params(CountingWriter::new(dst), params)?;
    let mut buf = vec![0u8; IO_CHUNK_SIZE];
    let mut bytes_in = 0u64;

    loop {
        let n = match src.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        bz.write_all(&buf[..n])?;
        bytes_in += n as u64;
    }

    let mut dst = bz.finish()?;
    dst.flush()?;
    Ok(OpStats {
        bytes_in,
        bytes_out: dst.count(),
    })
}

/// Compress `src_name` into `dst_name` (either may be a stdin/stdout sentinel).
pub fn compress_filename(prefs: &Prefs, src_name: &str, dst_name: &str) -> io::Result<OpStats> {
    let src = open_src_file(src_name)?;
    let mut dst = open_dst_file(dst_name, prefs)?;
    let is_regular = dst.is_regular;

    let result = compress_stream(src, &mut dst, &prefs.params);
    drop(dst);

    let stats = match result {
        Ok(stats) => stats,
        Err(e) => {
            if is_regular {
                let _ = fs::remove_file(dst_name);
            }
            return Err(e);
        }
    };

    stats.report(src_name, true);
    if prefs.remove_src_file && !is_stdin(src_name) && is_regular {
        fs::remove_file(src_name)?;
    }
    Ok(stats)
}
