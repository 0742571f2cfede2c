//! File-level bzip2 decompression and integrity testing.

use std::fs;
use std::io::{self, Read, Write};

use crate::file::BzReader;
use crate::io::compress::OpStats;
use crate::io::file_io::{is_stdin, open_dst_file, open_src_file, CountingReader, NUL_MARK};
use crate::io::prefs::Prefs;

/// Decompress every bzip2 stream in `src` into `dst`.
pub fn decompress_stream<R: Read, W: Write>(
    src: R,
    mut dst: W,
    prefs: &Prefs,
) -> io::Result<OpStats> {
    let mut bz = BzReader::with_params(CountingReader::new(src), &prefs.params, prefs.multi_stream)?;
    let bytes_out = io::copy(&mut bz, &mut dst)?;
    dst.flush()?;
    Ok(OpStats {
        bytes_in: bz.get_ref().count(),
        bytes_out,
    })
}

/// Decompress `src_name` into `dst_name` (either may be a stdin/stdout sentinel).
///
/// In test mode the output goes to the null device regardless of `dst_name`.
pub fn decompress_filename(prefs: &Prefs, src_name: &str, dst_name: &str) -> io::Result<OpStats> {
    let dst_name = if prefs.test_mode { NUL_MARK } else { dst_name };

    let src = open_src_file(src_name)?;
    let mut dst = open_dst_file(dst_name, prefs)?;
    let is_regular = dst.is_regular;

    let result = decompress_stream(src, &mut dst, prefs);
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

    stats.report(src_name, false);
    if prefs.remove_src_file && !prefs.test_mode && !is_stdin(src_name) && is_regular {
        fs::remove_file(src_name)?;
    }
    Ok(stats)
}

/// Check that `src_name` decodes cleanly, discarding the output.
pub fn test_filename(prefs: &Prefs, src_name: &str) -> io::Result<OpStats> {
    let mut prefs = prefs.clone();
    prefs.set_test_mode(true);
    decompress_filename(&prefs, src_name, NUL_MARK)
}
