//! Buffered bzip2 streaming I/O over the [`BzStream`] adapter.
//!
//! These are the collaborators that sit on top of the step-level adapter:
//! they own scratch buffers, call [`StreamWrapper::process`] until the
//! application's buffer is filled or drained, and turn codec failures into
//! `std::io::Error`.
//!
//! # Public API
//! - [`BzReader`]: decompressing `Read` adapter, handles concatenated streams
//! - [`BzWriter`]: compressing `Write` adapter with explicit [`BzWriter::finish`]
//! - [`bz_compress_to_vec`] / [`bz_decompress_to_vec`]: one-shot helpers

use std::io::{self, Read, Write};

use bzip2_sys::{BZ_RUN_OK, BZ_STREAM_END, BZ_UNEXPECTED_EOF};

use crate::config::{BzParams, STREAM_BUFFER_SIZE};
use crate::displaylevel;
use crate::stream::{BzStream, CodecError, ErrorKind, FlushMode, Mode, StreamWrapper};

fn truncated() -> io::Error {
    io::Error::new(
        io::ErrorKind::UnexpectedEof,
        CodecError::from_code(BZ_UNEXPECTED_EOF),
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// BzReader<R>
// ─────────────────────────────────────────────────────────────────────────────

/// Streaming bzip2 decompressor backed by any `R: Read`.
///
/// By default several back-to-back bzip2 streams are decoded as one, the way
/// `bzip2 -d` treats concatenated files. Bytes after the last stream that do
/// not start a new one are ignored with a warning.
pub struct BzReader<R: Read> {
    stream: BzStream,
    inner: R,
    params: BzParams,
    multi_stream: bool,
    /// Compressed bytes read from `inner`.
    src_buf: Vec<u8>,
    /// Number of valid bytes in `src_buf`.
    src_buf_size: usize,
    /// Read offset within `src_buf`.
    src_buf_next: usize,
    src_eof: bool,
    /// Streams that reached their end marker.
    streams_done: u64,
    finished: bool,
    /// Sticky: once a read fails, the session is dead and later reads fail too.
    errored: bool,
}

impl<R: Read> BzReader<R> {
    /// Decompress `inner` with default parameters and multi-stream support.
    pub fn new(inner: R) -> io::Result<Self> {
        Self::with_params(inner, &BzParams::default(), true)
    }

    /// Decompress `inner`; `multi_stream == false` stops after the first stream.
    pub fn with_params(inner: R, params: &BzParams, multi_stream: bool) -> io::Result<Self> {
        let stream = BzStream::with_params(Mode::Decompress, params)?;
        Ok(BzReader {
            stream,
            inner,
            params: *params,
            multi_stream,
            src_buf: vec![0u8; STREAM_BUFFER_SIZE],
            src_buf_size: 0,
            src_buf_next: 0,
            src_eof: false,
            streams_done: 0,
            finished: false,
            errored: false,
        })
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Return the underlying reader. Compressed bytes already buffered but not
    /// yet decoded are lost.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Number of complete bzip2 streams decoded so far.
    pub fn streams_done(&self) -> u64 {
        self.streams_done
    }

    #[inline]
    fn pending(&self) -> usize {
        self.src_buf_size - self.src_buf_next
    }

    fn fill(&mut self) -> io::Result<()> {
        let n = loop {
            match self.inner.read(&mut self.src_buf) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        };
        self.src_buf_size = n;
        self.src_buf_next = 0;
        if n == 0 {
            self.src_eof = true;
        }
        Ok(())
    }

    /// After an end marker: start a fresh session if more input follows.
    fn next_stream(&mut self) -> io::Result<()> {
        if !self.multi_stream {
            self.finished = true;
            return Ok(());
        }
        if self.pending() == 0 && !self.src_eof {
            self.fill()?;
        }
        if self.pending() == 0 {
            self.finished = true;
            return Ok(());
        }
        displaylevel!(4, "bzstream: stream {} done, next stream follows\n", self.streams_done);
        self.stream = BzStream::with_params(Mode::Decompress, &self.params)?;
        Ok(())
    }

    /// Bytes of a later stream that never completed the `BZh` signature.
    fn partial_signature(&self) -> bool {
        self.streams_done > 0 && self.stream.total_in() < 4
    }

    fn ignore_trailing(&mut self) {
        displaylevel!(2, "bzstream: trailing garbage after EOF ignored\n");
        self.finished = true;
    }

    fn decode(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        loop {
            if self.pending() == 0 && !self.src_eof {
                self.fill()?;
            }

            let input = &self.src_buf[self.src_buf_next..self.src_buf_size];
            let progress = match self.stream.process(input, buf, FlushMode::Run) {
                Ok(p) => p,
                // A later "stream" that does not even carry the signature.
                Err(e) if self.streams_done > 0 && e.kind() == ErrorKind::DataMagic => {
                    self.ignore_trailing();
                    return Ok(0);
                }
                Err(e) => return Err(e.into()),
            };
            self.src_buf_next += progress.consumed;

            if self.stream.done() {
                self.streams_done += 1;
                self.next_stream()?;
                if progress.produced > 0 || self.finished {
                    return Ok(progress.produced);
                }
                continue;
            }

            if progress.produced > 0 {
                return Ok(progress.produced);
            }

            if self.src_eof && self.pending() == 0 {
                // Up to three bytes after a complete stream, too short to be judged.
                // Anything past the signature is a truncated stream.
                if self.partial_signature() {
                    self.ignore_trailing();
                    return Ok(0);
                }
                return Err(truncated());
            }
        }
    }
}

impl<R: Read> Read for BzReader<R> {
    /// Decompress into `buf`. Returns `0` once every stream has ended.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.errored {
            return Err(io::Error::other("bzip2 reader is unusable after an earlier error"));
        }
        if buf.is_empty() || self.finished {
            return Ok(0);
        }
        self.decode(buf).inspect_err(|_| {
            self.errored = true;
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// BzWriter<W>
// ─────────────────────────────────────────────────────────────────────────────

/// Streaming bzip2 compressor backed by any `W: Write`.
///
/// Call [`BzWriter::finish`] to terminate the stream and get `W` back. If the
/// writer is dropped instead, finalization errors are discarded.
///
/// ```no_run
/// use bzstream::file::BzWriter;
/// use std::io::Write;
///
/// let mut bz = BzWriter::new(Vec::new(), 9).unwrap();
/// bz.write_all(b"hello").unwrap();
/// let compressed = bz.finish().unwrap();
/// ```
pub struct BzWriter<W: Write> {
    stream: BzStream,
    /// Wrapped in `Option` so `finish()` can take ownership.
    inner: Option<W>,
    dst_buf: Vec<u8>,
    /// Sticky: once set, nothing more is written and Drop skips finalization.
    errored: bool,
}

impl<W: Write> BzWriter<W> {
    /// Compress into `inner` at `level` (1..=9).
    pub fn new(inner: W, level: u32) -> io::Result<Self> {
        Self::with_params(inner, &BzParams::with_level(level))
    }

    pub fn with_params(inner: W, params: &BzParams) -> io::Result<Self> {
        let stream = BzStream::with_params(Mode::Compress, params)?;
        Ok(BzWriter {
            stream,
            inner: Some(inner),
            dst_buf: vec![0u8; STREAM_BUFFER_SIZE],
            errored: false,
        })
    }

    /// Raw bytes accepted so far.
    pub fn total_in(&self) -> u64 {
        self.stream.total_in()
    }

    /// Compressed bytes produced so far.
    pub fn total_out(&self) -> u64 {
        self.stream.total_out()
    }

    fn check_usable(&self) -> io::Result<()> {
        if self.errored {
            return Err(io::Error::other("bzip2 writer is unusable after an earlier error"));
        }
        Ok(())
    }

    fn dump(&mut self, len: usize) -> io::Result<()> {
        if len == 0 {
            return Ok(());
        }
        let inner = match self.inner.as_mut() {
            Some(w) => w,
            None => return Err(io::Error::other("bzip2 writer already finished")),
        };
        inner.write_all(&self.dst_buf[..len]).inspect_err(|_| {
            self.errored = true;
        })
    }

    /// Step with `flush` and no new input until the codec reports `until`.
    fn drive(&mut self, flush: FlushMode, until: i32) -> io::Result<()> {
        loop {
            let progress = self
                .stream
                .process(&[], &mut self.dst_buf, flush)
                .map_err(|e| {
                    self.errored = true;
                    io::Error::from(e)
                })?;
            self.dump(progress.produced)?;
            if progress.status == until {
                return Ok(());
            }
        }
    }

    /// Write the end-of-stream marker and return the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.check_usable()?;
        self.drive(FlushMode::Finish, BZ_STREAM_END)?;
        match self.inner.take() {
            Some(w) => Ok(w),
            None => Err(io::Error::other("bzip2 writer already finished")),
        }
    }
}

impl<W: Write> Write for BzWriter<W> {
    /// Feed `buf` to the compressor. Returns once at least one byte was taken.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.check_usable()?;
        if buf.is_empty() {
            return Ok(0);
        }
        loop {
            let progress = self
                .stream
                .process(buf, &mut self.dst_buf, FlushMode::Run)
                .map_err(|e| {
                    self.errored = true;
                    io::Error::from(e)
                })?;
            self.dump(progress.produced)?;
            if progress.consumed > 0 {
                return Ok(progress.consumed);
            }
        }
    }

    /// Close the current block so everything written so far is decodable,
    /// then flush `W`.
    fn flush(&mut self) -> io::Result<()> {
        self.check_usable()?;
        self.drive(FlushMode::Flush, BZ_RUN_OK)?;
        match self.inner.as_mut() {
            Some(w) => w.flush(),
            None => Ok(()),
        }
    }
}

impl<W: Write> Drop for BzWriter<W> {
    fn drop(&mut self) {
        if self.inner.is_none() || self.errored {
            return;
        }
        let _ = self.drive(FlushMode::Finish, BZ_STREAM_END);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Convenience functions
// ─────────────────────────────────────────────────────────────────────────────

/// Compress `data` as one complete bzip2 stream.
pub fn bz_compress_to_vec(data: &[u8], level: u32) -> io::Result<Vec<u8>> {
    let mut bz = BzWriter::new(Vec::with_capacity(data.len() / 2 + 64), level)?;
    bz.write_all(data)?;
    bz.finish()
}

/// Decompress every bzip2 stream in `data`.
pub fn bz_decompress_to_vec(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut bz = BzReader::new(data)?;
    let mut out = Vec::with_capacity(data.len() * 4);
    bz.read_to_end(&mut out)?;
    Ok(out)
}
