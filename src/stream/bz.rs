//! libbzip2 stream adapter.
//!
//! [`BzStream`] owns one `bz_stream` for the lifetime of one compression or
//! decompression session:
//!
//! - construction runs `BZ2_bzCompressInit` / `BZ2_bzDecompressInit` and
//!   either yields a ready stream or an error with nothing left to release;
//! - [`StreamWrapper::step`] runs `BZ2_bzCompress` / `BZ2_bzDecompress` and
//!   translates failures through [`crate::stream::error`];
//! - `Drop` runs the matching `*End` exactly once.
//!
//! ## Address stability
//! libbzip2 records the address of the `bz_stream` inside its private state
//! and rejects any call made through a different address with
//! `BZ_PARAM_ERROR`. The struct therefore lives in a `Box` that is never
//! moved out of, so moving the `BzStream` value itself is fine.

use core::{fmt, mem};

use bzip2_sys::{
    bz_stream, BZ2_bzCompress, BZ2_bzCompressEnd, BZ2_bzCompressInit, BZ2_bzDecompress,
    BZ2_bzDecompressEnd, BZ2_bzDecompressInit, BZ_FINISH, BZ_FINISH_OK, BZ_FLUSH, BZ_FLUSH_OK,
    BZ_OK, BZ_RUN, BZ_RUN_OK, BZ_STREAM_END,
};
use libc::{c_char, c_int, c_uint};

use super::error::StreamError;
use super::{FlushMode, Mode, StreamWrapper};
use crate::config::BzParams;

/// libbzip2 verbosity; anything above 0 prints to the C library's stderr.
const VERBOSITY: c_int = 0;

fn action(flush: FlushMode) -> c_int {
    match flush {
        FlushMode::Run => BZ_RUN,
        FlushMode::Flush => BZ_FLUSH,
        FlushMode::Finish => BZ_FINISH,
    }
}

/// A live libbzip2 session.
///
/// # Thread safety
/// `BzStream` is `Send` but **not** `Sync`. The native state has no internal
/// locking; one session belongs to one thread at a time.
pub struct BzStream {
    raw: Box<bz_stream>,
    mode: Mode,
    /// Status of the last successful step (`BZ_OK` before the first one).
    last_status: c_int,
}

// SAFETY: the raw pointers inside `bz_stream` point either into libbzip2's
// private allocation, which is owned by this value alone, or into caller
// buffers whose validity the unsafe cursor setters already require.
unsafe impl Send for BzStream {}

impl BzStream {
    /// Open a session. `level` and `work_factor` only matter for
    /// [`Mode::Compress`] and are ignored when decompressing.
    pub fn new(mode: Mode, level: u32, work_factor: u32) -> Result<Self, StreamError> {
        Self::with_params(
            mode,
            &BzParams {
                level,
                work_factor,
                small: false,
            },
        )
    }

    /// Decompression session with default parameters.
    pub fn decompressor() -> Result<Self, StreamError> {
        Self::with_params(Mode::Decompress, &BzParams::default())
    }

    /// Compression session at `level` with the default work factor.
    pub fn compressor(level: u32) -> Result<Self, StreamError> {
        Self::with_params(Mode::Compress, &BzParams::with_level(level))
    }

    /// Open a session from a full parameter set.
    ///
    /// On failure the native initializer has already released whatever it
    /// allocated, so no `*End` call is owed and none is made.
    pub fn with_params(mode: Mode, params: &BzParams) -> Result<Self, StreamError> {
        // SAFETY: an all-zero bz_stream is the documented pre-init state: null
        // cursors, and null bzalloc/bzfree/opaque select malloc/free.
        let mut raw: Box<bz_stream> = Box::new(unsafe { mem::zeroed() });

        let ret = match mode {
            // SAFETY: `raw` is a valid, exclusively owned, zeroed bz_stream.
            Mode::Decompress => unsafe {
                BZ2_bzDecompressInit(&mut *raw, VERBOSITY, c_int::from(params.small))
            },
            Mode::Compress => unsafe {
                BZ2_bzCompressInit(
                    &mut *raw,
                    params.level as c_int,
                    VERBOSITY,
                    params.work_factor as c_int,
                )
            },
        };

        if ret != BZ_OK {
            return Err(StreamError::init(ret));
        }

        Ok(BzStream {
            raw,
            mode,
            last_status: BZ_OK,
        })
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Status returned by the most recent successful step.
    #[inline]
    pub fn last_status(&self) -> i32 {
        self.last_status
    }

    /// Total bytes consumed since construction.
    pub fn total_in(&self) -> u64 {
        (u64::from(self.raw.total_in_hi32) << 32) | u64::from(self.raw.total_in_lo32)
    }

    /// Total bytes produced since construction.
    pub fn total_out(&self) -> u64 {
        (u64::from(self.raw.total_out_hi32) << 32) | u64::from(self.raw.total_out_lo32)
    }

    fn is_success(&self, ret: c_int) -> bool {
        match self.mode {
            Mode::Decompress => ret == BZ_OK || ret == BZ_STREAM_END,
            Mode::Compress => matches!(ret, BZ_RUN_OK | BZ_FLUSH_OK | BZ_FINISH_OK | BZ_STREAM_END),
        }
    }
}

impl StreamWrapper for BzStream {
    fn step(&mut self, flush: FlushMode) -> Result<i32, StreamError> {
        // SAFETY: `raw` was initialised for `mode` and not yet ended; cursor
        // validity is the caller's obligation from the unsafe setters.
        let ret = match self.mode {
            Mode::Decompress => unsafe { BZ2_bzDecompress(&mut *self.raw) },
            Mode::Compress => unsafe { BZ2_bzCompress(&mut *self.raw, action(flush)) },
        };

        if !self.is_success(ret) {
            return Err(StreamError::step(ret));
        }
        self.last_status = ret;
        Ok(ret)
    }

    #[inline]
    fn stream_end(&self) -> bool {
        self.last_status == BZ_STREAM_END
    }

    #[inline]
    fn next_in(&self) -> *const u8 {
        self.raw.next_in as *const u8
    }

    #[inline]
    fn avail_in(&self) -> usize {
        self.raw.avail_in as usize
    }

    #[inline]
    fn next_out(&self) -> *mut u8 {
        self.raw.next_out as *mut u8
    }

    #[inline]
    fn avail_out(&self) -> usize {
        self.raw.avail_out as usize
    }

    #[inline]
    unsafe fn set_next_in(&mut self, ptr: *const u8) {
        self.raw.next_in = ptr as *mut c_char;
    }

    #[inline]
    unsafe fn set_avail_in(&mut self, len: usize) {
        debug_assert!(len <= c_uint::MAX as usize);
        self.raw.avail_in = len as c_uint;
    }

    #[inline]
    unsafe fn set_next_out(&mut self, ptr: *mut u8) {
        self.raw.next_out = ptr as *mut c_char;
    }

    #[inline]
    unsafe fn set_avail_out(&mut self, len: usize) {
        debug_assert!(len <= c_uint::MAX as usize);
        self.raw.avail_out = len as c_uint;
    }

    #[inline]
    fn max_chunk(&self) -> usize {
        c_uint::MAX as usize
    }
}

impl Drop for BzStream {
    fn drop(&mut self) {
        // SAFETY: a BzStream only exists after a successful *Init for `mode`,
        // and Drop runs once, so this is the single matching *End.
        unsafe {
            let _ = match self.mode {
                Mode::Decompress => BZ2_bzDecompressEnd(&mut *self.raw),
                Mode::Compress => BZ2_bzCompressEnd(&mut *self.raw),
            };
        }
    }
}

impl fmt::Debug for BzStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BzStream")
            .field("mode", &self.mode)
            .field("last_status", &self.last_status)
            .field("avail_in", &self.raw.avail_in)
            .field("avail_out", &self.raw.avail_out)
            .field("total_in", &self.total_in())
            .field("total_out", &self.total_out())
            .finish()
    }
}
