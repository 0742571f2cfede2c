//! Backend-agnostic streaming codec interface.
//!
//! [`StreamWrapper`] is the flat capability trait a multi-codec dispatcher
//! drives: move cursors, step, ask whether the stream ended. Each backend
//! provides one implementing type; [`bz::BzStream`] is the libbzip2 one.
//!
//! # Cursor contract
//! The cursor mutators are a raw pass-through to the native state. The caller
//! owns the buffers and must keep every pointer/length pair valid until the
//! cursor is replaced or the adapter is dropped. Nothing is bounds-checked.
//! [`StreamWrapper::process`] wraps that contract for callers holding slices.

pub mod bz;
pub mod error;

pub use bz::BzStream;
pub use error::{translate, CodecError, ErrorKind, StreamError};

use core::ptr;

/// Direction of a session, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Input side: compressed bytes in, raw bytes out.
    Decompress,
    /// Output side: raw bytes in, compressed bytes out.
    Compress,
}

/// Compressor action for one step. Ignored when decompressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlushMode {
    /// Keep accumulating input (`BZ_RUN`).
    #[default]
    Run,
    /// Emit everything buffered so far, ending the current block (`BZ_FLUSH`).
    Flush,
    /// Emit everything and terminate the stream (`BZ_FINISH`).
    Finish,
}

/// Outcome of one [`StreamWrapper::process`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Bytes taken from the input slice.
    pub consumed: usize,
    /// Bytes written to the output slice.
    pub produced: usize,
    /// Native status code returned by the step.
    pub status: i32,
}

/// One streaming codec session.
///
/// Construction and destruction are backend-specific (a constructor plus
/// `Drop`); everything a driver needs between the two lives here.
pub trait StreamWrapper {
    /// Advance the codec by one unit of work over the current cursors.
    ///
    /// Returns the native status. Any failure is fatal for the session.
    fn step(&mut self, flush: FlushMode) -> Result<i32, StreamError>;

    /// `true` once a step has returned the backend's end-of-stream sentinel.
    fn stream_end(&self) -> bool;

    /// Uniform "nothing left to do" query used by dispatchers.
    fn done(&self) -> bool {
        self.stream_end()
    }

    fn next_in(&self) -> *const u8;
    fn avail_in(&self) -> usize;
    fn next_out(&self) -> *mut u8;
    fn avail_out(&self) -> usize;

    /// # Safety
    /// `ptr` must be readable for the length later given to `set_avail_in`
    /// and stay valid until replaced or until the adapter is dropped.
    unsafe fn set_next_in(&mut self, ptr: *const u8);

    /// # Safety
    /// `len` must not exceed the readable length behind `next_in`.
    unsafe fn set_avail_in(&mut self, len: usize);

    /// # Safety
    /// `ptr` must be writable for the length later given to `set_avail_out`
    /// and stay valid until replaced or until the adapter is dropped.
    unsafe fn set_next_out(&mut self, ptr: *mut u8);

    /// # Safety
    /// `len` must not exceed the writable length behind `next_out`.
    unsafe fn set_avail_out(&mut self, len: usize);

    /// Largest length a single cursor can describe.
    fn max_chunk(&self) -> usize {
        usize::MAX
    }

    /// Step once over borrowed slices.
    ///
    /// Points the cursors at `input`/`output`, steps, reads back how far they
    /// moved, then clears both cursors so no pointer outlives the borrow.
    /// Slices longer than [`max_chunk`](Self::max_chunk) are only partly
    /// exposed; the caller sees that through `consumed`/`produced`.
    fn process(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        flush: FlushMode,
    ) -> Result<Progress, StreamError> {
        let in_len = input.len().min(self.max_chunk());
        let out_len = output.len().min(self.max_chunk());

        // SAFETY: both slices are borrowed for the whole call, the lengths never
        // exceed theirs, and the cursors are cleared before returning.
        unsafe {
            self.set_next_in(input.as_ptr());
            self.set_avail_in(in_len);
            self.set_next_out(output.as_mut_ptr());
            self.set_avail_out(out_len);
        }

        let result = self.step(flush);

        let consumed = in_len - self.avail_in();
        let produced = out_len - self.avail_out();

        // SAFETY: null/zero cursors describe no memory at all.
        unsafe {
            self.set_next_in(ptr::null());
            self.set_avail_in(0);
            self.set_next_out(ptr::null_mut());
            self.set_avail_out(0);
        }

        let status = result?;
        Ok(Progress {
            consumed,
            produced,
            status,
        })
    }
}
