// bzstream - streaming bzip2 adapter over libbzip2's `bz_stream`

pub mod config;
pub mod stream;
pub mod file;
pub mod io;
pub mod cli;

// ── Version constants ─────────────────────────────────────────────────────────
pub const BZSTREAM_VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

/// Returns the crate version string.
pub fn version_string() -> &'static str {
    BZSTREAM_VERSION_STRING
}

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use config::BzParams;
pub use file::{bz_compress_to_vec, bz_decompress_to_vec, BzReader, BzWriter};
pub use stream::{
    translate, BzStream, CodecError, ErrorKind, FlushMode, Mode, Progress, StreamError,
    StreamWrapper,
};
