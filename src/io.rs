//! Public API surface for bzip2 file I/O operations.
//!
//! Assembles the sub-modules and re-exports the symbols consumed by the CLI
//! and library users.

pub mod compress;
pub mod decompress;
pub mod file_io;
pub mod prefs;

pub use prefs::Prefs;

// Sentinel constants
pub use file_io::{NUL_MARK, STDIN_MARK, STDOUT_MARK};

// Compression / decompression entry points
pub use compress::{compress_filename, compress_stream, OpStats};
pub use decompress::{decompress_filename, decompress_stream, test_filename};
