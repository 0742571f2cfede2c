// config.rs - Compile-time configuration constants and codec parameters.
//
// Level and work-factor defaults match the bzip2 tool (`-9`, work factor 30).
// They can be overridden by the BZ2_CLEVEL / BZ2_WORKFACTOR environment
// variables (see cli::op_mode) and by command-line flags.

// Default compression level (blockSize100k).
pub const CLEVEL_DEFAULT: u32 = 9;

// Valid compression levels accepted by BZ2_bzCompressInit.
pub const CLEVEL_MIN: u32 = 1;
pub const CLEVEL_MAX: u32 = 9;

// Default work factor. 0 selects libbzip2's internal default, which is also 30.
pub const WORK_FACTOR_DEFAULT: u32 = 30;

// Upper bound accepted by BZ2_bzCompressInit.
pub const WORK_FACTOR_MAX: u32 = 250;

// Size of the compressed-side scratch buffer used by the Read/Write wrappers.
pub const STREAM_BUFFER_SIZE: usize = 64 * 1024;

// Size of the raw-side chunk used by the file I/O layer.
pub const IO_CHUNK_SIZE: usize = 128 * 1024;

/// Parameters handed to a codec at construction.
///
/// `level` and `work_factor` only affect compression; `small` only affects
/// decompression. All three are accepted in both modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BzParams {
    /// Block size in units of 100 kB, 1..=9.
    pub level: u32,
    /// Fallback-sort threshold for repetitive input, 0..=250.
    pub work_factor: u32,
    /// Use libbzip2's low-memory decompression algorithm.
    pub small: bool,
}

impl Default for BzParams {
    fn default() -> Self {
        BzParams {
            level: CLEVEL_DEFAULT,
            work_factor: WORK_FACTOR_DEFAULT,
            small: false,
        }
    }
}

impl BzParams {
    pub fn with_level(level: u32) -> Self {
        BzParams {
            level,
            ..Self::default()
        }
    }
}
