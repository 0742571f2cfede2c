// prefs.rs - File-level compression / decompression preferences.
//
// `Prefs` is a plain value type owned by the caller. Setters clamp to the
// ranges libbzip2 accepts and return the value actually stored.

use crate::config::{BzParams, CLEVEL_MAX, CLEVEL_MIN, WORK_FACTOR_MAX};

/// All tunable parameters for file compression and decompression.
#[derive(Clone, Debug)]
pub struct Prefs {
    /// Codec parameters (level, work factor, small-memory decoding).
    pub params: BzParams,
    /// Overwrite existing destination files. Default: false.
    pub overwrite: bool,
    /// Test mode - decompress but discard output. Default: false.
    pub test_mode: bool,
    /// Remove the source file after a successful operation. Default: false.
    pub remove_src_file: bool,
    /// Decode concatenated bzip2 streams as one. Default: true.
    pub multi_stream: bool,
}

impl Default for Prefs {
    fn default() -> Self {
        Prefs {
            params: BzParams::default(),
            overwrite: false,
            test_mode: false,
            remove_src_file: false,
            multi_stream: true,
        }
    }
}

impl Prefs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the compression level, clamped to [1, 9]. Returns the value stored.
    pub fn set_compression_level(&mut self, level: u32) -> u32 {
        let clamped = level.clamp(CLEVEL_MIN, CLEVEL_MAX);
        self.params.level = clamped;
        clamped
    }

    /// Sets the work factor, clamped to [0, 250]. Returns the value stored.
    pub fn set_work_factor(&mut self, work_factor: u32) -> u32 {
        let clamped = work_factor.min(WORK_FACTOR_MAX);
        self.params.work_factor = clamped;
        clamped
    }

    pub fn set_small(&mut self, yes: bool) -> bool {
        self.params.small = yes;
        yes
    }

    pub fn set_overwrite(&mut self, yes: bool) -> bool {
        self.overwrite = yes;
        yes
    }

    pub fn set_test_mode(&mut self, yes: bool) -> bool {
        self.test_mode = yes;
        yes
    }

    pub fn set_remove_src_file(&mut self, yes: bool) -> bool {
        self.remove_src_file = yes;
        yes
    }

    pub fn set_multi_stream(&mut self, yes: bool) -> bool {
        self.multi_stream = yes;
        yes
    }
}
