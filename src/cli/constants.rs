// cli/constants.rs - Identity constants, display level and display macros.
//
// The display level is a process-wide atomic so the library (reader warnings)
// and the binary share one setting.

use std::sync::atomic::{AtomicU32, Ordering};

// ── String / identity constants ───────────────────────────────────────────────
pub const COMPRESSOR_NAME: &str = "bzstream";
pub const BZ2_EXTENSION: &str = ".bz2";
pub const TBZ2_EXTENSION: &str = ".tbz2";
pub const TBZ_EXTENSION: &str = ".tbz";
pub const TAR_EXTENSION: &str = ".tar";
pub const OUT_EXTENSION: &str = ".out";

// ── Display level global ──────────────────────────────────────────────────────
//
// 0 = no output; 1 = errors only; 2 = warnings (default); 3 = per-file results;
// 4 = verbose
pub static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(2);

/// Returns the current display level.
#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

/// Sets the display level.
#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
}

/// Print to stderr unconditionally.
#[macro_export]
macro_rules! display {
    ($($arg:tt)*) => { eprint!($($arg)*) };
}

/// Print to stderr when the display level is at least `level`.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::cli::constants::display_level() >= $level {
            eprint!($($arg)*);
        }
    };
}
