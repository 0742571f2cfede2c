//! libbzip2 return-code translation.
//!
//! Every `BZ2_*` entry point reports failure through a negative `int`. This
//! module turns those integers into a closed [`ErrorKind`] plus a readable
//! message, and defines the two error values the adapter raises:
//! [`StreamError::CodecInit`] (construction) and [`StreamError::CodecStep`]
//! (stepping).
//!
//! The translator is a pure function with no state, so it is safe to call
//! from any number of adapters on any thread.

use core::fmt;
use std::io;

use bzip2_sys::{
    BZ_CONFIG_ERROR, BZ_DATA_ERROR, BZ_DATA_ERROR_MAGIC, BZ_IO_ERROR, BZ_MEM_ERROR,
    BZ_OUTBUFF_FULL, BZ_PARAM_ERROR, BZ_SEQUENCE_ERROR, BZ_UNEXPECTED_EOF,
};

/// Prefix carried by every translated message.
const MESSAGE_PREFIX: &str = "bzlib: ";

// ─────────────────────────────────────────────────────────────────────────────
// ErrorKind
// ─────────────────────────────────────────────────────────────────────────────

/// Documented libbzip2 failure causes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// `BZ_CONFIG_ERROR`: the library was built for a different C data model.
    Config,
    /// `BZ_SEQUENCE_ERROR`: call issued in the wrong state (e.g. after stream end).
    Sequence,
    /// `BZ_PARAM_ERROR`: out-of-range block size, work factor or action.
    Param,
    /// `BZ_MEM_ERROR`: the codec could not allocate its working memory.
    Mem,
    /// `BZ_DATA_ERROR`: integrity failure inside the compressed stream.
    Data,
    /// `BZ_DATA_ERROR_MAGIC`: input does not start with the `BZh` signature.
    DataMagic,
    /// `BZ_IO_ERROR`: only produced by the `FILE*` API, kept for completeness.
    Io,
    /// `BZ_UNEXPECTED_EOF`: compressed input ended before the end-of-stream marker.
    UnexpectedEof,
    /// `BZ_OUTBUFF_FULL`: output space exhausted (one-shot API).
    OutbuffFull,
    /// Anything libbzip2 does not document.
    Unknown(i32),
}

impl ErrorKind {
    /// Map a raw return code to its kind.
    ///
    /// Success codes are not errors and land in [`ErrorKind::Unknown`]; callers
    /// only translate codes already known to be failures.
    pub fn from_code(code: i32) -> Self {
        match code {
            BZ_CONFIG_ERROR => ErrorKind::Config,
            BZ_SEQUENCE_ERROR => ErrorKind::Sequence,
            BZ_PARAM_ERROR => ErrorKind::Param,
            BZ_MEM_ERROR => ErrorKind::Mem,
            BZ_DATA_ERROR => ErrorKind::Data,
            BZ_DATA_ERROR_MAGIC => ErrorKind::DataMagic,
            BZ_IO_ERROR => ErrorKind::Io,
            BZ_UNEXPECTED_EOF => ErrorKind::UnexpectedEof,
            BZ_OUTBUFF_FULL => ErrorKind::OutbuffFull,
            other => ErrorKind::Unknown(other),
        }
    }

    /// The libbzip2 macro name for this kind, or `None` for unknown codes.
    pub fn code_name(&self) -> Option<&'static str> {
        match self {
            ErrorKind::Config => Some("BZ_CONFIG_ERROR"),
            ErrorKind::Sequence => Some("BZ_SEQUENCE_ERROR"),
            ErrorKind::Param => Some("BZ_PARAM_ERROR"),
            ErrorKind::Mem => Some("BZ_MEM_ERROR"),
            ErrorKind::Data => Some("BZ_DATA_ERROR"),
            ErrorKind::DataMagic => Some("BZ_DATA_ERROR_MAGIC"),
            ErrorKind::Io => Some("BZ_IO_ERROR"),
            ErrorKind::UnexpectedEof => Some("BZ_UNEXPECTED_EOF"),
            ErrorKind::OutbuffFull => Some("BZ_OUTBUFF_FULL"),
            ErrorKind::Unknown(_) => None,
        }
    }

    /// `true` for kinds caused by damaged or incomplete compressed input.
    pub fn is_corrupt_input(&self) -> bool {
        matches!(
            self,
            ErrorKind::Data | ErrorKind::DataMagic | ErrorKind::UnexpectedEof
        )
    }
}

/// Translate a native return code into its kind and a readable message.
///
/// Known codes read `bzlib: BZ_DATA_ERROR: -4`; undocumented ones read
/// `bzlib: unknown code 42`.
pub fn translate(code: i32) -> (ErrorKind, String) {
    let kind = ErrorKind::from_code(code);
    let message = match kind.code_name() {
        Some(name) => format!("{MESSAGE_PREFIX}{name}: {code}"),
        None => format!("{MESSAGE_PREFIX}unknown code {code}"),
    };
    (kind, message)
}

// ─────────────────────────────────────────────────────────────────────────────
// CodecError / StreamError
// ─────────────────────────────────────────────────────────────────────────────

/// A failed native call: the raw code and its translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecError {
    code: i32,
    kind: ErrorKind,
    message: String,
}

impl CodecError {
    pub fn from_code(code: i32) -> Self {
        let (kind, message) = translate(code);
        CodecError {
            code,
            kind,
            message,
        }
    }

    /// Raw libbzip2 return code.
    #[inline]
    pub fn code(&self) -> i32 {
        self.code
    }

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CodecError {}

/// Errors raised by a stream adapter.
///
/// Both variants are fatal: `CodecInit` means no session exists, `CodecStep`
/// means the session's native state is unusable and the adapter must be
/// dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// The native initializer did not return `BZ_OK`.
    CodecInit(CodecError),
    /// A step returned a status outside the mode's success set.
    CodecStep(CodecError),
}

impl StreamError {
    pub fn init(code: i32) -> Self {
        StreamError::CodecInit(CodecError::from_code(code))
    }

    pub fn step(code: i32) -> Self {
        StreamError::CodecStep(CodecError::from_code(code))
    }

    /// The translated native failure, whichever phase raised it.
    pub fn codec(&self) -> &CodecError {
        match self {
            StreamError::CodecInit(e) | StreamError::CodecStep(e) => e,
        }
    }

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.codec().kind()
    }

    #[inline]
    pub fn code(&self) -> i32 {
        self.codec().code()
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::CodecInit(e) => write!(f, "codec initialization failed: {e}"),
            StreamError::CodecStep(e) => write!(f, "codec step failed: {e}"),
        }
    }
}

impl std::error::Error for StreamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.codec())
    }
}

impl From<StreamError> for io::Error {
    fn from(err: StreamError) -> Self {
        let kind = match err.kind() {
            ErrorKind::UnexpectedEof => io::ErrorKind::UnexpectedEof,
            ErrorKind::Data | ErrorKind::DataMagic => io::ErrorKind::InvalidData,
            ErrorKind::Mem => io::ErrorKind::OutOfMemory,
            ErrorKind::Param => io::ErrorKind::InvalidInput,
            _ => io::ErrorKind::Other,
        };
        io::Error::new(kind, err)
    }
}
