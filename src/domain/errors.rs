//! Structured error types for logdump
//!
//! Using thiserror for automatic Display implementation and error chaining.
//!
//! The taxonomy mirrors the propagation policy of the decoder: tool and
//! decoder lookup failures are fatal before the stream loop starts, an
//! unresolvable message pointer aborts the session mid-stream, and a short
//! read is never an error at all (it is end-of-stream, handled in the
//! decoder without touching this enum).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("required external tool '{0}' not found on PATH")]
    ToolNotFound(String),

    #[error("location decoder '{}' not found (override with --loc-binary)", .0.display())]
    DecoderNotFound(PathBuf),

    #[error("tool '{tool}' failed with {status}: {stderr}")]
    ToolFailed { tool: String, status: String, stderr: String },

    #[error("no section base address found in hex-dump output")]
    SectionBaseNotFound,

    #[error("no offset for section '{0}' found in sizing-tool output")]
    SectionOffsetNotFound(String),

    #[error(
        "message pointer 0x{pointer:x} resolves to offset 0x{offset:x}, \
         which is absent from the string table (stale log or rebuilt binary?)"
    )]
    OffsetResolution { pointer: u64, offset: u64 },

    #[error("message pointer 0x{0:x} precedes the computed section base")]
    PointerUnderflow(u64),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_resolution_display() {
        let err = DecodeError::OffsetResolution { pointer: 0x3010, offset: 0x10 };
        assert!(err.to_string().contains("0x3010"));
        assert!(err.to_string().contains("0x10"));
        assert!(err.to_string().contains("string table"));
    }

    #[test]
    fn test_tool_not_found_display() {
        let err = DecodeError::ToolNotFound("readelf".to_string());
        assert_eq!(err.to_string(), "required external tool 'readelf' not found on PATH");
    }
}
