//! Log-file header decoding.
//!
//! The writer places a fixed 32-byte header at offset 0 of the log file
//! (little-endian throughout):
//!
//! ```text
//! u64 writer_index            monotonic slot counter, unused when decoding
//! u64 runtime_base_address    image load address at logger init time
//! u32 pad
//! u16 pad
//! u8  platform_tag            0 = Linux, 1 = MacOS
//! u8  location_scheme         0 = none, 1 = default, 2 = elf-encoded
//! u64 pad
//! ```
//!
//! The runtime base address is the only translation anchor we get: entry
//! pointers are absolute addresses in the writer's address space, and
//! subtracting the base (plus the section's static offset) turns them back
//! into string-table offsets.

use std::io::{self, Read};

use crate::wire::{read_full, read_u64};

/// Exact on-disk size of the header record.
pub const HEADER_SIZE: usize = 32;

/// Platform the log was written on. Selects the address-translation layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    MacOs,
}

impl Platform {
    /// An out-of-range tag degrades to Linux; the header is never a reason
    /// to refuse a decode.
    #[must_use]
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            1 => Platform::MacOs,
            _ => Platform::Linux,
        }
    }
}

/// Location-id encoding scheme declared by the writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocScheme {
    /// No location ids expected; a non-zero id is a writer/decoder mismatch.
    None,
    /// Ids are resolved through the external location-decoder executable.
    Default,
    /// Ids are ELF-encoded; surfaced as raw integers, never resolved here.
    ElfEncoded,
}

impl LocScheme {
    /// Maps the raw 2-bit encoding; out-of-range degrades to `None`.
    #[must_use]
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            1 => LocScheme::Default,
            2 => LocScheme::ElfEncoded,
            _ => LocScheme::None,
        }
    }
}

/// Decoded log-file header.
#[derive(Debug, Clone, Copy)]
pub struct LogHeader {
    pub writer_index: u64,
    pub runtime_base: u64,
    pub platform: Platform,
    pub loc_scheme: LocScheme,
}

impl LogHeader {
    /// Read and decode the header-sized prefix of the log file.
    ///
    /// Returns `Ok(None)` if fewer than [`HEADER_SIZE`] bytes are available:
    /// a short header means an empty log, not a corrupt one.
    ///
    /// # Errors
    /// Only genuine I/O failures propagate.
    pub fn read_from<R: Read>(reader: &mut R) -> io::Result<Option<Self>> {
        let mut buf = [0u8; HEADER_SIZE];
        if read_full(reader, &mut buf)? < HEADER_SIZE {
            return Ok(None);
        }
        Ok(Some(Self::parse(&buf)))
    }

    /// Unpack a full header record. The platform tag is not validated
    /// against the current host; logs decode anywhere.
    #[must_use]
    pub fn parse(buf: &[u8; HEADER_SIZE]) -> Self {
        Self {
            writer_index: read_u64(buf, 0),
            runtime_base: read_u64(buf, 8),
            // bytes 16..22 are reserved padding
            platform: Platform::from_raw(buf[22]),
            loc_scheme: LocScheme::from_raw(buf[23]),
            // bytes 24..32 are reserved padding
        }
    }
}
