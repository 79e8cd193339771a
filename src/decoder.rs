//! The entry-stream state machine.
//!
//! Entries are fixed 32-byte records (little-endian) following the header:
//!
//! ```text
//! i32 thread_id      writer thread that produced the record
//! i32 location_id    0 = no location recorded
//! u64 message_pointer  absolute runtime address of the format string
//! u64 arg1
//! u64 arg2
//! ```
//!
//! A zero `message_pointer` is the end-of-stream sentinel (an unwritten
//! slot, not corruption), and a short read is end-of-stream too. The only
//! hard mid-stream failure is a message pointer that translates to an
//! offset missing from the string table.

use log::warn;
use std::fmt;
use std::io::Read;

use crate::domain::{DecodeError, LocationId, Tid};
use crate::header::LocScheme;
use crate::locdec::LocDecoder;
use crate::render::render_message;
use crate::resolver::AddressResolver;
use crate::section::StringTable;
use crate::wire::{read_full, read_u32, read_u64};

/// Exact on-disk size of one entry record.
pub const ENTRY_SIZE: usize = 32;

/// One raw entry as stored in the log file.
#[derive(Debug, Clone, Copy)]
pub struct LogEntry {
    pub tid: i32,
    pub location_id: i32,
    pub message_pointer: u64,
    pub arg1: u64,
    pub arg2: u64,
}

impl LogEntry {
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub(crate) fn parse(buf: &[u8; ENTRY_SIZE]) -> Self {
        Self {
            tid: read_u32(buf, 0) as i32,
            location_id: read_u32(buf, 4) as i32,
            message_pointer: read_u64(buf, 8),
            arg1: read_u64(buf, 16),
            arg2: read_u64(buf, 24),
        }
    }
}

/// Location information attached to a decoded entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// No location recorded (`location_id == 0`).
    None,
    /// Resolved through the external location decoder.
    Resolved(String),
    /// ELF-encoded id, surfaced as the bare integer without resolution.
    Raw(i32),
    /// Non-zero id while the header declares no encoding scheme: a
    /// writer/decoder mismatch, surfaced distinctly rather than dropped.
    SchemeMismatch(i32),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::None => Ok(()),
            Location::Resolved(text) => write!(f, "{text}"),
            Location::Raw(id) => write!(f, "loc={id}"),
            Location::SchemeMismatch(id) => write!(f, "loc={id} (no scheme in header)"),
        }
    }
}

/// One fully decoded trace record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedEntry {
    pub tid: Tid,
    pub location: Location,
    pub message: String,
    pub arg1: u64,
    pub arg2: u64,
}

/// Decoder progress. `Reading` loops through decoded entries; the other
/// two states are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderState {
    Reading,
    EndOfStream,
    ResolutionError,
}

/// Sequential decoder over the entry region of a log file.
///
/// The reader must be positioned just past the header. All resolution
/// context (string table, address resolver, location decoder) is built
/// once per session and owned here for the session's lifetime.
pub struct EntryDecoder<R> {
    reader: R,
    resolver: AddressResolver,
    table: StringTable,
    scheme: LocScheme,
    loc_decoder: Option<LocDecoder>,
    state: DecoderState,
    entries_decoded: usize,
}

impl<R: Read> EntryDecoder<R> {
    pub fn new(
        reader: R,
        resolver: AddressResolver,
        table: StringTable,
        scheme: LocScheme,
        loc_decoder: Option<LocDecoder>,
    ) -> Self {
        Self {
            reader,
            resolver,
            table,
            scheme,
            loc_decoder,
            state: DecoderState::Reading,
            entries_decoded: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> DecoderState {
        self.state
    }

    /// Entries successfully decoded so far.
    #[must_use]
    pub fn entries_decoded(&self) -> usize {
        self.entries_decoded
    }

    #[must_use]
    pub fn loc_decoder(&self) -> Option<&LocDecoder> {
        self.loc_decoder.as_ref()
    }

    /// Decode the next entry.
    ///
    /// `Ok(None)` is clean end-of-stream (short read or zero-pointer
    /// sentinel). After an error or end-of-stream the decoder stays in its
    /// terminal state and keeps returning `Ok(None)` / the same behavior.
    ///
    /// # Errors
    /// [`DecodeError::OffsetResolution`] / [`DecodeError::PointerUnderflow`]
    /// when a non-zero message pointer cannot be resolved against the
    /// string table; fatal for the session.
    pub fn next_entry(&mut self) -> Result<Option<DecodedEntry>, DecodeError> {
        if self.state != DecoderState::Reading {
            return Ok(None);
        }

        let mut buf = [0u8; ENTRY_SIZE];
        if read_full(&mut self.reader, &mut buf)? < ENTRY_SIZE {
            self.state = DecoderState::EndOfStream;
            return Ok(None);
        }

        let entry = LogEntry::parse(&buf);
        if entry.message_pointer == 0 {
            // Unwritten slot: the log ends here.
            self.state = DecoderState::EndOfStream;
            return Ok(None);
        }

        let Some(offset) = self.resolver.translate(entry.message_pointer) else {
            self.state = DecoderState::ResolutionError;
            return Err(DecodeError::PointerUnderflow(entry.message_pointer));
        };
        let Some(fmt) = self.table.get(offset) else {
            self.state = DecoderState::ResolutionError;
            return Err(DecodeError::OffsetResolution {
                pointer: entry.message_pointer,
                offset,
            });
        };
        let message = render_message(fmt, entry.arg1, entry.arg2);

        let location = if entry.location_id == 0 {
            Location::None
        } else {
            match self.scheme {
                LocScheme::None => {
                    warn!(
                        "entry carries location id {} but the header declares no scheme",
                        entry.location_id
                    );
                    Location::SchemeMismatch(entry.location_id)
                }
                LocScheme::Default => match self.loc_decoder.as_mut() {
                    Some(decoder) => {
                        Location::Resolved(decoder.get_or_resolve(LocationId(entry.location_id))?)
                    }
                    // Decoder presence is validated before the loop; a
                    // session built without one still surfaces the id.
                    None => Location::Raw(entry.location_id),
                },
                LocScheme::ElfEncoded => Location::Raw(entry.location_id),
            }
        };

        self.entries_decoded += 1;
        Ok(Some(DecodedEntry {
            tid: Tid(entry.tid),
            location,
            message,
            arg1: entry.arg1,
            arg2: entry.arg2,
        }))
    }

    /// Drain the stream, handing each decoded entry to `emit`.
    ///
    /// # Errors
    /// First hard resolution error aborts the drain.
    pub fn decode_all(
        &mut self,
        mut emit: impl FnMut(&DecodedEntry),
    ) -> Result<usize, DecodeError> {
        while let Some(entry) = self.next_entry()? {
            emit(&entry);
        }
        Ok(self.entries_decoded)
    }
}
