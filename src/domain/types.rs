//! Identifier newtypes for the decode pipeline.
//!
//! Both values originate in the *instrumented* program: `Tid` is the writer
//! thread that produced a record, `LocationId` is an opaque call-site token
//! resolved out-of-band. Neither means anything to the decoder's own
//! execution, which is strictly single-threaded.

use std::fmt;

/// Thread id of the writer thread that produced a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tid(pub i32);

impl fmt::Display for Tid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque numeric call-site identifier; 0 means "no location recorded".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocationId(pub i32);

impl LocationId {
    #[must_use]
    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
