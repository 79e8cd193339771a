//! Parsers for the inspection-tool text output describing the target
//! binary's read-only string section.
//!
//! Tool output formats drift between tool versions; both parsers are kept
//! as standalone functions with documented input grammars so a format
//! change is a parser fix, not inline string surgery somewhere in the
//! decode loop.

pub mod base;
pub mod strings;

pub use base::{parse_section_base, parse_section_offset};
pub use strings::StringTable;
