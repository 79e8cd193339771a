//! # logdump - Binary Trace-Log Decoder
//!
//! Decodes the compact fixed-size binary records written by an in-process
//! lightweight logger. The writer stores only a pointer to the format string
//! (a string literal inside the instrumented binary) plus two raw integer
//! arguments, so reconstructing readable messages happens entirely here,
//! offline, without the logging process ever formatting text.
//!
//! ## Pipeline
//!
//! ```text
//! log file ──▶ header decode ──▶ entry stream ──▶ pointer translation
//!                  │                                   │
//!                  │                                   ▼
//!                  │                             string table
//!                  │                        (readelf string dump)
//!                  ▼                                   │
//!           platform / scheme                          ▼
//!                  │                            format renderer
//!                  ▼                                   │
//!         location decoder ◀── location ids            ▼
//!         (external helper)                    decoded messages
//! ```
//!
//! ## Module Structure
//!
//! - [`header`]: fixed 32-byte log-file header (runtime base address,
//!   platform tag, location-encoding scheme)
//! - [`decoder`]: the entry stream state machine; reads 32-byte records
//!   until the end-of-stream sentinel and drives everything below
//! - [`section`]: parsers for the inspection-tool text output that yields
//!   the string table and the section base address
//! - [`resolver`]: runtime pointer → static section offset translation,
//!   one variant per supported address layout
//! - [`locdec`]: external location-decoder invocation with a single-slot
//!   cache exploiting run-length locality of location ids
//! - [`render`]: C-style format-specifier normalization and argument
//!   substitution
//! - [`toolchain`]: locating and running the external inspection tools
//! - [`cli`]: command-line argument parsing
//! - [`domain`]: core error taxonomy and identifier newtypes

pub mod cli;
pub mod decoder;
pub mod domain;
pub mod header;
pub mod locdec;
pub mod render;
pub mod resolver;
pub mod section;
pub mod toolchain;

mod wire;
