//! Domain model for logdump
//!
//! Core identifier newtypes and the structured error taxonomy shared by the
//! decode pipeline.

pub mod errors;
pub mod types;

// Re-export common types for convenience
pub use types::{LocationId, Tid};

pub use errors::DecodeError;
