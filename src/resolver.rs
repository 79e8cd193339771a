//! Translate absolute runtime pointers back into string-section offsets.
//!
//! The formula is `offset = pointer - runtime_base - section_base`, but the
//! section base comes from a different source per platform: the hex-dump
//! address on Linux, the sizing-tool file offset on MacOS. The variant is
//! picked once per session from the header's platform tag instead of
//! branching inside the decode loop.

/// Pointer-to-offset translation, one variant per supported address layout.
#[derive(Debug, Clone, Copy)]
pub enum AddressResolver {
    /// ELF layout: section base taken from the hex-dump's first data line.
    Linux { runtime_base: u64, section_base: u64 },
    /// Mach-O layout: section file offset taken from the sizing tool.
    MacOs { runtime_base: u64, section_offset: u64 },
}

impl AddressResolver {
    /// Translate an absolute runtime pointer into a string-table offset.
    ///
    /// Returns `None` when the pointer precedes the computed base; that is
    /// a resolution failure, not a smaller offset.
    #[must_use]
    pub fn translate(&self, pointer: u64) -> Option<u64> {
        match *self {
            AddressResolver::Linux { runtime_base, section_base } => {
                pointer.checked_sub(runtime_base)?.checked_sub(section_base)
            }
            AddressResolver::MacOs { runtime_base, section_offset } => {
                pointer.checked_sub(runtime_base)?.checked_sub(section_offset)
            }
        }
    }
}
