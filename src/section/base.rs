//! Section base-address extraction from inspection-tool output.
//!
//! Two sources, one per platform:
//! - the hex-dump of the string section (`readelf -x`-style), whose first
//!   data line starts with the section's static load address;
//! - the sizing-tool listing (`size -m -l`-style) naming each section with
//!   its file offset in parentheses, used on MacOS where the hex-dump
//!   address does not line up with the pointer math.

use once_cell::sync::Lazy;
use regex::Regex;

/// First whitespace-delimited token is a hex address, `0x` optional.
static RE_HEX_LEAD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:0x)?([0-9A-Fa-f]+)(?:\s.*)?$").expect("valid hex-lead regex")
});

/// `offset <n>` inside the parenthesized tail of a sizing-tool line.
static RE_SIZE_OFFSET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(.*\boffset\s+(\d+)\b").expect("valid size-offset regex"));

/// Extract the section's static load offset from hex-dump output.
///
/// Grammar per data line: optional leading whitespace, optional `0x`, hex
/// digits, then whitespace and the dump payload. Banner and report lines
/// preceding the data do not match and are skipped; the first matching
/// line wins. Returns `None` when no line matches (fatal for the caller).
#[must_use]
pub fn parse_section_base(hex_dump: &str) -> Option<u64> {
    hex_dump.lines().find_map(|line| {
        let caps = RE_HEX_LEAD.captures(line)?;
        u64::from_str_radix(&caps[1], 16).ok()
    })
}

/// Extract a section's file offset from sizing-tool output.
///
/// Scans for a line naming `section` and reporting `offset <decimal>`
/// inside parentheses, e.g.:
///
/// ```text
/// Section __cstring: 110 (addr 0x100003e89 offset 16009)
/// ```
#[must_use]
pub fn parse_section_offset(size_listing: &str, section: &str) -> Option<u64> {
    size_listing.lines().filter(|line| line.contains(section)).find_map(|line| {
        let caps = RE_SIZE_OFFSET.captures(line)?;
        caps[1].parse().ok()
    })
}
