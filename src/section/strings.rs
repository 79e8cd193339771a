//! String-table construction from string-dump output.
//!
//! Data-line grammar (`readelf -p`-style, spacing varies by tool version):
//!
//! ```text
//! [  <hex-offset>  ]  <message text to end of line>
//! ```
//!
//! whitespace around the brackets is optional, the whitespace after `]` is
//! required, and the offset may carry a `0x` prefix. Everything else
//! (banners, blank lines, trailers) is skipped without complaint.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static RE_STRING_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*\[\s*(?:0x)?([0-9A-Fa-f]+)\s*\]\s+(.*)$").expect("valid string-line regex")
});

/// Offset-keyed table of the string literals the compiler emitted into the
/// target binary's read-only section.
///
/// The key space is sparse and the table is immutable for a decode session.
/// Every non-zero message pointer in a well-formed log must translate to an
/// offset present here; a miss means a stale log or broken resolver math
/// and is fatal upstream.
#[derive(Debug, Default)]
pub struct StringTable {
    entries: HashMap<u64, String>,
}

impl StringTable {
    /// Build a table from string-dump text.
    ///
    /// Also returns the number of data lines recognized, so callers and
    /// tests can assert how many entries were consumed versus skipped.
    /// Duplicate offsets overwrite silently; last one wins.
    #[must_use]
    pub fn parse(dump: &str) -> (Self, usize) {
        let mut entries = HashMap::new();
        let mut nlines = 0;
        for line in dump.lines() {
            let Some(caps) = RE_STRING_LINE.captures(line) else {
                continue;
            };
            let Ok(offset) = u64::from_str_radix(&caps[1], 16) else {
                continue;
            };
            entries.insert(offset, caps[2].to_string());
            nlines += 1;
        }
        (Self { entries }, nlines)
    }

    #[must_use]
    pub fn get(&self, offset: u64) -> Option<&str> {
        self.entries.get(&offset).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Offsets present in the table, in no particular order.
    pub fn offsets(&self) -> impl Iterator<Item = u64> + '_ {
        self.entries.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_line() {
        let (table, nlines) = StringTable::parse("[   17d]  test string");
        assert_eq!(nlines, 1);
        assert_eq!(table.get(0x17d), Some("test string"));
    }

    #[test]
    fn test_junk_lines_skipped() {
        let dump = "String dump of section '.rodata':\n\
                    \x20 [   17d]  test string\n\
                    \x20 Unrelated junk-lines should be skipped\n\
                    \x20 Blank line below should be skipped\n\
                    \n\
                    \x20 [    73]  300-Mil log msgs\n\
                    \x20 Trailer line should be skipped\n";
        let (table, nlines) = StringTable::parse(dump);
        assert_eq!(nlines, 2);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(0x17d), Some("test string"));
        assert_eq!(table.get(0x73), Some("300-Mil log msgs"));
        assert_eq!(table.get(0x99), None);
    }

    #[test]
    fn test_varying_blanks_around_brackets() {
        let dump = "\n\
                    [100] test string\n\
                    \x20[101] test string\n\
                    [ 102] test string\n\
                    [103 ] test string\n\
                    \x20[104] test string\n\
                    \x20[ 105] test string\n\
                    \x20[ 106 ] test string\n\
                    [ 107 ]  test string\n\
                    \x20 [   108  ]   test string\n";
        let (table, nlines) = StringTable::parse(dump);
        assert_eq!(nlines, 9);
        for offset in 0x100..=0x108 {
            assert_eq!(table.get(offset), Some("test string"), "offset 0x{offset:x}");
        }
    }

    #[test]
    fn test_0x_prefixed_offset() {
        let (table, nlines) = StringTable::parse("[ 0x10 ]  count=%d");
        assert_eq!(nlines, 1);
        assert_eq!(table.get(0x10), Some("count=%d"));
    }

    #[test]
    fn test_duplicate_offset_last_wins() {
        let dump = "[ 10 ]  first\n[ 10 ]  second\n";
        let (table, nlines) = StringTable::parse(dump);
        assert_eq!(nlines, 2);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(0x10), Some("second"));
    }

    #[test]
    fn test_full_dump_roundtrip() {
        let dump = "String dump of section '.rodata':\n\
                    \x20 [     8]  /tmp/app-test.dat\n\
                    \x20 [    b9]  300-Mil log msgs\n\
                    \x20 [    d8]  %d Mil log msgs: %luns/msg (avg)\n\
                    \x20 [   11a]  Log-msg-Args(1,2)\n\
                    \x20 [   138]  Potential memory overwrite (addr, size)\n\
                    \x20 [   160]  Invalid buffer handle (addr)\n\
                    \x20 [   17d]  test string\n";
        let (table, nlines) = StringTable::parse(dump);
        assert_eq!(nlines, 7);
        assert_eq!(table.len(), 7);
        assert_eq!(table.get(0x8), Some("/tmp/app-test.dat"));
        assert_eq!(table.get(0xd8), Some("%d Mil log msgs: %luns/msg (avg)"));
        assert_eq!(table.get(0x160), Some("Invalid buffer handle (addr)"));

        // Every offset the table reports maps back to its own text.
        for offset in table.offsets().collect::<Vec<_>>() {
            assert!(table.get(offset).is_some());
        }
    }
}
