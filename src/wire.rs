//! Little-endian field readers for the fixed-size log records.

use std::io::{self, Read};

pub(crate) fn read_u32(data: &[u8], off: usize) -> u32 {
    u32::from_le_bytes([data[off], data[off + 1], data[off + 2], data[off + 3]])
}

pub(crate) fn read_u64(data: &[u8], off: usize) -> u64 {
    u64::from_le_bytes([
        data[off],
        data[off + 1],
        data[off + 2],
        data[off + 3],
        data[off + 4],
        data[off + 5],
        data[off + 6],
        data[off + 7],
    ])
}

/// Read as many bytes as the reader yields, up to `buf.len()`.
///
/// Unlike `read_exact`, a short count is returned to the caller rather than
/// raised as an error: a truncated record is end-of-stream, not corruption.
pub(crate) fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_field_readers() {
        let data = [0x10, 0x20, 0x30, 0x40, 0x50, 0x60, 0x70, 0x80];
        assert_eq!(read_u32(&data, 0), 0x4030_2010);
        assert_eq!(read_u64(&data, 0), 0x8070_6050_4030_2010);
    }

    #[test]
    fn test_read_full_short() {
        let mut cursor = Cursor::new(vec![1u8, 2, 3]);
        let mut buf = [0u8; 8];
        assert_eq!(read_full(&mut cursor, &mut buf).unwrap(), 3);
        assert_eq!(&buf[..3], &[1, 2, 3]);
    }

    #[test]
    fn test_read_full_exact() {
        let mut cursor = Cursor::new(vec![9u8; 8]);
        let mut buf = [0u8; 8];
        assert_eq!(read_full(&mut cursor, &mut buf).unwrap(), 8);
    }
}
