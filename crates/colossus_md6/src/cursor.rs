//! Primitive little-endian reads at absolute offsets into a byte buffer.
//!
//! Every fixed-width read fails with [`Error::OutOfBounds`] when the requested
//! span exceeds the buffer; callers treat that as fatal for the part or record
//! being decoded, not for the whole run.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{Error, Result};

fn span(data: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    offset
        .checked_add(len)
        .and_then(|end| data.get(offset..end))
        .ok_or(Error::OutOfBounds { offset, len })
}

/// Read a little-endian `u16` at `offset`.
pub fn read_u16_le(data: &[u8], offset: usize) -> Result<u16> {
    Ok(LittleEndian::read_u16(span(data, offset, 2)?))
}

/// Read a little-endian `u32` at `offset`.
pub fn read_u32_le(data: &[u8], offset: usize) -> Result<u32> {
    Ok(LittleEndian::read_u32(span(data, offset, 4)?))
}

/// Read a little-endian `u64` at `offset`.
pub fn read_u64_le(data: &[u8], offset: usize) -> Result<u64> {
    Ok(LittleEndian::read_u64(span(data, offset, 8)?))
}

/// Read a little-endian `f32` at `offset`.
pub fn read_f32_le(data: &[u8], offset: usize) -> Result<f32> {
    Ok(LittleEndian::read_f32(span(data, offset, 4)?))
}

/// Read a null terminated string starting at `offset`.
///
/// Scans forward until a null byte or the end of the buffer, decoding
/// permissively, and returns the string together with the number of bytes
/// consumed (terminator included when present).
pub fn read_cstring(data: &[u8], offset: usize) -> Result<(String, usize)> {
    let tail = data.get(offset..).ok_or(Error::OutOfBounds { offset, len: 1 })?;

    match tail.iter().position(|&byte| byte == b'\0') {
        Some(end) => Ok((String::from_utf8_lossy(&tail[..end]).into_owned(), end + 1)),
        None => Ok((String::from_utf8_lossy(tail).into_owned(), tail.len())),
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::cursor::{read_cstring, read_f32_le, read_u16_le, read_u32_le, read_u64_le};
    use crate::error::Error;

    #[test]
    fn reads_are_little_endian() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];

        assert_eq!(read_u16_le(&data, 0).unwrap(), 0x0201);
        assert_eq!(read_u16_le(&data, 3).unwrap(), 0x0504);
        assert_eq!(read_u32_le(&data, 0).unwrap(), 0x04030201);
        assert_eq!(read_u64_le(&data, 0).unwrap(), 0x0807060504030201);
    }

    #[test]
    fn reads_floats() {
        let data = 1.5f32.to_le_bytes();
        assert_eq!(read_f32_le(&data, 0).unwrap(), 1.5);
    }

    #[test]
    fn reads_past_the_end_are_out_of_bounds() {
        let data = [0u8; 4];

        assert!(matches!(
            read_u32_le(&data, 1),
            Err(Error::OutOfBounds { offset: 1, len: 4 })
        ));
        assert!(matches!(
            read_u16_le(&data, 4),
            Err(Error::OutOfBounds { offset: 4, len: 2 })
        ));
        assert!(matches!(
            read_u64_le(&data, usize::MAX),
            Err(Error::OutOfBounds { .. })
        ));
    }

    #[test]
    fn cstring_reports_bytes_consumed() {
        let data = b"abc\0def";

        assert_eq!(read_cstring(data, 0).unwrap(), ("abc".to_owned(), 4));
        assert_eq!(read_cstring(data, 4).unwrap(), ("def".to_owned(), 3));
    }

    #[test]
    fn cstring_decodes_permissively() {
        let data = [0x61, 0xFF, 0x62, 0x00];
        let (text, consumed) = read_cstring(&data, 0).unwrap();

        assert_eq!(text, "a\u{FFFD}b");
        assert_eq!(consumed, 4);
    }

    #[test]
    fn cstring_past_the_end_is_out_of_bounds() {
        assert!(read_cstring(b"abc", 4).is_err());
        assert_eq!(read_cstring(b"abc", 3).unwrap(), (String::new(), 0));
    }
}
