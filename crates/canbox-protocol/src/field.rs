//! Multi-byte unsigned integer extraction from payload windows.

/// Byte order of a multi-byte field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Byte `i` contributes `byte << (8 * i)`.
    Little,
    /// Byte `i` contributes `byte << (8 * (len - 1 - i))`.
    Big,
}

/// Widest field the reader accepts, in bytes.
pub const MAX_FIELD_LEN: usize = 4;

/// Read an unsigned integer of `len` bytes starting at `offset`.
///
/// When `offset` is at or past the last index of `window` the read yields
/// `Some(0)` instead of failing, so truncated payloads decode to zeros.
/// Returns `None` if the field runs off the end of the window after that
/// guard, or if `len` exceeds [`MAX_FIELD_LEN`].
pub fn read_uint(window: &[u8], offset: usize, len: usize, order: ByteOrder) -> Option<u32> {
    if offset.saturating_add(1) >= window.len() {
        return Some(0);
    }
    if len > MAX_FIELD_LEN {
        return None;
    }

    let end = offset.checked_add(len)?;
    let bytes = window.get(offset..end)?;

    let value = bytes.iter().enumerate().fold(0u32, |acc, (i, &b)| {
        let shift = match order {
            ByteOrder::Little => 8 * i,
            ByteOrder::Big => 8 * (len - 1 - i),
        };
        acc | (u32::from(b) << shift)
    });
    Some(value)
}

/// Big-endian shorthand used by most decoders.
pub(crate) fn read_be(window: &[u8], offset: usize, len: usize) -> Option<u32> {
    read_uint(window, offset, len, ByteOrder::Big)
}

/// Bit `n` of `byte` as a boolean.
pub(crate) fn bit(byte: u8, n: u8) -> bool {
    (byte >> n) & 1 == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn big_endian_two_bytes() {
        assert_eq!(read_uint(&[0x01, 0x02, 0x03], 0, 2, ByteOrder::Big), Some(0x0102));
    }

    #[test]
    fn little_endian_two_bytes() {
        assert_eq!(
            read_uint(&[0x01, 0x02, 0x03], 0, 2, ByteOrder::Little),
            Some(0x0201)
        );
    }

    #[test]
    fn three_byte_big_endian() {
        assert_eq!(
            read_uint(&[0x00, 0x12, 0x34, 0x56], 1, 3, ByteOrder::Big),
            Some(0x12_3456)
        );
    }

    #[test]
    fn offset_at_last_index_reads_zero() {
        // The guard fires even though one byte would be available.
        assert_eq!(read_uint(&[0xAA, 0xBB], 1, 1, ByteOrder::Big), Some(0));
        assert_eq!(read_uint(&[0xAA, 0xBB], 5, 2, ByteOrder::Little), Some(0));
    }

    #[test]
    fn empty_window_reads_zero() {
        assert_eq!(read_uint(&[], 0, 2, ByteOrder::Big), Some(0));
    }

    #[test]
    fn field_running_off_the_end_is_none() {
        assert_eq!(read_uint(&[1, 2, 3], 1, 3, ByteOrder::Big), None);
    }

    #[test]
    fn oversized_field_is_none() {
        assert_eq!(read_uint(&[0u8; 8], 0, 5, ByteOrder::Big), None);
    }

    #[test]
    fn bit_helper() {
        assert!(bit(0b1000_0000, 7));
        assert!(!bit(0b1000_0000, 6));
        assert!(bit(0b0000_0001, 0));
    }
}
