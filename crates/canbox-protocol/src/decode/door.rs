//! Door, trunk, hood and sunroof state (id 36).

use crate::error::DecodeError;
use crate::field::bit;

/// `true` means open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarDoorInfo {
    /// Byte 0 bit 7.
    pub front_right: bool,
    /// Byte 0 bit 6.
    pub front_left: bool,
    /// Byte 0 bit 5.
    pub back_right: bool,
    /// Byte 0 bit 4.
    pub back_left: bool,
    /// Byte 0 bit 3.
    pub trunk: bool,
    /// Byte 1 bit 7.
    pub front_cover: bool,
    /// Byte 1 bits 5–6.
    pub sky_window: u8,
}

pub fn decode(data: &[u8]) -> Result<CarDoorInfo, DecodeError> {
    let &[b0, b1, ..] = data else {
        return Err(DecodeError::short("CarDoorInfo", data.len(), 2));
    };
    Ok(CarDoorInfo {
        front_right: bit(b0, 7),
        front_left: bit(b0, 6),
        back_right: bit(b0, 5),
        back_left: bit(b0, 4),
        trunk: bit(b0, 3),
        front_cover: bit(b1, 7),
        sky_window: (b1 >> 5) & 0x03,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doors_and_trunk() -> Result<(), DecodeError> {
        let info = decode(&[0b1010_1000, 0])?;
        assert!(info.front_right);
        assert!(!info.front_left);
        assert!(info.back_right);
        assert!(!info.back_left);
        assert!(info.trunk);
        Ok(())
    }

    #[test]
    fn sky_window_two_bit_field() -> Result<(), DecodeError> {
        assert_eq!(decode(&[0, 0b0110_0000])?.sky_window, 3);
        assert_eq!(decode(&[0, 0b0100_0000])?.sky_window, 2);
        assert_eq!(decode(&[0, 0b1010_0000])?.sky_window, 1);
        assert!(decode(&[0, 0b1000_0000])?.front_cover);
        Ok(())
    }

    #[test]
    fn low_bits_ignored() -> Result<(), DecodeError> {
        assert_eq!(decode(&[0b0000_0111, 0b0001_1111])?, decode(&[0, 0])?);
        Ok(())
    }

    #[test]
    fn too_short() {
        assert_eq!(decode(&[0]), Err(DecodeError::short("CarDoorInfo", 1, 2)));
    }
}
