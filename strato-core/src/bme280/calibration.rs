//! Factory calibration coefficients
//!
//! The device stores its trimming coefficients in a 24-byte block as
//! little-endian 16-bit words: three temperature words followed by nine
//! pressure words. Humidity coefficients are not read.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Size of the temperature/pressure calibration block
pub const CALIBRATION_LEN: usize = 24;

/// Temperature and pressure compensation coefficients
///
/// Immutable once loaded; a driver either holds a complete set decoded
/// from one successful block read or none at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalibrationParameters {
    pub t1: u16,
    pub t2: i16,
    pub t3: i16,
    pub p1: u16,
    pub p2: i16,
    pub p3: i16,
    pub p4: i16,
    pub p5: i16,
    pub p6: i16,
    pub p7: i16,
    pub p8: i16,
    pub p9: i16,
}

impl CalibrationParameters {
    /// Decode the calibration block in device order
    pub fn from_bytes(bytes: &[u8; CALIBRATION_LEN]) -> Self {
        let word = |i: usize| [bytes[2 * i], bytes[2 * i + 1]];
        Self {
            t1: u16::from_le_bytes(word(0)),
            t2: i16::from_le_bytes(word(1)),
            t3: i16::from_le_bytes(word(2)),
            p1: u16::from_le_bytes(word(3)),
            p2: i16::from_le_bytes(word(4)),
            p3: i16::from_le_bytes(word(5)),
            p4: i16::from_le_bytes(word(6)),
            p5: i16::from_le_bytes(word(7)),
            p6: i16::from_le_bytes(word(8)),
            p7: i16::from_le_bytes(word(9)),
            p8: i16::from_le_bytes(word(10)),
            p9: i16::from_le_bytes(word(11)),
        }
    }

    /// Encode back into the device's block layout
    pub fn to_bytes(&self) -> [u8; CALIBRATION_LEN] {
        let words: [[u8; 2]; 12] = [
            self.t1.to_le_bytes(),
            self.t2.to_le_bytes(),
            self.t3.to_le_bytes(),
            self.p1.to_le_bytes(),
            self.p2.to_le_bytes(),
            self.p3.to_le_bytes(),
            self.p4.to_le_bytes(),
            self.p5.to_le_bytes(),
            self.p6.to_le_bytes(),
            self.p7.to_le_bytes(),
            self.p8.to_le_bytes(),
            self.p9.to_le_bytes(),
        ];
        let mut bytes = [0u8; CALIBRATION_LEN];
        for (chunk, word) in bytes.chunks_exact_mut(2).zip(words.iter()) {
            chunk.copy_from_slice(word);
        }
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Coefficients of the datasheet worked example
    const DATASHEET: CalibrationParameters = CalibrationParameters {
        t1: 27504,
        t2: 26435,
        t3: -1000,
        p1: 36477,
        p2: -10685,
        p3: 3024,
        p4: 2855,
        p5: 140,
        p6: -7,
        p7: 15500,
        p8: -14600,
        p9: 6000,
    };

    #[test]
    fn test_decode_field_order_and_sign() {
        let mut bytes = [0u8; CALIBRATION_LEN];
        // T1 = 0x6B70 (27504), low byte first
        bytes[0] = 0x70;
        bytes[1] = 0x6B;
        // T3 = -1000 = 0xFC18
        bytes[4] = 0x18;
        bytes[5] = 0xFC;
        // P1 = 0x8E7D (36477), must stay unsigned
        bytes[6] = 0x7D;
        bytes[7] = 0x8E;
        // P9 = -1
        bytes[22] = 0xFF;
        bytes[23] = 0xFF;

        let calib = CalibrationParameters::from_bytes(&bytes);
        assert_eq!(calib.t1, 27504);
        assert_eq!(calib.t2, 0);
        assert_eq!(calib.t3, -1000);
        assert_eq!(calib.p1, 36477);
        assert_eq!(calib.p9, -1);
    }

    #[test]
    fn test_datasheet_block_round_trip() {
        let bytes = DATASHEET.to_bytes();
        assert_eq!(&bytes[0..2], &[0x70, 0x6B]);
        assert_eq!(CalibrationParameters::from_bytes(&bytes), DATASHEET);
    }

    proptest! {
        #[test]
        fn prop_every_block_decodes_to_its_words(bytes in proptest::array::uniform24(any::<u8>())) {
            let calib = CalibrationParameters::from_bytes(&bytes);
            prop_assert_eq!(calib.t1, u16::from_le_bytes([bytes[0], bytes[1]]));
            prop_assert_eq!(calib.p1, u16::from_le_bytes([bytes[6], bytes[7]]));
            prop_assert_eq!(calib.p5, i16::from_le_bytes([bytes[14], bytes[15]]));
            prop_assert_eq!(calib.to_bytes(), bytes);
        }
    }
}
