//! 7-segment encoding for the three display digits.
//!
//! Segments are named as follows:
//!
//! ```text
//!  AAAA
//! F    B
//! F    B
//!  GGGG
//! E    C
//! E    C
//!  DDDD
//! ```
//!
//! Each digit is wired to its shift register differently, so each position has
//! its own table. Bit assignments per position:
//!
//! | Bit    | Tens | Ones | Tenths |
//! |--------|------|------|--------|
//! | 7      | C    | B    | A      |
//! | 6      | D    | DP   | G      |
//! | 5      | E    | A    | F      |
//! | 4      | G    | C    | B      |
//! | 3      | F    | D    | C      |
//! | 2      | A    | F    | D      |
//! | 1      | B    | E    | E      |
//! | 0      | -    | G    | -      |

/// Decimal point bit. Only wired on [`Position::Ones`].
pub const DECIMAL_POINT: u8 = 0b0100_0000;

/// Segment patterns indexed by `[position][value]`.
const DIGITS: [[u8; 10]; 3] = [
    // Tenths
    [
        0b1011_1110,
        0b0001_1000,
        0b1101_0110,
        0b1101_1100,
        0b0111_1000,
        0b1110_1100,
        0b1110_1110,
        0b1001_1000,
        0b1111_1110,
        0b1111_1100,
    ],
    // Ones
    [
        0b1011_1110,
        0b1001_0000,
        0b1010_1011,
        0b1011_1001,
        0b1001_0101,
        0b0011_1101,
        0b0011_1111,
        0b1011_0000,
        0b1011_1111,
        0b1011_1101,
    ],
    // Tens
    [
        0b1110_1110,
        0b1000_0010,
        0b0111_0110,
        0b1101_0110,
        0b1001_1010,
        0b1101_1100,
        0b1111_1100,
        0b1000_0110,
        0b1111_1110,
        0b1101_1110,
    ],
];

/// Physical digit slot on the display.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Position {
    Tenths = 0,
    Ones = 1,
    Tens = 2,
}

/// Lit segments of one digit, in that digit's wiring order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SegmentPattern(pub u8);

static_assertions::assert_eq_size!(SegmentPattern, u8);

impl SegmentPattern {
    /// All segments off.
    pub const BLANK: Self = Self(0);

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_blank(self) -> bool {
        self.0 == 0
    }
}

/// Encodes `value` for the digit at `position`, optionally lighting the decimal point.
///
/// # Panics
///
/// Panics if `value` is greater than 9.
#[inline]
pub const fn encode(position: Position, value: u8, decimal_point: bool) -> SegmentPattern {
    let mut bits = DIGITS[position as usize][value as usize];
    if decimal_point {
        bits |= DECIMAL_POINT;
    }
    SegmentPattern(bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    const POSITIONS: [Position; 3] = [Position::Tenths, Position::Ones, Position::Tens];

    #[test]
    fn matches_reference_table() {
        let expected: [[u8; 10]; 3] = [
            [0xBE, 0x18, 0xD6, 0xDC, 0x78, 0xEC, 0xEE, 0x98, 0xFE, 0xFC],
            [0xBE, 0x90, 0xAB, 0xB9, 0x95, 0x3D, 0x3F, 0xB0, 0xBF, 0xBD],
            [0xEE, 0x82, 0x76, 0xD6, 0x9A, 0xDC, 0xFC, 0x86, 0xFE, 0xDE],
        ];

        for (position, row) in POSITIONS.iter().zip(expected) {
            for (value, bits) in (0u8..).zip(row) {
                assert_eq!(encode(*position, value, false), SegmentPattern(bits));
            }
        }
    }

    #[test]
    fn decimal_point_sets_bit_six() {
        for value in 0..10 {
            let plain = encode(Position::Ones, value, false);
            let dotted = encode(Position::Ones, value, true);
            assert_eq!(dotted.bits(), plain.bits() | 0b0100_0000);
        }
    }

    #[test]
    fn no_digit_is_blank() {
        for position in POSITIONS {
            for value in 0..10 {
                assert!(!encode(position, value, false).is_blank());
            }
        }
    }

    #[test]
    fn ones_table_leaves_decimal_point_free() {
        for value in 0..10 {
            assert_eq!(encode(Position::Ones, value, false).bits() & DECIMAL_POINT, 0);
        }
    }

    #[test]
    #[should_panic]
    fn value_out_of_range_panics() {
        let _ = encode(Position::Tens, std::hint::black_box(10), false);
    }
}
