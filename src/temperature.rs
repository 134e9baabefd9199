//! Sensor voltage to display digits.

use crate::{config, sampler::Millivolts};

/// Temperature in tenths of a degree Celsius.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeciCelsius(pub i32);

impl DeciCelsius {
    /// Splits into tens, ones and tenths of a degree.
    ///
    /// Only meaningful for 0.0 to 99.9 degrees. Outside that range each digit
    /// wraps into 0..=9.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub const fn digits(self) -> DigitTriple {
        let t = self.0;
        DigitTriple {
            tens: (t / 100).rem_euclid(10) as u8,
            ones: (t / 10).rem_euclid(10) as u8,
            tenths: t.rem_euclid(10) as u8,
        }
    }
}

/// The three displayed digits, each in 0..=9.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DigitTriple {
    pub tens: u8,
    pub ones: u8,
    pub tenths: u8,
}

impl DigitTriple {
    pub const fn new(tens: u8, ones: u8, tenths: u8) -> Self {
        Self { tens, ones, tenths }
    }

    /// The displayed value in deci-degrees.
    pub const fn deci_degrees(self) -> u16 {
        self.tens as u16 * 100 + self.ones as u16 * 10 + self.tenths as u16
    }
}

/// Sensor transfer function. One millivolt is one deci-degree.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Calibration {
    /// Sensor output at 0 degrees C
    pub zero_offset: Millivolts,
}

impl Calibration {
    pub const DEFAULT: Self = Self {
        zero_offset: Millivolts(config::ZERO_OFFSET_MV),
    };

    #[allow(clippy::cast_possible_wrap)]
    pub const fn temperature(&self, voltage: Millivolts) -> DeciCelsius {
        DeciCelsius(voltage.0.wrapping_sub(self.zero_offset.0) as i32)
    }

    pub const fn to_digits(&self, voltage: Millivolts) -> DigitTriple {
        self.temperature(voltage).digits()
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self::DEFAULT
    }
}
