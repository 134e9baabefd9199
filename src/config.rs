//! Board constants.

use fugit::{MicrosDurationU32, SecsDurationU32};

/// Number of ADC conversions averaged into one reading.
pub const SAMPLE_COUNT: u16 = 10;

/// Wait after each conversion before triggering the next one.
pub const SETTLE_TIME: MicrosDurationU32 = MicrosDurationU32::micros(500);

/// Wait after enabling the ADC before the first conversion.
pub const ADC_STARTUP_TIME: MicrosDurationU32 = MicrosDurationU32::micros(10);

/// ADC reference voltage in millivolts.
pub const REFERENCE_MV: u32 = 2048;

/// ADC resolution in bits.
pub const RESOLUTION_BITS: u8 = 10;

/// TMP36 output at 0 degrees C, in millivolts.
///
/// The sensor reads 750mV at 25 degrees C with a slope of 10mV per degree.
pub const ZERO_OFFSET_MV: u32 = 500;

/// 74HC595 minimum clock and latch pulse duration (tw), with margin.
pub const PULSE_WIDTH: MicrosDurationU32 = MicrosDurationU32::micros(40);

/// Time between display updates.
pub const REPORT_INTERVAL: SecsDurationU32 = SecsDurationU32::secs(30);
