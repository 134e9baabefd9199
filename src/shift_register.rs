//! Bit-banged driver for daisy-chained 74HC595 shift registers.

use embedded_hal::{blocking::delay::DelayUs, digital::v2::OutputPin};

use crate::{config::PULSE_WIDTH, segment::SegmentPattern};

/// Data, shift clock (SRCLK) and storage clock (RCLK) lines of the register chain.
///
/// All lines idle low and every pulse is held high for [`PULSE_WIDTH`].
pub struct ShiftRegisterBus<P> {
    data: P,
    clock: P,
    latch: P,
}

impl<P: OutputPin> ShiftRegisterBus<P> {
    pub const fn new(data: P, clock: P, latch: P) -> Self {
        Self { data, clock, latch }
    }

    pub fn free(self) -> (P, P, P) {
        (self.data, self.clock, self.latch)
    }

    /// Shift a single bit into the first register
    pub fn push_bit(&mut self, bit: bool, delay: &mut impl DelayUs<u32>) -> Result<(), P::Error> {
        if bit {
            self.data.set_high()?;
        } else {
            self.data.set_low()?;
        }
        pulse(&mut self.clock, delay)
    }

    /// Shift a whole pattern in, most significant bit first
    pub fn push_byte(
        &mut self,
        pattern: SegmentPattern,
        delay: &mut impl DelayUs<u32>,
    ) -> Result<(), P::Error> {
        let byte = pattern.bits();
        for i in (0..8).rev() {
            self.push_bit((byte >> i) & 1 == 1, delay)?;
        }
        Ok(())
    }

    /// Copy everything shifted so far to the register outputs
    pub fn latch(&mut self, delay: &mut impl DelayUs<u32>) -> Result<(), P::Error> {
        // Let the last shift clock settle before the storage clock rises
        delay.delay_us(PULSE_WIDTH.to_micros());
        pulse(&mut self.latch, delay)
    }
}

fn pulse<P: OutputPin>(pin: &mut P, delay: &mut impl DelayUs<u32>) -> Result<(), P::Error> {
    pin.set_high()?;
    delay.delay_us(PULSE_WIDTH.to_micros());
    pin.set_low()
}
