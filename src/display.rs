//! 3-digit display behind the shift register chain.

use embedded_hal::{blocking::delay::DelayUs, digital::v2::OutputPin};

use crate::{
    segment::{encode, Position, SegmentPattern},
    shift_register::ShiftRegisterBus,
    temperature::DigitTriple,
};

/// Outcome of a display update.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Update {
    /// The new frame is visible
    Latched,
    /// The frame was all blank and the display kept its previous value
    Skipped,
}

/// The three patterns of one display update.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ShiftFrame {
    pub tenths: SegmentPattern,
    pub ones: SegmentPattern,
    pub tens: SegmentPattern,
}

impl ShiftFrame {
    /// Encodes `digits` with the decimal point after the ones digit.
    pub const fn encode(digits: DigitTriple) -> Self {
        Self {
            tenths: encode(Position::Tenths, digits.tenths, false),
            ones: encode(Position::Ones, digits.ones, true),
            tens: encode(Position::Tens, digits.tens, false),
        }
    }

    /// An all-blank frame marks an invalid reading.
    pub const fn is_blank(&self) -> bool {
        self.tenths.is_blank() && self.ones.is_blank() && self.tens.is_blank()
    }

    /// Patterns in bus order. The last byte pushed lands in the leftmost digit.
    pub const fn push_order(&self) -> [SegmentPattern; 3] {
        [self.tenths, self.ones, self.tens]
    }
}

pub struct DisplayController<P> {
    bus: ShiftRegisterBus<P>,
    /// SRCLR, active low
    clear: P,
}

impl<P: OutputPin> DisplayController<P> {
    pub const fn new(bus: ShiftRegisterBus<P>, clear: P) -> Self {
        Self { bus, clear }
    }

    /// Shows `digits` as `tens` `ones` . `tenths`
    pub fn show(
        &mut self,
        digits: DigitTriple,
        delay: &mut impl DelayUs<u32>,
    ) -> Result<Update, P::Error> {
        self.show_frame(ShiftFrame::encode(digits), delay)
    }

    /// Shifts a full frame and latches it. Blank frames are dropped.
    pub fn show_frame(
        &mut self,
        frame: ShiftFrame,
        delay: &mut impl DelayUs<u32>,
    ) -> Result<Update, P::Error> {
        // Keep the registers out of reset so shifted data persists
        self.clear.set_high()?;

        if frame.is_blank() {
            warn!("Blank frame, keeping previous display");
            return Ok(Update::Skipped);
        }

        for pattern in frame.push_order() {
            self.bus.push_byte(pattern, delay)?;
        }
        self.bus.latch(delay)?;

        trace!(
            "Latched frame {} {} {}",
            frame.tenths.bits(),
            frame.ones.bits(),
            frame.tens.bits()
        );

        Ok(Update::Latched)
    }
}
