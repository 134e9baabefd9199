//! Averaged analog readings of the TMP36 sense pin.

use core::{marker::PhantomData, num::NonZeroU16};

use embedded_hal::{
    adc::{Channel, OneShot},
    blocking::delay::DelayUs,
};
use fugit::MicrosDurationU32;

use crate::{config, error::SampleError};

/// A voltage in whole millivolts.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Millivolts(pub u32);

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SamplerConfig {
    /// Conversions averaged per reading
    pub sample_count: NonZeroU16,
    /// Wait after each conversion
    pub settle_time: MicrosDurationU32,
    /// ADC reference voltage in millivolts
    pub reference_mv: u32,
    /// ADC resolution in bits
    pub resolution_bits: u8,
    /// Give up on a conversion after this many completion polls.
    ///
    /// `None` waits forever. `Some(0)` still polls once.
    pub max_polls: Option<u32>,
}

impl SamplerConfig {
    pub const DEFAULT: Self = Self {
        sample_count: match NonZeroU16::new(config::SAMPLE_COUNT) {
            Some(count) => count,
            None => panic!("SAMPLE_COUNT must be non-zero"),
        },
        settle_time: config::SETTLE_TIME,
        reference_mv: config::REFERENCE_MV,
        resolution_bits: config::RESOLUTION_BITS,
        max_polls: None,
    };

    /// Converts an averaged ADC count to millivolts, rounding down.
    ///
    /// Saturates at `u32::MAX`. A resolution of 64 bits or more reads as 0 mV.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn to_millivolts(&self, counts: u32) -> Millivolts {
        let scaled = counts as u64 * self.reference_mv as u64;
        match scaled.checked_shr(self.resolution_bits as u32) {
            Some(mv) if mv <= u32::MAX as u64 => Millivolts(mv as u32),
            Some(_) => Millivolts(u32::MAX),
            None => Millivolts(0),
        }
    }
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Takes averaged readings from one ADC channel.
///
/// `A` is the ADC marker type of the [`OneShot`] implementation.
pub struct AnalogSampler<A, ADC, PIN> {
    adc: ADC,
    pin: PIN,
    config: SamplerConfig,
    _adc: PhantomData<A>,
}

impl<A, ADC, PIN> AnalogSampler<A, ADC, PIN>
where
    ADC: OneShot<A, u16, PIN>,
    PIN: Channel<A>,
{
    pub const fn new(adc: ADC, pin: PIN, config: SamplerConfig) -> Self {
        Self {
            adc,
            pin,
            config,
            _adc: PhantomData,
        }
    }

    pub fn free(self) -> (ADC, PIN) {
        (self.adc, self.pin)
    }

    /// Runs a single conversion and waits for it to complete.
    pub fn read_raw(&mut self) -> Result<u16, SampleError<ADC::Error>> {
        let Some(max_polls) = self.config.max_polls else {
            return Ok(nb::block!(self.adc.read(&mut self.pin))?);
        };

        for _ in 0..max_polls.max(1) {
            match self.adc.read(&mut self.pin) {
                Ok(raw) => return Ok(raw),
                Err(nb::Error::WouldBlock) => continue,
                Err(nb::Error::Other(e)) => return Err(SampleError::Adc(e)),
            }
        }

        Err(SampleError::Timeout)
    }

    /// Averages [`SamplerConfig::sample_count`] conversions into a voltage.
    ///
    /// The average is truncated to whole counts before it is scaled.
    pub fn sample_voltage(
        &mut self,
        delay: &mut impl DelayUs<u32>,
    ) -> Result<Millivolts, SampleError<ADC::Error>> {
        let count = self.config.sample_count.get();
        let mut capture = 0u32;

        for _ in 0..count {
            capture += u32::from(self.read_raw()?);
            delay.delay_us(self.config.settle_time.to_micros());
        }

        let average = capture / u32::from(count);
        let voltage = self.config.to_millivolts(average);
        trace!("ADC average: {}, voltage: {} mV", average, voltage.0);

        Ok(voltage)
    }
}
