//! One full sample and display pass.

use embedded_hal::{
    adc::{Channel, OneShot},
    blocking::delay::DelayUs,
    digital::v2::OutputPin,
};

use crate::{
    display::{DisplayController, Update},
    error::CycleError,
    sampler::{AnalogSampler, Millivolts},
    temperature::{Calibration, DeciCelsius, DigitTriple},
};

/// Everything measured and shown by one [`Thermometer::cycle`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    pub voltage: Millivolts,
    pub temperature: DeciCelsius,
    pub digits: DigitTriple,
    pub update: Update,
}

/// The complete signal path from sense pin to display.
pub struct Thermometer<A, ADC, PIN, P> {
    sampler: AnalogSampler<A, ADC, PIN>,
    calibration: Calibration,
    display: DisplayController<P>,
}

impl<A, ADC, PIN, P> Thermometer<A, ADC, PIN, P>
where
    ADC: OneShot<A, u16, PIN>,
    PIN: Channel<A>,
    P: OutputPin,
{
    pub const fn new(
        sampler: AnalogSampler<A, ADC, PIN>,
        calibration: Calibration,
        display: DisplayController<P>,
    ) -> Self {
        Self {
            sampler,
            calibration,
            display,
        }
    }

    /// Sample the sensor, then show the result.
    ///
    /// A sampling failure leaves the display untouched.
    #[cfg_attr(feature = "sizing", inline(never))]
    pub fn cycle(
        &mut self,
        delay: &mut impl DelayUs<u32>,
    ) -> Result<Reading, CycleError<ADC::Error, P::Error>> {
        trace!("cycle");

        let voltage = self.sampler.sample_voltage(delay)?;
        let temperature = self.calibration.temperature(voltage);
        let digits = temperature.digits();

        debug!(
            "Voltage: {} mV, temperature: {} dC",
            voltage.0,
            temperature.0
        );

        let update = self
            .display
            .show(digits, delay)
            .map_err(CycleError::Display)?;

        Ok(Reading {
            voltage,
            temperature,
            digits,
            update,
        })
    }
}
