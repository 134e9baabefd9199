//! Signal path of a desktop thermometer: a TMP36 on one ADC channel, shown on
//! a 3-digit 7-segment display behind a chain of 74HC595 shift registers.
//!
//! The components only depend on `embedded-hal` traits, so the whole path can
//! be exercised on the host. The STM32F042 firmware lives in `main.rs`.
#![cfg_attr(not(test), no_std)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

// This must go first so the macros are visible to the other modules
mod fmt;

pub mod config;
pub mod cycle;
pub mod display;
pub mod error;
pub mod sampler;
pub mod segment;
pub mod shift_register;
pub mod temperature;

#[cfg(test)]
mod testing;

pub use self::{
    cycle::{Reading, Thermometer},
    display::{DisplayController, ShiftFrame, Update},
    error::{CycleError, SampleError},
    sampler::{AnalogSampler, Millivolts, SamplerConfig},
    segment::{encode, Position, SegmentPattern},
    shift_register::ShiftRegisterBus,
    temperature::{Calibration, DeciCelsius, DigitTriple},
};
