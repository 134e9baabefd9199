//! Host-side hardware doubles that record into one shared event log.

use core::convert::Infallible;
use std::{cell::RefCell, collections::VecDeque, rc::Rc, vec::Vec};

use embedded_hal::{
    adc::{Channel, OneShot},
    blocking::delay::DelayUs,
    digital::v2::OutputPin,
};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Line {
    Data,
    Clock,
    Latch,
    Clear,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Event {
    Set(Line, bool),
    Delay(u32),
    Sample(u16),
}

#[derive(Clone, Default)]
pub struct Trace(Rc<RefCell<Vec<Event>>>);

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pin(&self, line: Line) -> TracePin {
        TracePin {
            line,
            trace: self.clone(),
        }
    }

    pub fn delay(&self) -> TraceDelay {
        TraceDelay(self.clone())
    }

    fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    /// Decodes the log the way a chain of 74HC595s would see it.
    pub fn capture(&self) -> Capture {
        let mut capture = Capture::default();
        let mut data = false;
        let mut byte = 0u8;
        let mut bits = 0usize;
        let mut clock_high: Option<u32> = None;
        let mut latch_high: Option<u32> = None;

        for event in self.events() {
            match event {
                Event::Set(Line::Data, level) => data = level,
                Event::Set(Line::Clock, true) => {
                    byte = (byte << 1) | u8::from(data);
                    bits += 1;
                    if bits % 8 == 0 {
                        capture.bytes.push(byte);
                        byte = 0;
                    }
                    clock_high = Some(0);
                }
                Event::Set(Line::Clock, false) => {
                    if let Some(held) = clock_high.take() {
                        capture.clock_pulses.push(held);
                    }
                }
                Event::Set(Line::Latch, true) => {
                    capture.bits_per_latch.push(bits);
                    bits = 0;
                    latch_high = Some(0);
                }
                Event::Set(Line::Latch, false) => {
                    if let Some(held) = latch_high.take() {
                        capture.latch_pulses.push(held);
                    }
                }
                Event::Set(Line::Clear, level) => capture.clear = Some(level),
                Event::Delay(us) => {
                    for held in [&mut clock_high, &mut latch_high].into_iter().flatten() {
                        *held += us;
                    }
                }
                Event::Sample(_) => {}
            }
        }

        capture
    }
}

#[derive(Debug, Default)]
pub struct Capture {
    /// Every complete byte shifted in, in push order
    pub bytes: Vec<u8>,
    /// Number of bits shifted in before each latch pulse
    pub bits_per_latch: Vec<usize>,
    /// Microseconds each clock pulse was held high
    pub clock_pulses: Vec<u32>,
    /// Microseconds each latch pulse was held high
    pub latch_pulses: Vec<u32>,
    /// Last level driven on the clear line
    pub clear: Option<bool>,
}

pub struct TracePin {
    line: Line,
    trace: Trace,
}

impl OutputPin for TracePin {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.trace.push(Event::Set(self.line, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.trace.push(Event::Set(self.line, true));
        Ok(())
    }
}

pub struct TraceDelay(Trace);

impl DelayUs<u32> for TraceDelay {
    fn delay_us(&mut self, us: u32) {
        self.0.push(Event::Delay(us));
    }
}

pub struct FakeAdc;

pub struct FakeChannel;

impl Channel<FakeAdc> for FakeChannel {
    type ID = u8;

    fn channel() -> u8 {
        0
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct FakeAdcError;

/// ADC that reports busy for `busy_polls` polls before each result.
pub struct ScriptedAdc {
    samples: VecDeque<u16>,
    busy_polls: u32,
    waited: u32,
    fail: bool,
    pub polls: u32,
    trace: Option<Trace>,
}

impl ScriptedAdc {
    pub fn new(samples: impl IntoIterator<Item = u16>) -> Self {
        Self {
            samples: samples.into_iter().collect(),
            busy_polls: 0,
            waited: 0,
            fail: false,
            polls: 0,
            trace: None,
        }
    }

    /// An ADC whose conversion never completes.
    pub fn stalled() -> Self {
        Self::new([]).busy_for(u32::MAX)
    }

    /// An ADC that reports a hardware error on the first conversion.
    pub fn failing() -> Self {
        let mut adc = Self::new([]);
        adc.fail = true;
        adc
    }

    pub fn busy_for(mut self, polls: u32) -> Self {
        self.busy_polls = polls;
        self
    }

    pub fn traced(mut self, trace: &Trace) -> Self {
        self.trace = Some(trace.clone());
        self
    }
}

impl OneShot<FakeAdc, u16, FakeChannel> for ScriptedAdc {
    type Error = FakeAdcError;

    fn read(&mut self, _pin: &mut FakeChannel) -> nb::Result<u16, Self::Error> {
        self.polls += 1;
        if self.fail {
            return Err(nb::Error::Other(FakeAdcError));
        }
        if self.waited < self.busy_polls {
            self.waited += 1;
            return Err(nb::Error::WouldBlock);
        }
        self.waited = 0;

        let sample = self.samples.pop_front().unwrap_or(0);
        if let Some(trace) = &self.trace {
            trace.push(Event::Sample(sample));
        }
        Ok(sample)
    }
}
