/// Failure while taking an averaged ADC reading.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SampleError<E> {
    /// The ADC reported a hardware error
    Adc(E),

    /// A conversion did not complete within the configured number of polls.
    /// Only possible when [`SamplerConfig::max_polls`](crate::sampler::SamplerConfig::max_polls) is set.
    Timeout,
}

impl<E> SampleError<E> {
    pub fn as_str(&self) -> &'static str {
        match self {
            SampleError::Adc(_) => "ADC error",
            SampleError::Timeout => "Conversion timeout",
        }
    }
}

impl<E> From<E> for SampleError<E> {
    fn from(value: E) -> Self {
        Self::Adc(value)
    }
}

/// Failure during a full sample and display cycle.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleError<A, P> {
    /// Sampling failed, the display was left untouched
    Sample(SampleError<A>),

    /// Driving an output pin failed, the display may hold a partial frame in its shift stage
    Display(P),
}

impl<A, P> CycleError<A, P> {
    pub fn as_str(&self) -> &'static str {
        match self {
            CycleError::Sample(e) => e.as_str(),
            CycleError::Display(_) => "Display pin error",
        }
    }
}

impl<A, P> From<SampleError<A>> for CycleError<A, P> {
    fn from(value: SampleError<A>) -> Self {
        Self::Sample(value)
    }
}
