use defmt::trace;
use embassy_stm32::adc::{Adc, AdcChannel, AnyAdcChannel};
use embassy_stm32::peripherals::{ADC1, PA0};
use embassy_time::{Duration, Instant, Ticker};
use seeker_core::errors::ConfigError;
use seeker_core::freq_meter::{FreqMeter, FreqMeterConfig};
use seeker_core::Frequency;

use crate::SeekerHistory;

/// Conversion cadence of the frequency-indicator input.
pub const SAMPLE_RATE_HZ: u64 = 1_000;

pub(crate) fn init_sampler(
    peri: ADC1,
    pin: PA0,
    config: FreqMeterConfig,
) -> Result<Sampler, ConfigError> {
    let adc = Adc::new(peri);
    let meter = FreqMeter::new(config)?;
    Ok(Sampler {
        adc,
        ch: pin.degrade_adc(),
        meter,
    })
}

/// Reads the frequency-indicator input at the sampling cadence and feeds
/// the measurement engine. Edge timestamps come straight off the 1 MHz
/// `embassy-time` tick, truncated to the engine's 32-bit clock.
pub struct Sampler {
    adc: Adc<'static, ADC1>,
    ch: AnyAdcChannel<ADC1>,
    meter: FreqMeter,
}

impl Sampler {
    /// One conversion: read, classify against the hysteresis band, append
    /// any completed measurement to the shared history.
    pub fn step(&mut self, history: &SeekerHistory) {
        let sample = self.adc.blocking_read(&mut self.ch);
        let now = Instant::now().as_ticks() as u32;
        if let Some(frequency) = self.meter.process_sample(sample, now) {
            trace!("measured {}", frequency);
            history.push(frequency);
        }
    }

    /// Sample forever. The next conversion is armed unconditionally; nothing
    /// in the control half can stall the stream.
    pub async fn run(mut self, history: &'static SeekerHistory) {
        let mut ticker = Ticker::every(Duration::from_hz(SAMPLE_RATE_HZ));
        loop {
            self.step(history);
            ticker.next().await;
        }
    }

    /// Latest measurement, `0` once the signal has gone quiet.
    pub fn last_frequency(&self) -> Frequency {
        self.meter.last_frequency(Instant::now().as_ticks() as u32)
    }
}
