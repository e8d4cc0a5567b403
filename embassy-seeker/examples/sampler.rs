//! Frequency meter on its own: sample the indicator input and report the
//! measured value once a second.

#![no_std]
#![no_main]

use defmt::info;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_seeker::{Board, SEEKER_HISTORY};
use embassy_time::{Duration, Instant, Ticker};
use panic_probe as _;
use seeker_core::freq_meter::FreqMeterConfig;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Booting...");
    let p = embassy_stm32::init(Default::default());
    let mut sampler = Board::init_sampler(p.ADC1, p.PA0, FreqMeterConfig::default()).unwrap();

    let mut report = Instant::now();
    let mut ticker = Ticker::every(Duration::from_hz(1_000));
    loop {
        sampler.step(&SEEKER_HISTORY);
        if Instant::now().duration_since(report) >= Duration::from_secs(1) {
            info!("frequency: {}", sampler.last_frequency());
            report = Instant::now();
        }
        ticker.next().await;
    }
}
