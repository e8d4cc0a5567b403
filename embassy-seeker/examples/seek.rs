//! The complete channel-search device: sampler and controller, each in
//! their own task, sharing the history window.

#![no_std]
#![no_main]

use defmt::info;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_seeker::{Board, Sampler, SeekerController, SEEKER_HISTORY};
use embassy_time::{Duration, Instant, Ticker};
use panic_probe as _;

/// Control-cycle cadence.
const POLL_EVERY: Duration = Duration::from_millis(5);

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Booting...");
    let p = embassy_stm32::init(Default::default());
    let board = Board::new(p).unwrap();
    spawner.must_spawn(sample(board.sampler));
    spawner.must_spawn(control(board.controller));
}

#[embassy_executor::task]
async fn sample(sampler: Sampler) {
    sampler.run(&SEEKER_HISTORY).await
}

#[embassy_executor::task]
async fn control(mut controller: SeekerController) {
    let mut ticker = Ticker::every(POLL_EVERY);
    loop {
        controller.poll(Instant::now());
        ticker.next().await;
    }
}
