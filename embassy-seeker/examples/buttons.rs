//! Debounced button check: log each accepted press.

#![no_std]
#![no_main]

use defmt::info;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_seeker::Board;
use embassy_time::{Duration, Instant, Timer};
use panic_probe as _;
use seeker_core::debounce::DebouncedButton;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Booting...");
    let p = embassy_stm32::init(Default::default());
    let (up, down) = Board::init_buttons(p.PB0, p.PB1);
    let window = Duration::from_millis(10);
    let mut up = DebouncedButton::new(up, window);
    let mut down = DebouncedButton::new(down, window);

    let mut up_was = false;
    let mut down_was = false;
    loop {
        let now = Instant::now();
        let up_is = up.is_pressed(now);
        if up_is && !up_was {
            info!("up pressed");
        }
        let down_is = down.is_pressed(now);
        if down_is && !down_was {
            info!("down pressed");
        }
        up_was = up_is;
        down_was = down_is;
        Timer::after_millis(5).await;
    }
}
