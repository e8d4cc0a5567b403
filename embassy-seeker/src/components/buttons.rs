use embassy_stm32::gpio::{Input, Pull};
use embassy_stm32::peripherals::{PB0, PB1};

pub(crate) fn init_buttons(up: PB0, down: PB1) -> (Input<'static>, Input<'static>) {
    // Buttons short to ground; the idle level is pulled up.
    (Input::new(up, Pull::Up), Input::new(down, Pull::Up))
}
