use embassy_stm32::gpio::{Level, Output, Speed};
use embassy_stm32::peripherals::{PB10, PB11};

pub(crate) fn init_actuators(up: PB10, down: PB11) -> (Output<'static>, Output<'static>) {
    // The tuner drive transistors are active-low; released is high.
    (
        Output::new(up, Level::High, Speed::Low),
        Output::new(down, Level::High, Speed::Low),
    )
}
