use core::convert::Infallible;

use embassy_time::{Duration, Instant};
use embedded_hal::digital::InputPin;

/// Debounced check for an active-low push button.
///
/// A press is accepted only once the input has read low continuously for the
/// whole debounce window. The window is tracked against the timestamps the
/// caller polls with, so the check never blocks the poll loop; a single
/// bounce back to high restarts it.
pub struct DebouncedButton<T: InputPin<Error = Infallible>> {
    pin: T,
    window: Duration,
    low_since: Option<Instant>,
}

impl<T: InputPin<Error = Infallible>> DebouncedButton<T> {
    pub fn new(pin: T, window: Duration) -> Self {
        Self {
            pin,
            window,
            low_since: None,
        }
    }

    /// Whether the button is currently pressed and stable.
    pub fn is_pressed(&mut self, now: Instant) -> bool {
        if self.pin.is_low().unwrap() {
            let since = *self.low_since.get_or_insert(now);
            now.duration_since(since) >= self.window
        } else {
            self.low_since = None;
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    use embedded_hal::digital::ErrorType;

    #[derive(Clone)]
    struct Level(Rc<Cell<bool>>);

    struct FakePin(Level);

    impl ErrorType for FakePin {
        type Error = Infallible;
    }

    impl InputPin for FakePin {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            Ok(self.0 .0.get())
        }

        fn is_low(&mut self) -> Result<bool, Infallible> {
            Ok(!self.0 .0.get())
        }
    }

    fn button() -> (DebouncedButton<FakePin>, Level) {
        let level = Level(Rc::new(Cell::new(true)));
        let button = DebouncedButton::new(FakePin(level.clone()), Duration::from_millis(10));
        (button, level)
    }

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    #[test]
    fn press_accepted_after_window() {
        let (mut button, level) = button();
        assert!(!button.is_pressed(at(0)));
        level.0.set(false);
        assert!(!button.is_pressed(at(1)));
        assert!(!button.is_pressed(at(10)));
        assert!(button.is_pressed(at(11)));
    }

    #[test]
    fn bounce_restarts_the_window() {
        let (mut button, level) = button();
        level.0.set(false);
        assert!(!button.is_pressed(at(0)));
        level.0.set(true);
        assert!(!button.is_pressed(at(5)));
        level.0.set(false);
        assert!(!button.is_pressed(at(6)));
        assert!(!button.is_pressed(at(15)));
        assert!(button.is_pressed(at(16)));
    }

    #[test]
    fn release_reads_false_immediately() {
        let (mut button, level) = button();
        level.0.set(false);
        button.is_pressed(at(0));
        assert!(button.is_pressed(at(20)));
        level.0.set(true);
        assert!(!button.is_pressed(at(21)));
    }
}
