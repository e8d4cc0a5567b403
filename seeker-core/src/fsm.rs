use core::convert::Infallible;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::{Duration, Instant};
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::pwm::SetDutyCycle;

use crate::debounce::DebouncedButton;
use crate::errors::ConfigError;
use crate::history::History;
use crate::Frequency;

/// The four states of the channel-search machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SearchState {
    /// Waiting for a command.
    Idle,
    /// Pulsing the tuner upward.
    SearchUp,
    /// Pulsing the tuner downward.
    SearchDown,
    /// Channel found; blinking LED and buzzer until acknowledged.
    Alarm,
}

/// The frequency band that counts as a tuned channel.
///
/// The window check tolerates up to `tolerance` out-of-band entries, so a
/// single noisy sample cannot veto an otherwise settled signal.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelBand {
    /// Lowest in-band value, inclusive.
    pub min: Frequency,
    /// Highest in-band value, inclusive.
    pub max: Frequency,
    /// Maximum number of out-of-band entries still accepted as "found".
    pub tolerance: usize,
}

/// Timing and detection parameters for the search controller.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SearchConfig {
    /// Time between the starts of consecutive search pulses.
    pub pulse_period: Duration,
    /// How long each search pulse holds the actuator asserted.
    pub pulse_duration: Duration,
    /// Time between the starts of consecutive alarm blinks.
    pub alarm_interval: Duration,
    /// How long each alarm blink keeps LED and buzzer on.
    pub alarm_pulse: Duration,
    /// Continuous-assertion time required to accept a button press.
    pub debounce: Duration,
    pub band: ChannelBand,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            pulse_period: Duration::from_millis(1_000),
            pulse_duration: Duration::from_millis(500),
            alarm_interval: Duration::from_millis(100),
            alarm_pulse: Duration::from_millis(50),
            debounce: Duration::from_millis(10),
            band: ChannelBand {
                min: 14,
                max: 18,
                tolerance: 10,
            },
        }
    }
}

/// Polled channel-search controller.
///
/// Owns the two command buttons, the up/down actuator outputs (asserted by
/// driving low), the LED and buzzer PWM channels, and a read handle on the
/// shared frequency history. One `poll` runs one control-cycle step: output
/// phases first, transition checks after, so an output toggle scheduled for
/// this cycle still happens even when the state changes, and the new state's
/// entry actions run on the next poll.
pub struct SearchController<'a, M, const N: usize, BU, BD, UP, DN, LED, BZ>
where
    M: RawMutex,
    BU: InputPin<Error = Infallible>,
    BD: InputPin<Error = Infallible>,
    UP: OutputPin<Error = Infallible>,
    DN: OutputPin<Error = Infallible>,
    LED: SetDutyCycle,
    BZ: SetDutyCycle,
{
    config: SearchConfig,
    state: SearchState,
    last: SearchState,
    pulse_mark: Instant,
    pulse_active: bool,
    alarm_mark: Instant,
    alarm_on: bool,
    wait_for_release: bool,
    history: &'a History<M, N>,
    btn_up: DebouncedButton<BU>,
    btn_down: DebouncedButton<BD>,
    up: UP,
    down: DN,
    led: LED,
    buzzer: BZ,
}

impl<'a, M, const N: usize, BU, BD, UP, DN, LED, BZ>
    SearchController<'a, M, N, BU, BD, UP, DN, LED, BZ>
where
    M: RawMutex,
    BU: InputPin<Error = Infallible>,
    BD: InputPin<Error = Infallible>,
    UP: OutputPin<Error = Infallible>,
    DN: OutputPin<Error = Infallible>,
    LED: SetDutyCycle,
    BZ: SetDutyCycle,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: SearchConfig,
        history: &'a History<M, N>,
        btn_up: BU,
        btn_down: BD,
        up: UP,
        down: DN,
        led: LED,
        buzzer: BZ,
    ) -> Result<Self, ConfigError> {
        if config.pulse_duration > config.pulse_period {
            return Err(ConfigError::PulseWiderThanPeriod);
        }
        if config.alarm_pulse > config.alarm_interval {
            return Err(ConfigError::AlarmWiderThanInterval);
        }
        if config.band.min > config.band.max {
            return Err(ConfigError::BandOrder(config.band.min, config.band.max));
        }
        let mut controller = Self {
            config,
            state: SearchState::Idle,
            last: SearchState::Idle,
            pulse_mark: Instant::from_ticks(0),
            pulse_active: false,
            alarm_mark: Instant::from_ticks(0),
            alarm_on: false,
            wait_for_release: false,
            history,
            btn_up: DebouncedButton::new(btn_up, config.debounce),
            btn_down: DebouncedButton::new(btn_down, config.debounce),
            up,
            down,
            led,
            buzzer,
        };
        controller.release_actuators();
        controller.silence_alarm();
        Ok(controller)
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    /// One control-cycle step.
    pub fn poll(&mut self, now: Instant) {
        match self.state {
            SearchState::Idle => self.poll_idle(now),
            SearchState::SearchUp | SearchState::SearchDown => self.poll_search(now),
            SearchState::Alarm => self.poll_alarm(now),
        }
    }

    fn poll_idle(&mut self, now: Instant) {
        if self.state != self.last {
            self.last = self.state;
            self.release_actuators();
            self.silence_alarm();
            self.wait_for_release = true;
        }

        // Hold here until a button carried over from the previous state has
        // been let go, so a press that dismissed the alarm cannot start a
        // new search by itself.
        if self.wait_for_release {
            if self.btn_up.is_pressed(now) || self.btn_down.is_pressed(now) {
                return;
            }
            self.wait_for_release = false;
        }

        if self.btn_up.is_pressed(now) {
            info!("search up");
            self.state = SearchState::SearchUp;
        } else if self.btn_down.is_pressed(now) {
            info!("search down");
            self.state = SearchState::SearchDown;
        }
    }

    fn poll_search(&mut self, now: Instant) {
        if self.state != self.last {
            self.last = self.state;
            self.release_actuators();
            self.pulse_mark = now;
            self.pulse_active = false;
        }

        let upward = self.state == SearchState::SearchUp;

        if !self.pulse_active && now.duration_since(self.pulse_mark) >= self.config.pulse_period {
            if upward {
                self.up.set_low().unwrap();
            } else {
                self.down.set_low().unwrap();
            }
            self.pulse_mark = now;
            self.pulse_active = true;
        }
        if self.pulse_active && now.duration_since(self.pulse_mark) >= self.config.pulse_duration {
            if upward {
                self.up.set_high().unwrap();
            } else {
                self.down.set_high().unwrap();
            }
            self.pulse_active = false;
        }

        // The channel check outranks a manual abort in the same cycle.
        if self.channel_found() {
            info!("channel found");
            self.state = SearchState::Alarm;
        } else {
            let opposite = if upward {
                self.btn_down.is_pressed(now)
            } else {
                self.btn_up.is_pressed(now)
            };
            if opposite {
                info!("search aborted");
                self.state = SearchState::Idle;
            }
        }
    }

    fn poll_alarm(&mut self, now: Instant) {
        if self.state != self.last {
            self.last = self.state;
            self.alarm_mark = now;
            self.alarm_on = false;
            self.silence_alarm();
        }

        if !self.alarm_on && now.duration_since(self.alarm_mark) >= self.config.alarm_interval {
            self.led.set_duty_cycle_fraction(1, 2).unwrap();
            self.buzzer.set_duty_cycle_fraction(1, 2).unwrap();
            self.alarm_mark = now;
            self.alarm_on = true;
        } else if self.alarm_on && now.duration_since(self.alarm_mark) >= self.config.alarm_pulse {
            self.silence_alarm();
            self.alarm_on = false;
        }

        if self.btn_up.is_pressed(now) || self.btn_down.is_pressed(now) {
            info!("alarm acknowledged");
            self.state = SearchState::Idle;
        }
    }

    fn channel_found(&self) -> bool {
        let band = &self.config.band;
        self.history.out_of_band(band.min, band.max) <= band.tolerance
    }

    fn release_actuators(&mut self) {
        self.up.set_high().unwrap();
        self.down.set_high().unwrap();
    }

    fn silence_alarm(&mut self) {
        self.led.set_duty_cycle_fully_off().unwrap();
        self.buzzer.set_duty_cycle_fully_off().unwrap();
    }
}
