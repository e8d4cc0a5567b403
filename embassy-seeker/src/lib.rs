#![doc = include_str!("../README.md")]
#![no_std]

use embassy_stm32::gpio::{Input, Output};
use embassy_stm32::peripherals::{ADC1, PA0, PA8, PA9, PB0, PB1, PB10, PB11, TIM1};
use embassy_stm32::timer::simple_pwm::SimplePwmChannel;
use embassy_stm32::Peripherals;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use seeker_core::errors::ConfigError;
use seeker_core::freq_meter::FreqMeterConfig;
use seeker_core::fsm::{SearchConfig, SearchController};
use seeker_core::history::History;

use crate::components::{actuator, alarm, buttons, sampler};
pub use crate::components::sampler::Sampler;

pub mod components;

/// Depth of the shared frequency history window.
pub const HISTORY_DEPTH: usize = 20;

pub type SeekerHistory = History<CriticalSectionRawMutex, HISTORY_DEPTH>;

/// The window shared by the sampling task (writer) and the control task
/// (reader). The critical-section mutex keeps the controller's scan
/// consistent even with the sampler running at interrupt priority.
pub static SEEKER_HISTORY: SeekerHistory = History::new();

pub type SeekerButton = Input<'static>;
pub type SeekerActuator = Output<'static>;
pub type SeekerAlarmChannel = SimplePwmChannel<'static, TIM1>;

pub type SeekerController = SearchController<
    'static,
    CriticalSectionRawMutex,
    HISTORY_DEPTH,
    SeekerButton,
    SeekerButton,
    SeekerActuator,
    SeekerActuator,
    SeekerAlarmChannel,
    SeekerAlarmChannel,
>;

/// The seeker board, split into the two halves of the control loop: the
/// sampler feeding `SEEKER_HISTORY` and the controller consuming it.
pub struct Board {
    pub sampler: Sampler,
    pub controller: SeekerController,
}

impl Board {
    /// Bring the board up with the default seeker configuration.
    pub fn new(p: Peripherals) -> Result<Board, ConfigError> {
        Board::init(p, FreqMeterConfig::default(), SearchConfig::default())
    }

    pub fn init(
        p: Peripherals,
        freq: FreqMeterConfig,
        search: SearchConfig,
    ) -> Result<Board, ConfigError> {
        let sampler = Self::init_sampler(p.ADC1, p.PA0, freq)?;
        let (btn_up, btn_down) = Self::init_buttons(p.PB0, p.PB1);
        let (up, down) = Self::init_actuators(p.PB10, p.PB11);
        let (led, buzzer) = Self::init_alarm(p.PA8, p.PA9, p.TIM1);
        let controller = SearchController::new(
            search,
            &SEEKER_HISTORY,
            btn_up,
            btn_down,
            up,
            down,
            led,
            buzzer,
        )?;
        Ok(Board { sampler, controller })
    }

    pub fn init_sampler(
        adc: ADC1,
        pin: PA0,
        config: FreqMeterConfig,
    ) -> Result<Sampler, ConfigError> {
        sampler::init_sampler(adc, pin, config)
    }

    pub fn init_buttons(up: PB0, down: PB1) -> (SeekerButton, SeekerButton) {
        buttons::init_buttons(up, down)
    }

    pub fn init_actuators(up: PB10, down: PB11) -> (SeekerActuator, SeekerActuator) {
        actuator::init_actuators(up, down)
    }

    pub fn init_alarm(
        buzzer: PA8,
        led: PA9,
        tim: TIM1,
    ) -> (SeekerAlarmChannel, SeekerAlarmChannel) {
        alarm::init_alarm(buzzer, led, tim)
    }
}
