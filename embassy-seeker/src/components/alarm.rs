use embassy_stm32::gpio::OutputType;
use embassy_stm32::peripherals::{PA8, PA9, TIM1};
use embassy_stm32::time::hz;
use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm, SimplePwmChannel};

/// Tone the buzzer resonates at. The LED shares the timer and simply runs
/// at the same frequency.
pub const ALARM_TONE_HZ: u32 = 2_730;

pub(crate) fn init_alarm(
    buzzer: PA8,
    led: PA9,
    tim: TIM1,
) -> (SimplePwmChannel<'static, TIM1>, SimplePwmChannel<'static, TIM1>) {
    let buzzer_pin = PwmPin::new_ch1(buzzer, OutputType::PushPull);
    let led_pin = PwmPin::new_ch2(led, OutputType::PushPull);
    let pwm = SimplePwm::new(
        tim,
        Some(buzzer_pin),
        Some(led_pin),
        None,
        None,
        hz(ALARM_TONE_HZ),
        Default::default(),
    );
    let channels = pwm.split();
    let mut buzzer = channels.ch1;
    let mut led = channels.ch2;
    buzzer.enable();
    led.enable();
    (led, buzzer)
}
