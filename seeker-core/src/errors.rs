use thiserror::Error;

/// Configuration mistakes are programming errors and are rejected once, at
/// construction. Nothing on the runtime path returns an error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Hysteresis thresholds out of order. High: {0}, Low: {1}")]
    ThresholdOrder(u16, u16),
    #[error("The edge timestamp clock rate must be non-zero.")]
    ZeroClockRate,
    #[error("The pulse duration does not fit the pulse period.")]
    PulseWiderThanPeriod,
    #[error("The alarm pulse does not fit the alarm interval.")]
    AlarmWiderThanInterval,
    #[error("Channel band out of order. Min: {0}, Max: {1}")]
    BandOrder(u16, u16),
}
