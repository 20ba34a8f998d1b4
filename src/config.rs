//! Smoothing configuration
//!
//! [`SmoothingSettings`] is the raw, user-facing form (frequency in Hz,
//! settling time in seconds). It is validated once into a
//! [`SmoothingConfig`] which stays fixed for the smoother's lifetime.

use embassy_time::Duration;

/// Default update frequency
pub const DEFAULT_UPDATE_FREQUENCY_HZ: f32 = 25.0;

/// Default settling time
pub const DEFAULT_SETTLING_TIME_S: f32 = 0.2;

/// Longest accepted settling time
pub const MAX_SETTLING_TIME_S: f32 = 3600.0;

/// Longest accepted settling time as a duration
pub const MAX_SETTLING_TIME: Duration = Duration::from_secs(3600);

/// Longest accepted update interval
pub const MAX_UPDATE_INTERVAL: Duration = Duration::from_secs(60);

/// Configuration rejected at construction time
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Frequency is not finite, not positive or too high to yield a 1 ms interval
    #[error("update frequency must be finite and within (0, 2000] Hz")]
    InvalidFrequency,
    /// Update interval is zero
    #[error("update interval must be at least one millisecond")]
    ZeroInterval,
    /// Update interval is above [`MAX_UPDATE_INTERVAL`]
    #[error("update interval must be at most 60 seconds")]
    IntervalTooLong,
    /// Settling time is not finite, negative or above [`MAX_SETTLING_TIME_S`]
    #[error("settling time must be within [0, 3600] seconds")]
    InvalidSettlingTime,
}

/// Raw smoothing settings as a host would store them
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmoothingSettings {
    /// Output ticks per second
    pub update_frequency_hz: f32,
    /// Time in seconds in which a new target is reached
    pub settling_time_s: f32,
}

impl Default for SmoothingSettings {
    fn default() -> Self {
        Self {
            update_frequency_hz: DEFAULT_UPDATE_FREQUENCY_HZ,
            settling_time_s: DEFAULT_SETTLING_TIME_S,
        }
    }
}

impl SmoothingSettings {
    /// Validate the settings
    pub fn validate(&self) -> Result<SmoothingConfig, ConfigError> {
        SmoothingConfig::new(self.update_frequency_hz, self.settling_time_s)
    }
}

/// Validated smoothing configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmoothingConfig {
    update_interval: Duration,
    settling_time: Duration,
}

impl SmoothingConfig {
    /// Create a configuration from a frequency in Hz and a settling time in seconds
    ///
    /// A settling time of zero is valid: every tick then snaps to the target.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    pub fn new(update_frequency_hz: f32, settling_time_s: f32) -> Result<Self, ConfigError> {
        if !update_frequency_hz.is_finite() || update_frequency_hz <= 0.0 {
            return Err(ConfigError::InvalidFrequency);
        }
        if !(0.0..=MAX_SETTLING_TIME_S).contains(&settling_time_s) {
            return Err(ConfigError::InvalidSettlingTime);
        }

        let interval_ms = libm::roundf(1000.0 / update_frequency_hz);
        if interval_ms < 1.0 {
            return Err(ConfigError::InvalidFrequency);
        }
        if interval_ms > MAX_UPDATE_INTERVAL.as_millis() as f32 {
            return Err(ConfigError::IntervalTooLong);
        }
        let settling_ms = libm::roundf(settling_time_s * 1000.0);

        Self::from_durations(
            Duration::from_millis(interval_ms as u64),
            Duration::from_millis(settling_ms as u64),
        )
    }

    /// Create a configuration from explicit durations
    ///
    /// Both durations are bounded so that deadlines derived from them can
    /// not overflow an [`Instant`](embassy_time::Instant).
    pub const fn from_durations(
        update_interval: Duration,
        settling_time: Duration,
    ) -> Result<Self, ConfigError> {
        if update_interval.as_ticks() == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if update_interval.as_ticks() > MAX_UPDATE_INTERVAL.as_ticks() {
            return Err(ConfigError::IntervalTooLong);
        }
        if settling_time.as_ticks() > MAX_SETTLING_TIME.as_ticks() {
            return Err(ConfigError::InvalidSettlingTime);
        }
        Ok(Self {
            update_interval,
            settling_time,
        })
    }

    /// Time between two ticks
    pub const fn update_interval(&self) -> Duration {
        self.update_interval
    }

    /// Time in which a new target is reached
    pub const fn settling_time(&self) -> Duration {
        self.settling_time
    }
}
