//! Smoothing scheduler
//!
//! Owns the LED device, the interpolation state and the tick cadence.
//! Portable: the caller (or [`LinearSmoothing::run`](crate::runner)) is
//! responsible for waiting until the returned deadline between ticks.

use embassy_time::{Duration, Instant};

use crate::color::Rgb;
use crate::config::SmoothingConfig;
use crate::logging::{log_debug, log_warn};
use crate::smoothing::{SmoothingError, SmoothingState, TargetUpdate};
use crate::LedDevice;

/// Result of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameResult {
    /// The deadline for the next tick.
    pub next_deadline: Instant,
    /// How long to wait until the next tick (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Whether the scheduler is emitting frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerPhase {
    /// Not ticking, waiting for the first frame of a session
    Idle,
    /// Ticking at the configured interval
    Running { next_tick: Instant },
}

/// Linear color smoothing in front of an LED device
///
/// Frames passed to [`write`](Self::write) become targets; every
/// [`tick`](Self::tick) blends the last emitted frame towards the target
/// and writes the result to the device.
///
/// # Usage
///
/// ```ignore
/// let config = SmoothingConfig::new(25.0, 0.2)?;
/// let mut smoothing: LinearSmoothing<_, 64> = LinearSmoothing::new(device, config);
///
/// smoothing.write(&colors, Instant::now())?;
/// while let Some(result) = smoothing.tick(Instant::now()) {
///     sleep_ms(result.sleep_duration.as_millis());
/// }
/// ```
pub struct LinearSmoothing<D: LedDevice, const MAX_LEDS: usize> {
    device: D,
    config: SmoothingConfig,
    state: SmoothingState<MAX_LEDS>,
    phase: SchedulerPhase,
    frame_buffer: [Rgb; MAX_LEDS],
    failed_writes: u32,
}

impl<D: LedDevice, const MAX_LEDS: usize> LinearSmoothing<D, MAX_LEDS> {
    /// Create an idle smoother owning `device`
    pub fn new(device: D, config: SmoothingConfig) -> Self {
        Self {
            device,
            config,
            state: SmoothingState::new(),
            phase: SchedulerPhase::Idle,
            frame_buffer: [Rgb::default(); MAX_LEDS],
            failed_writes: 0,
        }
    }

    /// Accept a new target frame
    ///
    /// The first frame after construction or [`switch_off`](Self::switch_off)
    /// starts the cadence with a tick due at `now`. Later frames only move the
    /// target; a running cadence is never restarted.
    pub fn write(&mut self, colors: &[Rgb], now: Instant) -> Result<(), SmoothingError> {
        let update = self
            .state
            .set_target(colors, now, self.config.settling_time())
            .inspect_err(|err| log_warn!("smoothing: frame rejected: {}", err))?;

        if update == TargetUpdate::Activated {
            log_debug!("smoothing: session started with {} LEDs", colors.len());
        }
        if self.phase == SchedulerPhase::Idle {
            self.phase = SchedulerPhase::Running { next_tick: now };
        }
        Ok(())
    }

    /// Stop ticking, forget both frames and switch the device off
    ///
    /// Returns the device's result. Safe to call in any phase.
    pub fn switch_off(&mut self) -> Result<(), D::Error> {
        self.phase = SchedulerPhase::Idle;
        self.state.reset();
        log_debug!("smoothing: switched off");

        self.device.switch_off()
    }

    /// Process one tick and return timing information
    ///
    /// Returns `None` while idle. A failed device write is logged and
    /// counted; the cadence keeps going.
    pub fn tick(&mut self, now: Instant) -> Option<FrameResult> {
        let SchedulerPhase::Running { mut next_tick } = self.phase else {
            return None;
        };

        // Drift correction: if we've fallen too far behind, reset to now
        let max_drift = self.config.update_interval() * 2;
        if now > next_tick + max_drift {
            log_debug!(
                "smoothing: {} ms behind, skipping backlog",
                now.duration_since(next_tick).as_millis()
            );
            next_tick = now;
        }

        let count = self.state.compute_frame(now, &mut self.frame_buffer);
        if self.device.write(&self.frame_buffer[..count]).is_err() {
            self.failed_writes = self.failed_writes.saturating_add(1);
            log_warn!(
                "smoothing: device write failed ({} so far)",
                self.failed_writes
            );
        }

        next_tick += self.config.update_interval();
        self.phase = SchedulerPhase::Running { next_tick };

        let sleep_duration = next_tick
            .checked_duration_since(now)
            .unwrap_or(Duration::from_ticks(0));

        Some(FrameResult {
            next_deadline: next_tick,
            sleep_duration,
        })
    }

    /// Whether the cadence is running
    pub fn is_running(&self) -> bool {
        matches!(self.phase, SchedulerPhase::Running { .. })
    }

    /// Current scheduler phase
    pub const fn phase(&self) -> SchedulerPhase {
        self.phase
    }

    /// Number of LEDs in the active session (0 when idle)
    pub fn led_count(&self) -> usize {
        self.state.led_count()
    }

    /// Configuration fixed at construction
    pub const fn config(&self) -> &SmoothingConfig {
        &self.config
    }

    /// Interpolation state
    pub const fn state(&self) -> &SmoothingState<MAX_LEDS> {
        &self.state
    }

    /// Number of device writes that failed since construction
    pub const fn failed_writes(&self) -> u32 {
        self.failed_writes
    }

    /// Get a reference to the device.
    pub const fn device(&self) -> &D {
        &self.device
    }

    /// Get a mutable reference to the device.
    pub const fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// Release the device
    pub fn into_device(self) -> D {
        self.device
    }
}
