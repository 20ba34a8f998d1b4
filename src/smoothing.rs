//! Interpolation state
//!
//! Holds the frame being blended from, the frame being blended towards and
//! the two timestamps that define the blend window. Every tick moves the
//! previous frame towards the target by the fraction of the remaining window
//! that has elapsed, then restarts the window at `now`. The approach is
//! therefore convergent rather than strictly linear over the settling time.

use embassy_time::{Duration, Instant};
use heapless::Vec;

use crate::color::{Rgb, RgbF};

/// Frame rejected by [`SmoothingState::set_target`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SmoothingError {
    /// Frame has no LEDs
    #[error("frame is empty")]
    EmptyFrame,
    /// Frame is longer than the smoother can hold
    #[error("frame has {actual} LEDs, capacity is {capacity}")]
    TooManyLeds { capacity: usize, actual: usize },
    /// Frame length differs from the length of the active session
    #[error("frame has {actual} LEDs, active session has {expected}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Outcome of accepting a new target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetUpdate {
    /// First frame of a session, previous and target are both set to it
    Activated,
    /// Session was already active, only the target and deadline moved
    Retargeted,
}

/// Previous/target frames and their timestamps
///
/// Both frames are either empty (uninitialized) or of the same length.
#[derive(Debug, Clone)]
pub struct SmoothingState<const MAX_LEDS: usize> {
    previous: Vec<RgbF, MAX_LEDS>,
    target: Vec<Rgb, MAX_LEDS>,
    previous_time: Instant,
    target_time: Instant,
}

impl<const MAX_LEDS: usize> Default for SmoothingState<MAX_LEDS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const MAX_LEDS: usize> SmoothingState<MAX_LEDS> {
    /// Create an uninitialized state
    pub const fn new() -> Self {
        Self {
            previous: Vec::new(),
            target: Vec::new(),
            previous_time: Instant::from_ticks(0),
            target_time: Instant::from_ticks(0),
        }
    }

    /// Whether a session is active
    pub fn is_active(&self) -> bool {
        !self.previous.is_empty()
    }

    /// Number of LEDs in the active session (0 when uninitialized)
    pub fn led_count(&self) -> usize {
        self.previous.len()
    }

    /// Frame currently blended from
    pub fn previous(&self) -> &[RgbF] {
        &self.previous
    }

    /// Frame currently blended towards
    pub fn target(&self) -> &[Rgb] {
        &self.target
    }

    /// Time the previous frame was last advanced
    pub const fn previous_time(&self) -> Instant {
        self.previous_time
    }

    /// Deadline by which the target should be reached
    pub const fn target_time(&self) -> Instant {
        self.target_time
    }

    /// Accept a new target frame
    ///
    /// The first frame of a session becomes both previous and target. Later
    /// frames only replace the target and push the deadline to
    /// `now + settling_time`; the blend start is left to the ticks.
    pub fn set_target(
        &mut self,
        colors: &[Rgb],
        now: Instant,
        settling_time: Duration,
    ) -> Result<TargetUpdate, SmoothingError> {
        if colors.is_empty() {
            return Err(SmoothingError::EmptyFrame);
        }
        if colors.len() > MAX_LEDS {
            return Err(SmoothingError::TooManyLeds {
                capacity: MAX_LEDS,
                actual: colors.len(),
            });
        }

        if !self.is_active() {
            self.previous.clear();
            self.previous.extend(colors.iter().copied().map(RgbF::from));
            self.target.clear();
            self.target.extend(colors.iter().copied());
            self.previous_time = now;
            self.target_time = deadline(now, settling_time);
            return Ok(TargetUpdate::Activated);
        }

        if colors.len() != self.target.len() {
            return Err(SmoothingError::LengthMismatch {
                expected: self.target.len(),
                actual: colors.len(),
            });
        }
        self.target.copy_from_slice(colors);
        self.target_time = deadline(now, settling_time);

        Ok(TargetUpdate::Retargeted)
    }

    /// Blend fraction for a tick at `now`, `None` when the tick must snap
    ///
    /// Snaps once the deadline is reached and whenever the window
    /// `target_time - previous_time` is empty, so the fraction never divides
    /// by zero.
    #[allow(clippy::cast_precision_loss)]
    pub fn blend_fraction(&self, now: Instant) -> Option<f32> {
        if now >= self.target_time {
            return None;
        }
        let window = self
            .target_time
            .checked_duration_since(self.previous_time)?
            .as_ticks();
        if window == 0 {
            return None;
        }
        let remaining = self.target_time.duration_since(now).as_ticks();

        let k = 1.0 - remaining as f32 / window as f32;
        Some(k.clamp(0.0, 1.0))
    }

    /// Advance the previous frame to `now` and write it into `out`
    ///
    /// Returns the number of LEDs written, which is the session length
    /// capped at `out.len()`. Writes nothing when uninitialized.
    pub fn compute_frame(&mut self, now: Instant, out: &mut [Rgb]) -> usize {
        if !self.is_active() {
            return 0;
        }

        match self.blend_fraction(now) {
            None => {
                for (prev, target) in self.previous.iter_mut().zip(&self.target) {
                    *prev = RgbF::from(*target);
                }
            }
            Some(k) => {
                for (prev, target) in self.previous.iter_mut().zip(&self.target) {
                    prev.approach(*target, k);
                }
            }
        }
        self.previous_time = now;

        let mut written = 0;
        for (led, prev) in out.iter_mut().zip(&self.previous) {
            *led = prev.to_rgb();
            written += 1;
        }
        written
    }

    /// Return to the uninitialized state
    pub fn reset(&mut self) {
        self.previous.clear();
        self.target.clear();
        self.previous_time = Instant::from_ticks(0);
        self.target_time = Instant::from_ticks(0);
    }
}

/// `now + settling_time`, saturating at the end of time
fn deadline(now: Instant, settling_time: Duration) -> Instant {
    now.checked_add(settling_time).unwrap_or(Instant::MAX)
}
