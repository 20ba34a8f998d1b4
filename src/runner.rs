//! Cooperative smoothing task
//!
//! Frame sources do not call the smoother directly when they live in another
//! task. They push [`SmoothingCommand`]s into a [`CommandChannel`] and the
//! task applies them between ticks, so a tick never observes a half-applied
//! write or switch-off.

use embassy_time::{Instant, Timer};
use heapless::Vec;

use crate::channel::{Channel, Receiver, Sender};
use crate::color::Rgb;
use crate::logging::log_warn;
use crate::scheduler::LinearSmoothing;
use crate::smoothing::SmoothingError;
use crate::LedDevice;

/// Request from a frame source to the smoothing task
#[derive(Debug, Clone)]
pub enum SmoothingCommand<const MAX_LEDS: usize> {
    /// New target frame
    Write(Vec<Rgb, MAX_LEDS>),
    /// Stop smoothing and switch the device off
    SwitchOff,
}

impl<const MAX_LEDS: usize> SmoothingCommand<MAX_LEDS> {
    /// Build a write command by copying `colors`
    ///
    /// Fails with [`SmoothingError::TooManyLeds`] if `colors` does not fit.
    pub fn write(colors: &[Rgb]) -> Result<Self, SmoothingError> {
        Vec::from_slice(colors)
            .map(Self::Write)
            .map_err(|()| SmoothingError::TooManyLeds {
                capacity: MAX_LEDS,
                actual: colors.len(),
            })
    }
}

/// Type alias for the command channel
pub type CommandChannel<const MAX_LEDS: usize, const SIZE: usize> =
    Channel<SmoothingCommand<MAX_LEDS>, SIZE>;

/// Type alias for command sender
pub type CommandSender<'a, const MAX_LEDS: usize, const SIZE: usize> =
    Sender<'a, SmoothingCommand<MAX_LEDS>, SIZE>;

/// Type alias for command receiver
pub type CommandReceiver<'a, const MAX_LEDS: usize, const SIZE: usize> =
    Receiver<'a, SmoothingCommand<MAX_LEDS>, SIZE>;

/// What a batch of commands did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSummary<E> {
    /// Frames accepted as targets
    pub accepted: usize,
    /// Frames rejected by the state
    pub rejected: usize,
    /// Result of the last switch-off in the batch, if any
    pub switch_off: Option<Result<(), E>>,
}

impl<D: LedDevice, const MAX_LEDS: usize> LinearSmoothing<D, MAX_LEDS> {
    /// Apply every pending command in order (non-blocking)
    pub fn process_commands<const SIZE: usize>(
        &mut self,
        commands: &CommandReceiver<'_, MAX_LEDS, SIZE>,
        now: Instant,
    ) -> CommandSummary<D::Error> {
        let mut summary = CommandSummary {
            accepted: 0,
            rejected: 0,
            switch_off: None,
        };

        for command in commands.drain() {
            match command {
                SmoothingCommand::Write(colors) => match self.write(&colors, now) {
                    Ok(()) => summary.accepted += 1,
                    Err(_) => summary.rejected += 1,
                },
                SmoothingCommand::SwitchOff => {
                    let result = self.switch_off();
                    if result.is_err() {
                        log_warn!("smoothing: device switch-off failed");
                    }
                    summary.switch_off = Some(result);
                }
            }
        }

        summary
    }

    /// Run the smoothing loop forever
    ///
    /// Drains commands, ticks and sleeps until the next deadline. While idle
    /// it only wakes once per update interval to look for commands.
    pub async fn run<const SIZE: usize>(
        &mut self,
        commands: CommandReceiver<'_, MAX_LEDS, SIZE>,
    ) {
        loop {
            let now = Instant::now();
            self.process_commands(&commands, now);

            let deadline = match self.tick(now) {
                Some(result) => result.next_deadline,
                None => now + self.config().update_interval(),
            };
            Timer::at(deadline).await;
        }
    }
}
