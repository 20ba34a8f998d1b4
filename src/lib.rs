#![no_std]

mod logging;

pub mod channel;
pub mod color;
pub mod config;
pub mod runner;
pub mod scheduler;
pub mod smoothing;

pub use config::{ConfigError, SmoothingConfig, SmoothingSettings};
pub use runner::{
    CommandChannel, CommandReceiver, CommandSender, CommandSummary, SmoothingCommand,
};
pub use scheduler::{FrameResult, LinearSmoothing, SchedulerPhase};
pub use smoothing::{SmoothingError, SmoothingState, TargetUpdate};

pub use color::{Rgb, RgbF};
pub use embassy_time::{Duration, Instant};

/// Abstract LED device trait
///
/// Implement this trait to put smoothing in front of a hardware output.
/// The smoother owns the device and is generic over this trait.
pub trait LedDevice {
    /// Error reported by the hardware
    type Error;

    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]) -> Result<(), Self::Error>;

    /// Turn all LEDs off
    fn switch_off(&mut self) -> Result<(), Self::Error>;
}
