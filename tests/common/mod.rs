#![allow(dead_code)]

use myrtio_light_smoothing::{LedDevice, Rgb};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceError;

/// Device that records every frame it receives
#[derive(Debug, Default)]
pub struct RecordingDevice {
    pub frames: Vec<Vec<Rgb>>,
    pub switch_offs: usize,
    pub fail_writes: bool,
    pub fail_switch_off: bool,
}

impl RecordingDevice {
    pub fn last_frame(&self) -> &[Rgb] {
        self.frames.last().map(Vec::as_slice).unwrap_or_default()
    }
}

impl LedDevice for RecordingDevice {
    type Error = DeviceError;

    fn write(&mut self, colors: &[Rgb]) -> Result<(), DeviceError> {
        self.frames.push(colors.to_vec());
        if self.fail_writes {
            return Err(DeviceError);
        }
        Ok(())
    }

    fn switch_off(&mut self) -> Result<(), DeviceError> {
        self.switch_offs += 1;
        if self.fail_switch_off {
            return Err(DeviceError);
        }
        Ok(())
    }
}
