use smart_leds::RGB8;

/// Device-native color, 8 bits per channel
pub type Rgb = RGB8;

/// Floating-point working color used while blending
///
/// Channels stay in the `0.0..=255.0` range as long as they are only
/// moved towards an [`Rgb`] target.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RgbF {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl RgbF {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Move towards `target` by fraction `k` (0 = stay, 1 = reach)
    #[inline]
    pub fn approach(&mut self, target: Rgb, k: f32) {
        self.r += k * (f32::from(target.r) - self.r);
        self.g += k * (f32::from(target.g) - self.g);
        self.b += k * (f32::from(target.b) - self.b);
    }

    /// Round to the nearest device-native color
    #[inline]
    pub fn to_rgb(self) -> Rgb {
        Rgb {
            r: channel_to_u8(self.r),
            g: channel_to_u8(self.g),
            b: channel_to_u8(self.b),
        }
    }
}

impl From<Rgb> for RgbF {
    fn from(color: Rgb) -> Self {
        Self {
            r: f32::from(color.r),
            g: f32::from(color.g),
            b: f32::from(color.b),
        }
    }
}

/// Round and clamp a channel into `0..=255`. NaN maps to 0.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn channel_to_u8(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    libm::roundf(value).clamp(0.0, 255.0) as u8
}
