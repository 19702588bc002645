use crate::error::ColorError;

/// sRGB color, channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb_f32(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb_f32(1.0, 1.0, 1.0);

    const CHANNEL_MAX: f32 = u8::MAX as f32;

    pub const fn rgb_f32(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: f32::from(r) / Self::CHANNEL_MAX,
            g: f32::from(g) / Self::CHANNEL_MAX,
            b: f32::from(b) / Self::CHANNEL_MAX,
        }
    }

    /// Color from a `0xRRGGBB` value.
    pub fn from_u32(value: u32) -> Self {
        let r = (value >> 16) & 0xFF;
        let g = (value >> 8) & 0xFF;
        let b = value & 0xFF;
        Self::rgb(r as u8, g as u8, b as u8)
    }

    /// Builds a color from raw 8-bit channel values.
    ///
    /// Values are never clamped: a triple with any channel outside `0..=255` is
    /// rejected as a whole.
    pub fn try_from_channels(channels: [i32; 3]) -> Result<Self, ColorError> {
        let mut bytes = [0u8; 3];
        for (channel, (&value, byte)) in channels.iter().zip(bytes.iter_mut()).enumerate() {
            *byte = u8::try_from(value)
                .map_err(|_| ColorError::ChannelOutOfRange { channel, value })?;
        }
        Ok(Self::rgb(bytes[0], bytes[1], bytes[2]))
    }

    pub fn lerp(self, other: Color, t: f32) -> Self {
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    /// Linear-light components, as expected by an sRGB render target.
    pub fn to_linear(self) -> glam::Vec3 {
        glam::Vec3::new(
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
        )
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod test {
    use super::Color;
    use crate::error::ColorError;

    #[test]
    fn test_from_hex() {
        assert_eq!(Color::from_u32(0xFFFFFF), Color::WHITE);
        assert_eq!(Color::from_u32(0x000000), Color::BLACK);
        assert_eq!(Color::from_u32(0x00FF83), Color::rgb(0, 255, 131));
    }

    #[test]
    fn test_channels_in_range() {
        let color = Color::try_from_channels([0, 255, 150]).unwrap();
        assert_eq!(color, Color::rgb(0, 255, 150));
    }

    #[test]
    fn test_channels_out_of_range_rejected() {
        assert_eq!(
            Color::try_from_channels([256, 10, 150]),
            Err(ColorError::ChannelOutOfRange {
                channel: 0,
                value: 256
            })
        );
        assert_eq!(
            Color::try_from_channels([10, -3, 150]),
            Err(ColorError::ChannelOutOfRange {
                channel: 1,
                value: -3
            })
        );
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Color::rgb(0, 255, 131);
        let b = Color::rgb(200, 20, 150);
        assert_eq!(a.lerp(b, 0.0), a);
        let end = a.lerp(b, 1.0);
        assert!((end.r - b.r).abs() < 1e-6);
        assert!((end.g - b.g).abs() < 1e-6);
        assert!((end.b - b.b).abs() < 1e-6);
    }

    #[test]
    fn test_to_linear() {
        assert_eq!(Color::BLACK.to_linear(), glam::Vec3::ZERO);
        let white = Color::WHITE.to_linear();
        assert!((white - glam::Vec3::ONE).abs().max_element() < 1e-6);
        let mid = Color::rgb_f32(0.5, 0.5, 0.5).to_linear();
        assert!(mid.x > 0.2 && mid.x < 0.22);
    }
}
