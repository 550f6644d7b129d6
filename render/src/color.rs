use utils::clamp;

/// Packed `0xAARRGGBB` pixel.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Color {
    data: u32,
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.data
    }
}

impl From<u32> for Color {
    fn from(data: u32) -> Self {
        Self { data }
    }
}

impl From<rgb::RGBA8> for Color {
    fn from(px: rgb::RGBA8) -> Self {
        Self::argb8(px.a, px.r, px.g, px.b)
    }
}

impl From<Color> for rgb::RGBA8 {
    fn from(color: Color) -> Self {
        rgb::RGBA8::new(color.r(), color.g(), color.b(), color.a())
    }
}

impl Color {
    pub fn argb(a: f32, r: f32, g: f32, b: f32) -> Self {
        let channel = |v: f32| (clamp(v, 0.0, 1.0) * 255.0).round() as u8;
        Self::argb8(channel(a), channel(r), channel(g), channel(b))
    }

    pub const fn argb8(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self {
            data: (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32,
        }
    }

    pub fn a(self) -> u8 { ((self.data & Self::A_MASK) >> 24) as u8 }
    pub fn r(self) -> u8 { ((self.data & Self::R_MASK) >> 16) as u8 }
    pub fn g(self) -> u8 { ((self.data & Self::G_MASK) >> 8) as u8 }
    pub fn b(self) -> u8 { (self.data & Self::B_MASK) as u8 }

    pub fn with_alpha(self, a: u8) -> Self {
        Self { data: (self.data & !Self::A_MASK) | (a as u32) << 24 }
    }

    /// Source-over compositing of `self` onto `dst`.
    pub fn over(self, dst: Color) -> Color {
        let sa = self.a() as u32;
        if sa == 255 {
            return self;
        }
        if sa == 0 {
            return dst;
        }
        let da = dst.a() as u32;
        let inv = 255 - sa;
        // alpha in 0..=255, premultiplied arithmetic scaled by 255
        let out_a = sa + da * inv / 255;
        if out_a == 0 {
            return Self::TRANSPARENT;
        }
        let mix = |s: u8, d: u8| -> u8 {
            ((s as u32 * sa * 255 + d as u32 * da * inv) / (out_a * 255)) as u8
        };
        Self::argb8(
            out_a as u8,
            mix(self.r(), dst.r()),
            mix(self.g(), dst.g()),
            mix(self.b(), dst.b()),
        )
    }

    pub const A_MASK: u32 = 0xFF00_0000;
    pub const R_MASK: u32 = 0x00FF_0000;
    pub const G_MASK: u32 = 0x0000_FF00;
    pub const B_MASK: u32 = 0x0000_00FF;

    pub const TRANSPARENT: Self = Self { data: 0 };
    pub const BLACK: Self = Self { data: Self::A_MASK };
    pub const WHITE: Self = Self {
        data: Self::A_MASK | Self::R_MASK | Self::G_MASK | Self::B_MASK,
    };
    pub const YELLOW: Self = Self {
        data: Self::A_MASK | Self::R_MASK | Self::G_MASK,
    };
    pub const RED: Self = Self {
        data: Self::A_MASK | Self::R_MASK,
    };
    pub const BLUE: Self = Self {
        data: Self::A_MASK | Self::B_MASK,
    };
    pub const PURPLE: Self = Self {
        data: Self::A_MASK | Self::R_MASK | Self::B_MASK,
    };
    pub const GREY: Self = Self {
        data: Self::A_MASK | 0x7F7F7F,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_unpack() {
        let c = Color::argb8(0x40, 0xDC, 0x0E, 0x01);
        assert_eq!((c.a(), c.r(), c.g(), c.b()), (0x40, 0xDC, 0x0E, 0x01));
        assert_eq!(u32::from(c), 0x40DC_0E01);
    }

    #[test]
    fn opaque_source_replaces_destination() {
        assert_eq!(Color::RED.over(Color::BLUE), Color::RED);
        assert_eq!(Color::TRANSPARENT.over(Color::BLUE), Color::BLUE);
    }

    #[test]
    fn half_alpha_mixes_over_opaque() {
        let mixed = Color::WHITE.with_alpha(128).over(Color::BLACK);
        assert_eq!(mixed.a(), 255);
        assert!((127..=129).contains(&mixed.r()));
    }
}
