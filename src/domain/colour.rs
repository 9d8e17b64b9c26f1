//! Colour - RGBA per cell, packed ABGR for canvas upload.
//!
//! Packed layout is little-endian `0xAABBGGRR`, so the bytes in memory read
//! `[R, G, B, A]` and a `Uint8ClampedArray` view over the buffer is valid image data.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    pub const BLANK: Colour = Colour::rgba(0, 0, 0, 0);
    pub const WHITE: Colour = Colour::rgba(255, 255, 255, 255);
    pub const BLACK: Colour = Colour::rgba(0, 0, 0, 255);
    pub const LIGHT_GREY: Colour = Colour::rgba(200, 200, 200, 255);
    pub const DARK_GREY: Colour = Colour::rgba(80, 80, 80, 255);
    pub const YELLOW: Colour = Colour::rgba(253, 249, 0, 255);
    pub const ORANGE: Colour = Colour::rgba(255, 161, 0, 255);
    pub const RED: Colour = Colour::rgba(230, 41, 55, 255);
    pub const GREEN: Colour = Colour::rgba(0, 228, 48, 255);
    pub const BLUE: Colour = Colour::rgba(0, 121, 241, 255);
    pub const SKY_BLUE: Colour = Colour::rgba(102, 191, 255, 255);
    pub const BROWN: Colour = Colour::rgba(127, 106, 79, 255);

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Pack as ABGR (`0xAABBGGRR`).
    #[inline]
    pub const fn to_abgr(self) -> u32 {
        ((self.a as u32) << 24) | ((self.b as u32) << 16) | ((self.g as u32) << 8) | self.r as u32
    }

    #[inline]
    pub const fn from_abgr(packed: u32) -> Self {
        Self {
            r: (packed & 0xFF) as u8,
            g: ((packed >> 8) & 0xFF) as u8,
            b: ((packed >> 16) & 0xFF) as u8,
            a: (packed >> 24) as u8,
        }
    }

    /// Slightly darker variant keyed by `seed` (0..=31 steps of 1 each).
    /// Alpha is left alone.
    #[inline]
    pub fn shaded(self, seed: u32) -> Self {
        let d = (seed & 31) as u8;
        Self {
            r: self.r.saturating_sub(d),
            g: self.g.saturating_sub(d),
            b: self.b.saturating_sub(d),
            a: self.a,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abgr_packing_is_byte_order_rgba() {
        let c = Colour::rgba(0x11, 0x22, 0x33, 0x44);
        let packed = c.to_abgr();
        assert_eq!(packed, 0x4433_2211);
        assert_eq!(packed.to_le_bytes(), [0x11, 0x22, 0x33, 0x44]);
        assert_eq!(Colour::from_abgr(packed), c);
    }

    #[test]
    fn shading_saturates_and_keeps_alpha() {
        let c = Colour::rgba(10, 200, 0, 255).shaded(20);
        assert_eq!(c, Colour::rgba(0, 180, 0, 255));
        assert_eq!(Colour::YELLOW.shaded(0), Colour::YELLOW);
    }
}
