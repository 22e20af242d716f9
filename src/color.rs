//! Hex color handling for the crosshair pen
//!
//! Settings store colors as `#RRGGBB`. Parsing also accepts `#AARRGGBB`
//! so colors with alpha can be entered by hand.

use anyhow::{anyhow, bail, Result};
use std::fmt;

/// Straight (non-premultiplied) RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Parse hex color string - supports both #RRGGBB and #AARRGGBB formats
    pub fn parse_hex(hex: &str) -> Result<Self> {
        let digits = hex
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| anyhow!("invalid color '{hex}': missing leading '#'"))?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            bail!("invalid color '{hex}': bad hex digits");
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| anyhow!("invalid color '{hex}': bad hex digits"))
        };

        match digits.len() {
            6 => Ok(Self::opaque(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Self::new(
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
                channel(0..2)?,
            )),
            _ => bail!("invalid color '{hex}': expected #RRGGBB or #AARRGGBB"),
        }
    }

    /// Format as `#RRGGBB` (alpha is not persisted)
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Source-over blend of `self` onto `dst`
    pub fn over(self, dst: Rgba) -> Rgba {
        let sa = self.a as u32;
        if sa == 255 {
            return self;
        }
        if sa == 0 {
            return dst;
        }
        let da = dst.a as u32;
        // out_a = sa + da * (1 - sa), all scaled by 255
        let out_a = sa * 255 + da * (255 - sa);
        if out_a == 0 {
            return Rgba::TRANSPARENT;
        }
        let mix = |s: u8, d: u8| {
            let num = s as u32 * sa * 255 + d as u32 * da * (255 - sa);
            ((num + out_a / 2) / out_a) as u8
        };
        Rgba::new(
            mix(self.r, dst.r),
            mix(self.g, dst.g),
            mix(self.b, dst.b),
            ((out_a + 127) / 255) as u8,
        )
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rgb() {
        assert_eq!(Rgba::parse_hex("#FF8000").unwrap(), Rgba::opaque(255, 128, 0));
        assert_eq!(Rgba::parse_hex(" #ff8000 ").unwrap(), Rgba::opaque(255, 128, 0));
    }

    #[test]
    fn test_parse_requires_single_hash_and_hex_digits() {
        assert!(Rgba::parse_hex("FF8000").is_err());
        assert!(Rgba::parse_hex("##FFFFFF").is_err());
        assert!(Rgba::parse_hex("#+F+F+F").is_err());
        assert!(Rgba::parse_hex("#+1+2+3").is_err());
        assert!(Rgba::parse_hex("#-1FFFFFF").is_err());
    }

    #[test]
    fn test_parse_argb() {
        let color = Rgba::parse_hex("#7F00FF00").unwrap();
        assert_eq!(color, Rgba::new(0, 255, 0, 0x7F));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Rgba::parse_hex("#FFF").is_err());
        assert!(Rgba::parse_hex("#GGGGGG").is_err());
        assert!(Rgba::parse_hex("white").is_err());
        assert!(Rgba::parse_hex("#ÿÿÿ").is_err());
    }

    #[test]
    fn test_hex_is_normalized_uppercase() {
        let color = Rgba::parse_hex("#a1b2c3").unwrap();
        assert_eq!(color.to_hex(), "#A1B2C3");
    }

    #[test]
    fn test_hex_drops_alpha() {
        assert_eq!(Rgba::new(1, 2, 3, 4).to_hex(), "#010203");
    }

    #[test]
    fn test_over_opaque_replaces() {
        let red = Rgba::opaque(255, 0, 0);
        assert_eq!(red.over(Rgba::WHITE), red);
    }

    #[test]
    fn test_over_transparent_keeps_destination() {
        let dst = Rgba::opaque(10, 20, 30);
        assert_eq!(Rgba::TRANSPARENT.over(dst), dst);
    }

    #[test]
    fn test_over_half_black_on_empty() {
        let out = Rgba::new(0, 0, 0, 100).over(Rgba::TRANSPARENT);
        assert_eq!(out, Rgba::new(0, 0, 0, 100));
    }
}
