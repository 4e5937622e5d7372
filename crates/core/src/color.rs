//! Color types used by palettes, background tints, and draw descriptors.
//!
//! Palettes are authored in HSB (hue in degrees, saturation and brightness in
//! percent) and resolved once to [`Srgb`], which is what renderers receive.
//! Components are `f64` throughout.

use crate::error::EngineError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// sRGB color with components in [0, 1].
///
/// Serializes as a hex string `"#rrggbb"`; the round-trip is quantized to
/// 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Hue/saturation/brightness color: `h` in degrees, `s` and `b` in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsb {
    pub h: f64,
    pub s: f64,
    pub b: f64,
}

impl Hsb {
    pub const fn new(h: f64, s: f64, b: f64) -> Self {
        Self { h, s, b }
    }
}

impl Srgb {
    /// Builds a color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }

    /// Quantizes to 8-bit channels with rounding, clamping out-of-range values.
    pub fn to_rgb8(self) -> [u8; 3] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }

    /// Parses `"#ff00aa"` or `"ff00aa"` (case insensitive).
    pub fn from_hex(hex: &str) -> Result<Srgb, EngineError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(EngineError::InvalidColor(format!(
                "expected 6 hex digits, got {:?}",
                hex
            )));
        }
        let channel = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|e| EngineError::InvalidColor(format!("invalid {name} component: {e}")))
        };
        Ok(Srgb::from_rgb8(
            channel(0..2, "red")?,
            channel(2..4, "green")?,
            channel(4..6, "blue")?,
        ))
    }

    /// Formats as `"#rrggbb"`.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl Serialize for Srgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Srgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Srgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Converts HSB to sRGB using the standard hexcone model.
///
/// Hue wraps modulo 360; saturation and brightness are clamped to [0, 100].
pub fn hsb_to_srgb(c: Hsb) -> Srgb {
    let h = c.h.rem_euclid(360.0) / 60.0;
    let s = c.s.clamp(0.0, 100.0) / 100.0;
    let v = c.b.clamp(0.0, 100.0) / 100.0;

    let chroma = v * s;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    let m = v - chroma;

    let (r, g, b) = match h as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    Srgb {
        r: r + m,
        g: g + m,
        b: b + m,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: Srgb, b: Srgb) -> bool {
        (a.r - b.r).abs() < EPSILON && (a.g - b.g).abs() < EPSILON && (a.b - b.b).abs() < EPSILON
    }

    #[test]
    fn hsb_primaries() {
        let red = hsb_to_srgb(Hsb::new(0.0, 100.0, 100.0));
        let green = hsb_to_srgb(Hsb::new(120.0, 100.0, 100.0));
        let blue = hsb_to_srgb(Hsb::new(240.0, 100.0, 100.0));
        assert!(approx_eq(red, Srgb { r: 1.0, g: 0.0, b: 0.0 }), "{red:?}");
        assert!(approx_eq(green, Srgb { r: 0.0, g: 1.0, b: 0.0 }), "{green:?}");
        assert!(approx_eq(blue, Srgb { r: 0.0, g: 0.0, b: 1.0 }), "{blue:?}");
    }

    #[test]
    fn zero_saturation_is_gray_at_brightness() {
        let gray = hsb_to_srgb(Hsb::new(213.0, 0.0, 75.0));
        assert!(approx_eq(gray, Srgb { r: 0.75, g: 0.75, b: 0.75 }), "{gray:?}");
    }

    #[test]
    fn zero_brightness_is_black_for_any_hue() {
        for h in [0.0, 45.0, 190.0, 359.0] {
            let c = hsb_to_srgb(Hsb::new(h, 80.0, 0.0));
            assert!(approx_eq(c, Srgb { r: 0.0, g: 0.0, b: 0.0 }), "hue {h}: {c:?}");
        }
    }

    #[test]
    fn hue_wraps_past_360() {
        let a = hsb_to_srgb(Hsb::new(35.0, 75.0, 95.0));
        let b = hsb_to_srgb(Hsb::new(395.0, 75.0, 95.0));
        let c = hsb_to_srgb(Hsb::new(-325.0, 75.0, 95.0));
        assert!(approx_eq(a, b));
        assert!(approx_eq(a, c));
    }

    #[test]
    fn warm_hue_is_red_dominant() {
        let c = hsb_to_srgb(Hsb::new(35.0, 75.0, 95.0));
        assert!(c.r > c.g && c.g > c.b, "{c:?}");
    }

    #[test]
    fn from_hex_parses_with_and_without_hash() {
        let a = Srgb::from_hex("#0f0c08").unwrap();
        let b = Srgb::from_hex("0F0C08").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_rgb8(), [15, 12, 8]);
    }

    #[test]
    fn from_hex_rejects_bad_input() {
        assert!(Srgb::from_hex("#12345").is_err());
        assert!(Srgb::from_hex("#zzzzzz").is_err());
        assert!(Srgb::from_hex("#ééé").is_err());
    }

    #[test]
    fn to_rgb8_clamps_out_of_range() {
        let c = Srgb {
            r: 1.4,
            g: -0.2,
            b: 0.5,
        };
        assert_eq!(c.to_rgb8(), [255, 0, 128]);
    }

    #[test]
    fn serializes_as_hex_string() {
        let c = Srgb::from_rgb8(5, 5, 10);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "\"#05050a\"");
        let back: Srgb = serde_json::from_str(&json).unwrap();
        assert_eq!(back.to_rgb8(), [5, 5, 10]);
    }

    #[test]
    fn deserialize_invalid_hex_is_an_error() {
        assert!(serde_json::from_str::<Srgb>("\"nope\"").is_err());
    }
}
