//! Indexed color palettes.
//!
//! Particles pick a color index once, at spawn, and the renderer resolves it
//! against whichever palette is active when the particle is drawn. Lookups
//! wrap modulo the palette length, so an index drawn from an eight-color
//! palette still resolves after the aura shifts to a six-color one.

use crate::color::{hsb_to_srgb, Hsb, Srgb};
use crate::error::EngineError;

const SUNRISE: [Hsb; 8] = [
    Hsb::new(35.0, 75.0, 95.0),
    Hsb::new(355.0, 45.0, 90.0),
    Hsb::new(200.0, 35.0, 92.0),
    Hsb::new(165.0, 30.0, 85.0),
    Hsb::new(40.0, 70.0, 98.0),
    Hsb::new(280.0, 30.0, 95.0),
    Hsb::new(60.0, 20.0, 95.0),
    Hsb::new(15.0, 60.0, 90.0),
];

const FOG: [Hsb; 8] = [
    Hsb::new(270.0, 40.0, 25.0),
    Hsb::new(0.0, 65.0, 29.0),
    Hsb::new(200.0, 40.0, 36.0),
    Hsb::new(160.0, 50.0, 18.0),
    Hsb::new(0.0, 0.0, 24.0),
    Hsb::new(230.0, 30.0, 18.0),
    Hsb::new(210.0, 20.0, 28.0),
    Hsb::new(280.0, 35.0, 22.0),
];

const MARBLE: [Hsb; 6] = [
    Hsb::new(60.0, 8.0, 96.0),
    Hsb::new(0.0, 0.0, 83.0),
    Hsb::new(214.0, 15.0, 87.0),
    Hsb::new(40.0, 12.0, 75.0),
    Hsb::new(0.0, 0.0, 75.0),
    Hsb::new(180.0, 7.0, 94.0),
];

const PALETTE_NAMES: &[&str] = &["sunrise", "fog", "marble"];

/// An ordered, non-empty list of colors addressed by index.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Srgb>,
}

impl Palette {
    /// Creates a palette from resolved colors. Requires at least one color.
    pub fn new(colors: Vec<Srgb>) -> Result<Self, EngineError> {
        if colors.is_empty() {
            return Err(EngineError::InvalidPalette(
                "palette requires at least 1 color".to_string(),
            ));
        }
        Ok(Self { colors })
    }

    /// Creates a palette from HSB stops.
    pub fn from_hsb(stops: &[Hsb]) -> Result<Self, EngineError> {
        Self::new(stops.iter().copied().map(hsb_to_srgb).collect())
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false for a constructed palette.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Srgb] {
        &self.colors
    }

    /// Resolves `index`, wrapping modulo the palette length.
    pub fn color(&self, index: usize) -> Srgb {
        self.colors[index % self.colors.len()]
    }

    // -- Built-in palettes --

    /// Bright, warm dawn colors used for positive sentiment.
    pub fn sunrise() -> Self {
        Self::from_hsb(&SUNRISE).expect("sunrise palette is non-empty")
    }

    /// Deep, dark, desaturated colors used for negative sentiment.
    pub fn fog() -> Self {
        Self::from_hsb(&FOG).expect("fog palette is non-empty")
    }

    /// Soft near-whites used for neutral or absent sentiment.
    pub fn marble() -> Self {
        Self::from_hsb(&MARBLE).expect("marble palette is non-empty")
    }

    /// Looks up a built-in palette by name.
    pub fn from_name(name: &str) -> Result<Self, EngineError> {
        match name {
            "sunrise" => Ok(Self::sunrise()),
            "fog" => Ok(Self::fog()),
            "marble" => Ok(Self::marble()),
            other => Err(EngineError::InvalidPalette(format!(
                "unknown palette '{other}', expected one of: {}",
                PALETTE_NAMES.join(", ")
            ))),
        }
    }

    /// Names accepted by [`Palette::from_name`].
    pub fn list_names() -> &'static [&'static str] {
        PALETTE_NAMES
    }
}
