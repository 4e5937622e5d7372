//! Draw descriptors and the [`Renderer`] seam.
//!
//! The simulation never touches pixels. Each frame it issues one
//! [`BackgroundFill`] followed by one [`DrawDescriptor`] per particle, in pool
//! order; a renderer owns every transform and paint decision after that.

use serde::{Deserialize, Serialize};

use crate::color::Srgb;

/// Geometric primitive a particle is drawn as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    /// Stroke from the previous position to the current one.
    Line,
    Circle,
    /// Elongated along the heading (1.5 × size by 0.7 × size).
    Ellipse,
    /// Pointing along the heading.
    Triangle,
    /// Oriented along the heading (size by 1.5 × size).
    Rect,
    /// Short stroke covering the last 30% of the trail segment.
    Dash,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 6] = [
        ShapeKind::Line,
        ShapeKind::Circle,
        ShapeKind::Ellipse,
        ShapeKind::Triangle,
        ShapeKind::Rect,
        ShapeKind::Dash,
    ];

    /// Shapes whose appearance depends on `angle`.
    pub fn is_oriented(self) -> bool {
        matches!(self, ShapeKind::Ellipse | ShapeKind::Triangle | ShapeKind::Rect)
    }

    /// Shapes drawn as a segment from the previous position.
    pub fn is_stroke(self) -> bool {
        matches!(self, ShapeKind::Line | ShapeKind::Dash)
    }
}

/// Translucent full-canvas fill issued once per frame before any particle.
///
/// Low `alpha` leaves most of the previous frame visible, which is what
/// produces motion trails.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BackgroundFill {
    pub color: Srgb,
    /// Opacity in [0, 1].
    pub alpha: f64,
}

/// Everything a renderer needs to paint one particle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawDescriptor {
    pub shape: ShapeKind,
    pub x: f64,
    pub y: f64,
    /// Position at the end of the previous frame (equal to `x`/`y` right after a wrap).
    pub prev_x: f64,
    pub prev_y: f64,
    /// Heading in radians, `atan2(vy, vx)`.
    pub angle: f64,
    pub size: f64,
    pub color: Srgb,
    /// Glow blur radius; 0 for particles without glow.
    pub glow_intensity: f64,
}

/// Consumer of per-frame draw output.
pub trait Renderer {
    fn fill_background(&mut self, fill: &BackgroundFill);

    fn draw(&mut self, descriptor: &DrawDescriptor);
}

/// Renderer that records a single frame's output verbatim.
///
/// Each background fill starts a new frame, discarding the previous one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameRecorder {
    pub background: Option<BackgroundFill>,
    pub descriptors: Vec<DrawDescriptor>,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl Renderer for FrameRecorder {
    fn fill_background(&mut self, fill: &BackgroundFill) {
        self.background = Some(*fill);
        self.descriptors.clear();
    }

    fn draw(&mut self, descriptor: &DrawDescriptor) {
        self.descriptors.push(*descriptor);
    }
}
