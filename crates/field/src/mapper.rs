//! Sentiment → visual parameter mapping.
//!
//! Continuous scalars (particle count, time speed, flow and glow intensity)
//! interpolate linearly from their neutral value toward the positive or
//! negative extreme, with `|s|` as the factor, so they move smoothly as the
//! reading drifts. Categorical choices (palette, noise character, particle
//! sizes, glow ratio, background tint, shape mix) switch by [`Zone`].

use std::f64::consts::TAU;

use aura_core::{BackgroundFill, ShapeKind, Srgb};
use serde::Serialize;

use crate::sentiment::Zone;

/// Particle target with no sentiment.
pub const NEUTRAL_PARTICLE_COUNT: usize = 500;
/// Particle target floor, reached at `s = -1`.
pub const MIN_PARTICLE_COUNT: usize = 400;
/// Particle target cap, reached at `s = 1`.
pub const MAX_PARTICLE_COUNT: usize = 800;

/// Flow-angle multiplier added per keyword.
pub const KEYWORD_WEIGHT: f64 = 0.08;

/// A scalar with a neutral value and an extreme on each side.
#[derive(Debug, Clone, Copy)]
struct Span {
    negative: f64,
    neutral: f64,
    positive: f64,
}

impl Span {
    fn at(&self, sentiment: Option<f64>) -> f64 {
        match sentiment {
            Some(s) if s > 0.0 => self.neutral + s * (self.positive - self.neutral),
            Some(s) if s < 0.0 => self.neutral - s * (self.negative - self.neutral),
            _ => self.neutral,
        }
    }
}

const PARTICLE_COUNT: Span = Span {
    negative: MIN_PARTICLE_COUNT as f64,
    neutral: NEUTRAL_PARTICLE_COUNT as f64,
    positive: MAX_PARTICLE_COUNT as f64,
};

const TIME_SPEED: Span = Span {
    negative: 0.0008,
    neutral: 0.002,
    positive: 0.006,
};

const FLOW_INTENSITY: Span = Span {
    negative: 0.5,
    neutral: 1.2,
    positive: 2.5,
};

const GLOW_INTENSITY: Span = Span {
    negative: 2.0,
    neutral: 5.0,
    positive: 25.0,
};

/// Trail alpha (0–255 scale) for strong, absent, and weak emotion.
const TRAIL_ALPHA_STRONG: f64 = 1.0;
const TRAIL_ALPHA_NEUTRAL: f64 = 2.0;
const TRAIL_ALPHA_WEAK: f64 = 4.0;
const WEAK_INTENSITY: f64 = 0.3;
const STRONG_INTENSITY: f64 = 0.7;

/// Noise character for flow-field construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NoiseParams {
    /// Noise-space step per grid cell.
    pub scale: f64,
    pub octaves: u32,
    pub persistence: f64,
    /// Grid cell size in canvas units.
    pub resolution: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SizeRange {
    pub min: f64,
    pub max: f64,
}

/// Weighted distribution of spawn shapes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ShapeMix {
    weights: &'static [(ShapeKind, f64)],
}

impl ShapeMix {
    /// Picks a shape for a uniform roll in [0, 1).
    pub fn pick(&self, roll: f64) -> ShapeKind {
        let mut acc = 0.0;
        for &(shape, weight) in self.weights {
            acc += weight;
            if roll < acc {
                return shape;
            }
        }
        self.weights
            .last()
            .map(|&(shape, _)| shape)
            .unwrap_or(ShapeKind::Line)
    }

    pub fn weights(&self) -> &'static [(ShapeKind, f64)] {
        self.weights
    }
}

const NO_READING_SHAPES: ShapeMix = ShapeMix {
    weights: &[(ShapeKind::Line, 0.7), (ShapeKind::Circle, 0.3)],
};

const NEUTRAL_SHAPES: ShapeMix = ShapeMix {
    weights: &[(ShapeKind::Line, 1.0)],
};

const POSITIVE_SHAPES: ShapeMix = ShapeMix {
    weights: &[
        (ShapeKind::Circle, 0.4),
        (ShapeKind::Ellipse, 0.3),
        (ShapeKind::Line, 0.2),
        (ShapeKind::Rect, 0.1),
    ],
};

const NEGATIVE_SHAPES: ShapeMix = ShapeMix {
    weights: &[
        (ShapeKind::Triangle, 0.4),
        (ShapeKind::Line, 0.3),
        (ShapeKind::Rect, 0.15),
        (ShapeKind::Dash, 0.15),
    ],
};

/// Per-zone categorical settings.
struct ZoneStyle {
    noise: NoiseParams,
    size_range: SizeRange,
    glow_ratio: f64,
    background: [u8; 3],
}

const POSITIVE_STYLE: ZoneStyle = ZoneStyle {
    noise: NoiseParams {
        scale: 0.005,
        octaves: 3,
        persistence: 0.4,
        resolution: 16.0,
    },
    size_range: SizeRange { min: 5.0, max: 12.0 },
    glow_ratio: 0.5,
    background: [15, 12, 8],
};

const NEUTRAL_STYLE: ZoneStyle = ZoneStyle {
    noise: NoiseParams {
        scale: 0.006,
        octaves: 4,
        persistence: 0.5,
        resolution: 18.0,
    },
    size_range: SizeRange { min: 2.0, max: 5.0 },
    glow_ratio: 0.2,
    background: [12, 12, 15],
};

const NEGATIVE_STYLE: ZoneStyle = ZoneStyle {
    noise: NoiseParams {
        scale: 0.008,
        octaves: 5,
        persistence: 0.7,
        resolution: 22.0,
    },
    size_range: SizeRange { min: 3.0, max: 9.0 },
    glow_ratio: 0.1,
    background: [5, 5, 10],
};

/// Every tunable derived for one frame. Pure function of its inputs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterBundle {
    pub sentiment: Option<f64>,
    pub zone: Zone,
    pub particle_count_target: usize,
    /// Background repaint opacity on a 0–255 scale; lower keeps trails longer.
    pub trail_alpha: f64,
    /// Noise time advanced per frame.
    pub time_speed: f64,
    pub flow_intensity: f64,
    /// Glow blur radius for glowing particles.
    pub glow_intensity: f64,
    pub noise: NoiseParams,
    pub size_range: SizeRange,
    /// Fraction of newly spawned particles that glow.
    pub glow_ratio: f64,
    pub keyword_complexity: f64,
    pub background: Srgb,
    pub shape_mix: ShapeMix,
}

impl ParameterBundle {
    /// Radians of flow rotation per unit of noise: `2π · flow · keywords`.
    pub fn flow_angle_scale(&self) -> f64 {
        TAU * self.flow_intensity * self.keyword_complexity
    }

    pub fn background_fill(&self) -> BackgroundFill {
        BackgroundFill {
            color: self.background,
            alpha: (self.trail_alpha / 255.0).clamp(0.0, 1.0),
        }
    }

    pub fn palette_name(&self) -> &'static str {
        self.zone.palette_name()
    }
}

/// Maps a sanitized sentiment and keyword count to the frame's parameters.
pub fn map(sentiment: Option<f64>, keyword_count: usize) -> ParameterBundle {
    let zone = Zone::of(sentiment);
    let style = match zone {
        Zone::Positive => &POSITIVE_STYLE,
        Zone::Negative => &NEGATIVE_STYLE,
        Zone::Neutral => &NEUTRAL_STYLE,
    };
    let shape_mix = match (sentiment, zone) {
        (None, _) => NO_READING_SHAPES,
        (Some(_), Zone::Positive) => POSITIVE_SHAPES,
        (Some(_), Zone::Negative) => NEGATIVE_SHAPES,
        (Some(_), Zone::Neutral) => NEUTRAL_SHAPES,
    };
    let [r, g, b] = style.background;

    ParameterBundle {
        sentiment,
        zone,
        particle_count_target: particle_count_target(sentiment),
        trail_alpha: trail_alpha(sentiment),
        time_speed: TIME_SPEED.at(sentiment),
        flow_intensity: FLOW_INTENSITY.at(sentiment),
        glow_intensity: GLOW_INTENSITY.at(sentiment),
        noise: style.noise,
        size_range: style.size_range,
        glow_ratio: style.glow_ratio,
        keyword_complexity: keyword_complexity(keyword_count),
        background: Srgb::from_rgb8(r, g, b),
        shape_mix,
    }
}

/// Pool size the animator converges toward, in [400, 800].
pub fn particle_count_target(sentiment: Option<f64>) -> usize {
    (PARTICLE_COUNT.at(sentiment).floor() as usize).clamp(MIN_PARTICLE_COUNT, MAX_PARTICLE_COUNT)
}

/// `1 + 0.08 · keywords`.
pub fn keyword_complexity(keyword_count: usize) -> f64 {
    1.0 + keyword_count as f64 * KEYWORD_WEIGHT
}

/// Strong emotion keeps long trails (alpha 1), weak emotion fades fast
/// (alpha 4), with a linear ramp between intensities 0.3 and 0.7.
fn trail_alpha(sentiment: Option<f64>) -> f64 {
    let Some(s) = sentiment else {
        return TRAIL_ALPHA_NEUTRAL;
    };
    let intensity = s.abs();
    if intensity > STRONG_INTENSITY {
        TRAIL_ALPHA_STRONG
    } else if intensity < WEAK_INTENSITY {
        TRAIL_ALPHA_WEAK
    } else {
        let t = (intensity - WEAK_INTENSITY) / (STRONG_INTENSITY - WEAK_INTENSITY);
        TRAIL_ALPHA_WEAK + t * (TRAIL_ALPHA_STRONG - TRAIL_ALPHA_WEAK)
    }
}
