//! Scalar noise over (x, y, t) in [0, 1).
//!
//! The flow field turns each sample into an angle, so the contract here is a
//! bounded, deterministic, seedable scalar: same seed and inputs, same bits.
//! [`PerlinNoise`] wraps `noise::Perlin`; [`Octaves`] layers any source at
//! doubling frequencies with geometric amplitude falloff.

use noise::{NoiseFn, Perlin};

/// Largest value strictly below 1.0; samples are clamped to it.
const UNIT_CEIL: f64 = 1.0 - f64::EPSILON;

/// Frequency multiplier between successive octaves.
const LACUNARITY: f64 = 2.0;

/// A deterministic scalar field sampled at (x, y, z).
///
/// Implementations must return values in [0, 1) for every finite input.
pub trait Noise3D: Send + Sync {
    fn sample(&self, x: f64, y: f64, z: f64) -> f64;
}

/// Seeded Perlin noise remapped from [-1, 1] to [0, 1).
#[derive(Clone)]
pub struct PerlinNoise {
    noise: Perlin,
}

impl PerlinNoise {
    pub fn new(seed: u32) -> Self {
        Self {
            noise: Perlin::new(seed),
        }
    }
}

impl Noise3D for PerlinNoise {
    fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        to_unit(self.noise.get([x, y, z]))
    }
}

/// Fractal layering of a base source.
///
/// Octave `i` samples the base at frequency `2^i` with weight
/// `persistence^i`; the result is the weighted mean, so it stays in [0, 1).
pub struct Octaves<'a, N: Noise3D + ?Sized> {
    base: &'a N,
    octaves: u32,
    persistence: f64,
}

impl<'a, N: Noise3D + ?Sized> Octaves<'a, N> {
    /// Layers `base` with `octaves` levels (at least 1).
    pub fn new(base: &'a N, octaves: u32, persistence: f64) -> Self {
        Self {
            base,
            octaves: octaves.max(1),
            persistence: persistence.clamp(0.0, 1.0),
        }
    }
}

impl<N: Noise3D + ?Sized> Noise3D for Octaves<'_, N> {
    fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        let (total, weight, _, _) = (0..self.octaves).fold(
            (0.0, 0.0, 1.0, 1.0),
            |(total, weight, amp, freq), _| {
                (
                    total + self.base.sample(x * freq, y * freq, z * freq) * amp,
                    weight + amp,
                    amp * self.persistence,
                    freq * LACUNARITY,
                )
            },
        );
        if weight <= 0.0 {
            return 0.0;
        }
        (total / weight).clamp(0.0, UNIT_CEIL)
    }
}

/// Maps a signed noise value to [0, 1). Non-finite input maps to 0.5.
fn to_unit(v: f64) -> f64 {
    if !v.is_finite() {
        return 0.5;
    }
    ((v + 1.0) * 0.5).clamp(0.0, UNIT_CEIL)
}
