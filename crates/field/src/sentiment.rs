//! Sentiment input: sanitizing, zoning, and the vortex-regeneration trigger.
//!
//! A sentiment is `Option<f64>`: `None` is "no reading yet" and behaves as
//! neutral; `Some(s)` is a score in [-1, 1].

use aura_core::Palette;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// `|s|` at or below this is neutral.
pub const ZONE_THRESHOLD: f64 = 0.2;

/// A same-sign change larger than this regenerates the vortices.
pub const JUMP_THRESHOLD: f64 = 0.3;

/// Emotional zone of a sentiment reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Negative,
    Neutral,
    Positive,
}

impl Zone {
    pub fn of(sentiment: Option<f64>) -> Zone {
        match sentiment {
            Some(s) if s > ZONE_THRESHOLD => Zone::Positive,
            Some(s) if s < -ZONE_THRESHOLD => Zone::Negative,
            _ => Zone::Neutral,
        }
    }

    /// The palette particles are colored from while this zone is active.
    pub fn palette(self) -> Palette {
        match self {
            Zone::Positive => Palette::sunrise(),
            Zone::Negative => Palette::fog(),
            Zone::Neutral => Palette::marble(),
        }
    }

    pub fn palette_name(self) -> &'static str {
        match self {
            Zone::Positive => "sunrise",
            Zone::Negative => "fog",
            Zone::Neutral => "marble",
        }
    }
}

/// Cleans a raw producer value: non-finite becomes `None`, finite values are
/// clamped to [-1, 1].
pub fn sanitize(raw: Option<f64>) -> Option<f64> {
    match raw {
        None => None,
        Some(v) if !v.is_finite() => {
            warn!(value = %v, "non-finite sentiment treated as absent");
            None
        }
        Some(v) if !(-1.0..=1.0).contains(&v) => {
            warn!(value = v, "sentiment outside [-1, 1] clamped");
            Some(v.clamp(-1.0, 1.0))
        }
        Some(v) => Some(v),
    }
}

/// Whether moving from `previous` to `current` should re-roll the vortices.
///
/// Fires on a transition between absent and present, a sign change (zero is
/// its own sign), or a jump larger than [`JUMP_THRESHOLD`].
pub fn regeneration_needed(previous: Option<f64>, current: Option<f64>) -> bool {
    match (previous, current) {
        (None, None) => false,
        (None, Some(_)) | (Some(_), None) => true,
        (Some(prev), Some(cur)) => {
            sign(prev) != sign(cur) || (prev - cur).abs() > JUMP_THRESHOLD
        }
    }
}

/// Three-way sign: -1, 0, or 1.
fn sign(v: f64) -> i8 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}
