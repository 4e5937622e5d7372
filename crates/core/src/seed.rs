//! Reproducible specification for an aura run.
//!
//! A [`Seed`] captures the viewport, PRNG seed, frame count, parameter
//! overrides, and the timeline of sentiment/keyword updates. Replaying the
//! same `Seed` through the same binary produces bit-identical frames.

use crate::error::EngineError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One external input update, applied at the start of `frame`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduledInput {
    pub frame: usize,
    /// `None` means "no sentiment" (neutral). Non-numeric JSON deserializes as `None`.
    #[serde(default, deserialize_with = "lenient_sentiment")]
    pub sentiment: Option<f64>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Reproducible specification for an aura run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Seed {
    pub width: usize,
    pub height: usize,
    pub seed: u64,
    #[serde(default)]
    pub frames: usize,
    #[serde(default = "empty_params")]
    pub params: Value,
    #[serde(default)]
    pub schedule: Vec<ScheduledInput>,
}

impl Seed {
    /// Creates a seed with empty params, zero frames, and no schedule.
    pub fn new(width: usize, height: usize, seed: u64) -> Self {
        Self {
            width,
            height,
            seed,
            frames: 0,
            params: empty_params(),
            schedule: Vec::new(),
        }
    }

    /// Checks for non-zero, non-overflowing dimensions and a schedule sorted by frame.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.width == 0 || self.height == 0 {
            return Err(EngineError::InvalidDimensions);
        }
        self.width
            .checked_mul(self.height)
            .ok_or(EngineError::InvalidDimensions)?;
        if let Some(pair) = self
            .schedule
            .windows(2)
            .find(|pair| pair[1].frame < pair[0].frame)
        {
            return Err(EngineError::InvalidSchedule(format!(
                "entry for frame {} follows frame {}",
                pair[1].frame, pair[0].frame
            )));
        }
        Ok(())
    }

    /// Schedule entries that apply at the start of `frame`, in file order.
    pub fn updates_at(&self, frame: usize) -> impl Iterator<Item = &ScheduledInput> {
        self.schedule.iter().filter(move |entry| entry.frame == frame)
    }
}

fn empty_params() -> Value {
    Value::Object(serde_json::Map::new())
}

/// Accepts any JSON value; only finite numbers become `Some`.
fn lenient_sentiment<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_f64().filter(|v| v.is_finite()))
}
