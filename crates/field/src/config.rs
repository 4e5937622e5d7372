//! Run configuration: viewport, seed, and particle dynamics constants.
//!
//! Everything is overridable from a JSON params object; missing or mistyped
//! keys fall back to the defaults below.

use aura_core::params::{param_f64_in, param_opt_usize};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Particle speed limit with zero stability.
const DEFAULT_BASE_SPEED: f64 = 2.0;
/// Distance to the nearest vortex inside which a particle settles.
const DEFAULT_STABILITY_RADIUS: f64 = 80.0;
/// Stability gained per frame inside the radius.
const DEFAULT_STABILITY_GAIN: f64 = 0.01;
/// Stability lost per frame outside the radius.
const DEFAULT_STABILITY_DECAY: f64 = 0.005;
/// Stability above which a particle counts as having reached its vortex.
const DEFAULT_SETTLE_THRESHOLD: f64 = 0.7;
/// Stability at or above which vortex forces switch off.
const DEFAULT_ORBIT_CUTOFF: f64 = 0.8;
/// Distance below which vortex forces are skipped.
const DEFAULT_SINGULARITY_RADIUS: f64 = 5.0;
/// Weight of the flow field on an unsettled particle.
const DEFAULT_FLOW_WEIGHT: f64 = 0.7;
/// Tangential force per unit of rotation × distance.
const DEFAULT_TANGENTIAL_GAIN: f64 = 0.05;
/// Radial force per unit of strength.
const DEFAULT_RADIAL_GAIN: f64 = 0.5;

/// Constants of the per-particle force model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dynamics {
    pub base_speed: f64,
    pub stability_radius: f64,
    pub stability_gain: f64,
    pub stability_decay: f64,
    pub settle_threshold: f64,
    pub orbit_cutoff: f64,
    pub singularity_radius: f64,
    pub flow_weight: f64,
    pub tangential_gain: f64,
    pub radial_gain: f64,
}

impl Default for Dynamics {
    fn default() -> Self {
        Self {
            base_speed: DEFAULT_BASE_SPEED,
            stability_radius: DEFAULT_STABILITY_RADIUS,
            stability_gain: DEFAULT_STABILITY_GAIN,
            stability_decay: DEFAULT_STABILITY_DECAY,
            settle_threshold: DEFAULT_SETTLE_THRESHOLD,
            orbit_cutoff: DEFAULT_ORBIT_CUTOFF,
            singularity_radius: DEFAULT_SINGULARITY_RADIUS,
            flow_weight: DEFAULT_FLOW_WEIGHT,
            tangential_gain: DEFAULT_TANGENTIAL_GAIN,
            radial_gain: DEFAULT_RADIAL_GAIN,
        }
    }
}

/// Accepted `(min, max)` for each dynamics value.
const BASE_SPEED_RANGE: (f64, f64) = (0.01, 100.0);
const STABILITY_RADIUS_RANGE: (f64, f64) = (0.0, 10_000.0);
const UNIT_RANGE: (f64, f64) = (0.0, 1.0);
const SINGULARITY_RADIUS_RANGE: (f64, f64) = (0.0, 1_000.0);
const GAIN_RANGE: (f64, f64) = (0.0, 10.0);

/// Clamps `value` into `range`; non-finite values become `default`.
fn bounded(value: f64, default: f64, (min, max): (f64, f64)) -> f64 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        default
    }
}

impl Dynamics {
    /// Extracts dynamics from JSON, clamping each value to a usable range.
    ///
    /// `base_speed` is kept strictly positive so the speed limit never
    /// collapses to zero.
    pub fn from_json(params: &Value) -> Self {
        let get = |key: &str, default: f64, (min, max): (f64, f64)| {
            param_f64_in(params, key, default, min, max)
        };
        Self {
            base_speed: get("base_speed", DEFAULT_BASE_SPEED, BASE_SPEED_RANGE),
            stability_radius: get(
                "stability_radius",
                DEFAULT_STABILITY_RADIUS,
                STABILITY_RADIUS_RANGE,
            ),
            stability_gain: get("stability_gain", DEFAULT_STABILITY_GAIN, UNIT_RANGE),
            stability_decay: get("stability_decay", DEFAULT_STABILITY_DECAY, UNIT_RANGE),
            settle_threshold: get("settle_threshold", DEFAULT_SETTLE_THRESHOLD, UNIT_RANGE),
            orbit_cutoff: get("orbit_cutoff", DEFAULT_ORBIT_CUTOFF, UNIT_RANGE),
            singularity_radius: get(
                "singularity_radius",
                DEFAULT_SINGULARITY_RADIUS,
                SINGULARITY_RADIUS_RANGE,
            ),
            flow_weight: get("flow_weight", DEFAULT_FLOW_WEIGHT, GAIN_RANGE),
            tangential_gain: get("tangential_gain", DEFAULT_TANGENTIAL_GAIN, GAIN_RANGE),
            radial_gain: get("radial_gain", DEFAULT_RADIAL_GAIN, GAIN_RANGE),
        }
    }

    /// The same clamping as [`Dynamics::from_json`], applied to values set in code.
    pub fn clamped(self) -> Self {
        Self {
            base_speed: bounded(self.base_speed, DEFAULT_BASE_SPEED, BASE_SPEED_RANGE),
            stability_radius: bounded(
                self.stability_radius,
                DEFAULT_STABILITY_RADIUS,
                STABILITY_RADIUS_RANGE,
            ),
            stability_gain: bounded(self.stability_gain, DEFAULT_STABILITY_GAIN, UNIT_RANGE),
            stability_decay: bounded(self.stability_decay, DEFAULT_STABILITY_DECAY, UNIT_RANGE),
            settle_threshold: bounded(self.settle_threshold, DEFAULT_SETTLE_THRESHOLD, UNIT_RANGE),
            orbit_cutoff: bounded(self.orbit_cutoff, DEFAULT_ORBIT_CUTOFF, UNIT_RANGE),
            singularity_radius: bounded(
                self.singularity_radius,
                DEFAULT_SINGULARITY_RADIUS,
                SINGULARITY_RADIUS_RANGE,
            ),
            flow_weight: bounded(self.flow_weight, DEFAULT_FLOW_WEIGHT, GAIN_RANGE),
            tangential_gain: bounded(self.tangential_gain, DEFAULT_TANGENTIAL_GAIN, GAIN_RANGE),
            radial_gain: bounded(self.radial_gain, DEFAULT_RADIAL_GAIN, GAIN_RANGE),
        }
    }
}

/// Everything needed to construct an [`Animator`](crate::Animator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuraConfig {
    pub width: f64,
    pub height: f64,
    pub seed: u64,
    pub dynamics: Dynamics,
    /// Upper bound on particles spawned per frame; `None` fills the deficit at once.
    pub max_spawn_per_frame: Option<usize>,
}

impl AuraConfig {
    pub fn new(width: f64, height: f64, seed: u64) -> Self {
        Self {
            width,
            height,
            seed,
            dynamics: Dynamics::default(),
            max_spawn_per_frame: None,
        }
    }

    /// Builds a config from a JSON params object, falling back to defaults.
    pub fn from_json(width: f64, height: f64, seed: u64, params: &Value) -> Self {
        Self {
            width,
            height,
            seed,
            dynamics: Dynamics::from_json(params),
            max_spawn_per_frame: param_opt_usize(params, "max_spawn_per_frame").filter(|&n| n > 0),
        }
    }

    /// Seed for the noise generator (the low 32 bits of the run seed).
    pub fn noise_seed(&self) -> u32 {
        self.seed as u32
    }

    /// Active values as a flat JSON object.
    pub fn params(&self) -> Value {
        let d = &self.dynamics;
        json!({
            "base_speed": d.base_speed,
            "stability_radius": d.stability_radius,
            "stability_gain": d.stability_gain,
            "stability_decay": d.stability_decay,
            "settle_threshold": d.settle_threshold,
            "orbit_cutoff": d.orbit_cutoff,
            "singularity_radius": d.singularity_radius,
            "flow_weight": d.flow_weight,
            "tangential_gain": d.tangential_gain,
            "radial_gain": d.radial_gain,
            "max_spawn_per_frame": self.max_spawn_per_frame,
        })
    }

    pub fn param_schema() -> Value {
        json!({
            "base_speed": {
                "type": "number",
                "default": DEFAULT_BASE_SPEED,
                "min": 0.01,
                "max": 100.0,
                "description": "Particle speed limit at zero stability"
            },
            "stability_radius": {
                "type": "number",
                "default": DEFAULT_STABILITY_RADIUS,
                "min": 0.0,
                "max": 10000.0,
                "description": "Distance to the nearest vortex inside which particles settle"
            },
            "stability_gain": {
                "type": "number",
                "default": DEFAULT_STABILITY_GAIN,
                "min": 0.0,
                "max": 1.0,
                "description": "Stability gained per frame inside the radius"
            },
            "stability_decay": {
                "type": "number",
                "default": DEFAULT_STABILITY_DECAY,
                "min": 0.0,
                "max": 1.0,
                "description": "Stability lost per frame outside the radius"
            },
            "settle_threshold": {
                "type": "number",
                "default": DEFAULT_SETTLE_THRESHOLD,
                "min": 0.0,
                "max": 1.0,
                "description": "Stability above which a particle has reached its vortex"
            },
            "orbit_cutoff": {
                "type": "number",
                "default": DEFAULT_ORBIT_CUTOFF,
                "min": 0.0,
                "max": 1.0,
                "description": "Stability at which vortex forces switch off"
            },
            "singularity_radius": {
                "type": "number",
                "default": DEFAULT_SINGULARITY_RADIUS,
                "min": 0.0,
                "max": 1000.0,
                "description": "Distance below which vortex forces are skipped"
            },
            "flow_weight": {
                "type": "number",
                "default": DEFAULT_FLOW_WEIGHT,
                "min": 0.0,
                "max": 10.0,
                "description": "Flow-field force weight on an unsettled particle"
            },
            "tangential_gain": {
                "type": "number",
                "default": DEFAULT_TANGENTIAL_GAIN,
                "min": 0.0,
                "max": 10.0,
                "description": "Orbiting force per unit rotation and distance"
            },
            "radial_gain": {
                "type": "number",
                "default": DEFAULT_RADIAL_GAIN,
                "min": 0.0,
                "max": 10.0,
                "description": "Inward force per unit vortex strength"
            },
            "max_spawn_per_frame": {
                "type": "integer",
                "default": null,
                "min": 1,
                "description": "Cap on particles spawned per frame (null = unlimited)"
            }
        })
    }
}
