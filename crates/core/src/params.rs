//! Typed extraction from a `serde_json::Value` params object.
//!
//! Every helper falls back to its default when the key is missing or has the
//! wrong type. None of them fail.

use serde_json::Value;

/// Extracts an `f64` from `params[name]` (integers accepted), clamped to
/// `[min, max]`.
///
/// The default itself is not clamped, so callers can detect out-of-range
/// defaults in tests.
pub fn param_f64_in(params: &Value, name: &str, default: f64, min: f64, max: f64) -> f64 {
    params
        .get(name)
        .and_then(Value::as_f64)
        .map(|v| v.clamp(min, max))
        .unwrap_or(default)
}

/// Extracts an optional non-negative integer: `null` or a missing key gives `None`.
pub fn param_opt_usize(params: &Value, name: &str) -> Option<usize> {
    params.get(name).and_then(Value::as_u64).map(|v| v as usize)
}
