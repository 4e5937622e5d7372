//! Error types for the aura core.

use thiserror::Error;

/// Errors produced by aura construction, replay, and output operations.
///
/// The per-frame simulation itself never fails on bad input: malformed
/// sentiment or viewport values degrade to safe defaults instead. These
/// variants cover construction-time validation and I/O.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Width or height was zero (or not finite) where a drawable surface is required.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A palette could not be constructed from the given colors.
    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    /// A replay schedule was malformed (e.g. entries out of frame order).
    #[error("invalid schedule: {0}")]
    InvalidSchedule(String),

    /// Writing an output artifact failed.
    #[error("io error: {0}")]
    Io(String),

    /// A frame was requested after the animator was torn down.
    #[error("animator has been torn down")]
    Stopped,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dimensions_displays_readable_message() {
        let msg = EngineError::InvalidDimensions.to_string();
        assert!(
            msg.contains("width") && msg.contains("height"),
            "expected message mentioning width and height, got: {msg}"
        );
    }

    #[test]
    fn invalid_color_includes_message() {
        let msg = EngineError::InvalidColor("bad hex".into()).to_string();
        assert!(msg.contains("bad hex"), "missing message in: {msg}");
    }

    #[test]
    fn invalid_palette_includes_message() {
        let msg = EngineError::InvalidPalette("empty".into()).to_string();
        assert!(msg.contains("empty"), "missing message in: {msg}");
    }

    #[test]
    fn invalid_schedule_includes_message() {
        let msg = EngineError::InvalidSchedule("frame 3 after frame 9".into()).to_string();
        assert!(msg.contains("frame 3"), "missing message in: {msg}");
    }

    #[test]
    fn io_includes_message() {
        let msg = EngineError::Io("disk full".into()).to_string();
        assert!(msg.contains("disk full"), "missing message in: {msg}");
    }

    #[test]
    fn stopped_mentions_teardown() {
        assert!(EngineError::Stopped.to_string().contains("torn down"));
    }

    #[test]
    fn engine_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EngineError>();
    }
}
