//! The frame-stepped `Engine` trait.
//!
//! The trait is object-safe so hosts can drive `dyn Engine` from whatever
//! display-refresh callback they own.

use crate::draw::Renderer;
use crate::error::EngineError;
use serde_json::Value;

/// A frame-stepped generative simulation.
///
/// One call to [`Engine::step`] runs a whole simulation + draw step to
/// completion and hands its output to `renderer`; hosts yield between calls,
/// never inside one.
pub trait Engine {
    /// Advances one frame and emits its draw output.
    fn step(&mut self, renderer: &mut dyn Renderer) -> Result<(), EngineError>;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing the parameters: types, ranges, and defaults.
    fn param_schema(&self) -> Value;
}

/// Steps `engine` `frames` times against `renderer`, stopping at the first error.
pub fn run_frames(
    engine: &mut dyn Engine,
    renderer: &mut dyn Renderer,
    frames: usize,
) -> Result<(), EngineError> {
    (0..frames).try_for_each(|_| engine.step(renderer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Srgb;
    use crate::draw::{BackgroundFill, FrameRecorder};
    use serde_json::json;

    struct CountingEngine {
        frames: usize,
        limit: usize,
    }

    impl Engine for CountingEngine {
        fn step(&mut self, renderer: &mut dyn Renderer) -> Result<(), EngineError> {
            if self.frames == self.limit {
                return Err(EngineError::Stopped);
            }
            self.frames += 1;
            renderer.fill_background(&BackgroundFill {
                color: Srgb::from_rgb8(0, 0, 0),
                alpha: 1.0,
            });
            Ok(())
        }

        fn params(&self) -> Value {
            json!({"frames": self.frames})
        }

        fn param_schema(&self) -> Value {
            json!({"frames": {"type": "integer", "default": 0}})
        }
    }

    #[test]
    fn engine_trait_is_object_safe() {
        let mut engine: Box<dyn Engine> = Box::new(CountingEngine { frames: 0, limit: 10 });
        let mut rec = FrameRecorder::new();
        engine.step(&mut rec).unwrap();
        assert_eq!(engine.params()["frames"], 1);
        assert!(rec.background.is_some());
    }

    #[test]
    fn run_frames_steps_requested_count() {
        let mut engine = CountingEngine { frames: 0, limit: 10 };
        run_frames(&mut engine, &mut FrameRecorder::new(), 4).unwrap();
        assert_eq!(engine.frames, 4);
    }

    #[test]
    fn run_frames_stops_at_first_error() {
        let mut engine = CountingEngine { frames: 0, limit: 2 };
        let result = run_frames(&mut engine, &mut FrameRecorder::new(), 5);
        assert!(matches!(result, Err(EngineError::Stopped)));
        assert_eq!(engine.frames, 2);
    }

    #[test]
    fn param_schema_has_expected_structure() {
        let engine = CountingEngine { frames: 0, limit: 1 };
        assert_eq!(engine.param_schema()["frames"]["type"], "integer");
    }
}
