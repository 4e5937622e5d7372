#![deny(unsafe_code)]
//! Core types and traits for the emotional-aura particle field.
//!
//! Provides the frame-stepped `Engine` trait, the `Renderer` seam with its
//! draw descriptors, color types (`Srgb`, `Hsb`), indexed `Palette`s,
//! seedable noise (`Noise3D`, `PerlinNoise`, `Octaves`), the `Xorshift64`
//! PRNG, the replayable `Seed`, and JSON parameter helpers.

pub mod color;
pub mod draw;
pub mod engine;
pub mod error;
pub mod noise_field;
pub mod palette;
pub mod params;
pub mod prng;
pub mod seed;

pub use color::{Hsb, Srgb};
pub use draw::{BackgroundFill, DrawDescriptor, FrameRecorder, Renderer, ShapeKind};
pub use engine::Engine;
pub use error::EngineError;
pub use noise_field::{Noise3D, Octaves, PerlinNoise};
pub use palette::Palette;
pub use prng::Xorshift64;
pub use seed::{ScheduledInput, Seed};
