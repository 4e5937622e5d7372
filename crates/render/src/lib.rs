#![deny(unsafe_code)]
//! CPU renderer for aura draw output.
//!
//! [`RasterCanvas`] implements [`aura_core::Renderer`] and keeps pixels
//! between frames so translucent background fills leave motion trails.
//! With the `png` feature (default), [`snapshot::write_png`] saves a canvas.

pub mod raster;
#[cfg(feature = "png")]
pub mod snapshot;

pub use raster::RasterCanvas;
