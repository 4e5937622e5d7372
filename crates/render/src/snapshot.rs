//! PNG output of a [`RasterCanvas`].
//!
//! Feature-gated behind `png` (default on) so embedders that only need the
//! in-memory RGBA buffer don't pull in the `image` crate.

use aura_core::EngineError;
use std::path::Path;

use crate::raster::RasterCanvas;

/// Writes the canvas as an RGBA PNG.
///
/// Returns `EngineError::InvalidDimensions` if the canvas dimensions overflow
/// `u32`, or `EngineError::Io` on write failure.
pub fn write_png(canvas: &RasterCanvas, path: &Path) -> Result<(), EngineError> {
    let w = u32::try_from(canvas.width()).map_err(|_| EngineError::InvalidDimensions)?;
    let h = u32::try_from(canvas.height()).map_err(|_| EngineError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, canvas.to_rgba())
        .ok_or_else(|| EngineError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| EngineError::Io(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use aura_core::{BackgroundFill, Renderer, Srgb};

    #[test]
    fn write_png_round_trip() {
        let mut canvas = RasterCanvas::new(16, 12).unwrap();
        canvas.fill_background(&BackgroundFill {
            color: Srgb::from_rgb8(200, 100, 50),
            alpha: 1.0,
        });
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aura.png");

        write_png(&canvas, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.width(), 16);
        assert_eq!(img.height(), 12);
        assert_eq!(img.get_pixel(3, 3).0, [200, 100, 50, 255]);
    }

    #[test]
    fn unwritable_path_is_io_error() {
        let canvas = RasterCanvas::new(2, 2).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("aura.png");
        assert!(matches!(write_png(&canvas, &path), Err(EngineError::Io(_))));
    }
}
