//! Per-frame grid of flow vectors sampled from layered noise.
//!
//! The grid is row-major, `columns × rows`, with cells `resolution` canvas
//! units wide. It is rebuilt from scratch every frame (the noise is
//! time-varying) but reuses its allocation across rebuilds and resizes.

use aura_core::{Noise3D, Octaves};
use glam::DVec2;

use crate::mapper::ParameterBundle;

/// Magnitude of every flow vector.
pub const FLOW_MAGNITUDE: f64 = 0.5;

#[derive(Debug, Clone, Default)]
pub struct FlowField {
    columns: usize,
    rows: usize,
    resolution: f64,
    vectors: Vec<DVec2>,
}

impl FlowField {
    /// An empty field; every lookup misses until the first rebuild.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    pub fn vectors(&self) -> &[DVec2] {
        &self.vectors
    }

    /// Rebuilds the grid for a `width × height` canvas at `time_offset`.
    ///
    /// Cell `(x, y)` samples the bundle's layered noise at
    /// `(x · scale, y · scale, time_offset)` and stores a vector of length
    /// [`FLOW_MAGNITUDE`] at angle `sample · 2π · flow · keyword_complexity`.
    /// A canvas smaller than one cell yields an empty grid.
    pub fn rebuild(
        &mut self,
        width: f64,
        height: f64,
        bundle: &ParameterBundle,
        noise: &dyn Noise3D,
        time_offset: f64,
    ) {
        let resolution = bundle.noise.resolution;
        self.resolution = resolution;
        self.columns = cells_along(width, resolution);
        self.rows = cells_along(height, resolution);
        self.vectors.clear();

        let octaves = Octaves::new(noise, bundle.noise.octaves, bundle.noise.persistence);
        let layered = &octaves;
        let scale = bundle.noise.scale;
        let angle_scale = bundle.flow_angle_scale();
        let (columns, rows) = (self.columns, self.rows);

        self.vectors.reserve(columns * rows);
        self.vectors.extend((0..rows).flat_map(move |y| {
            (0..columns).map(move |x| {
                let n = layered.sample(x as f64 * scale, y as f64 * scale, time_offset);
                let angle = n * angle_scale;
                DVec2::new(angle.cos(), angle.sin()) * FLOW_MAGNITUDE
            })
        }));
    }

    /// Flat index of the cell containing `position`, if it lies on the grid.
    ///
    /// Positions exactly on the far edge (or in the partial strip beyond
    /// the last full cell) are off-grid.
    pub fn cell_index(&self, position: DVec2) -> Option<usize> {
        if self.resolution <= 0.0 || !position.is_finite() {
            return None;
        }
        let cx = (position.x / self.resolution).floor();
        let cy = (position.y / self.resolution).floor();
        if cx < 0.0 || cy < 0.0 {
            return None;
        }
        let (cx, cy) = (cx as usize, cy as usize);
        if cx >= self.columns || cy >= self.rows {
            return None;
        }
        Some(cx + cy * self.columns)
    }

    /// Flow vector at `position`, or `None` off-grid.
    pub fn lookup(&self, position: DVec2) -> Option<DVec2> {
        self.cell_index(position).map(|i| self.vectors[i])
    }
}

fn cells_along(extent: f64, resolution: f64) -> usize {
    if !extent.is_finite() || !resolution.is_finite() || extent <= 0.0 || resolution <= 0.0 {
        return 0;
    }
    (extent / resolution).floor() as usize
}
