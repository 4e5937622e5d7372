//! Pure-computation rasterizer for draw descriptors.
//!
//! The canvas persists between frames: each background fill only blends
//! toward the tint by its alpha, so earlier frames fade out gradually and
//! leave trails. Shapes are painted opaque with a hard edge, sampled at
//! pixel centers. Glowing particles get a soft radial halo underneath.

use aura_core::{BackgroundFill, DrawDescriptor, EngineError, Renderer, ShapeKind, Srgb};

/// Peak opacity of a glow halo, at the particle center.
const GLOW_ALPHA: f64 = 0.35;
/// Fraction of the trail segment a dash covers, ending at the particle.
const DASH_FRACTION: f64 = 0.3;
/// Dash stroke weight relative to particle size.
const DASH_WEIGHT: f64 = 0.8;

/// An RGB canvas that implements [`Renderer`].
#[derive(Debug, Clone, PartialEq)]
pub struct RasterCanvas {
    width: usize,
    height: usize,
    pixels: Vec<Srgb>,
}

impl RasterCanvas {
    /// A black canvas. Fails on zero or overflowing dimensions.
    pub fn new(width: usize, height: usize) -> Result<Self, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidDimensions);
        }
        let len = width
            .checked_mul(height)
            .ok_or(EngineError::InvalidDimensions)?;
        Ok(Self {
            width,
            height,
            pixels: vec![Srgb::from_rgb8(0, 0, 0); len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Color at `(x, y)`, or `None` out of bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Srgb> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Row-major RGBA8 buffer, `width · height · 4` bytes, alpha always 255.
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|&c| {
                let [r, g, b] = c.to_rgb8();
                [r, g, b, 255u8]
            })
            .collect()
    }

    /// Blends `color` into every pixel whose center satisfies `coverage`
    /// inside the box `[x0, x1] × [y0, y1]`. `coverage` returns opacity.
    fn paint<F>(&mut self, (x0, y0, x1, y1): (f64, f64, f64, f64), color: Srgb, coverage: F)
    where
        F: Fn(f64, f64) -> f64,
    {
        if !(x0.is_finite() && y0.is_finite() && x1.is_finite() && y1.is_finite()) {
            return;
        }
        let clamp_x = |v: f64| (v.floor().max(0.0) as usize).min(self.width);
        let clamp_y = |v: f64| (v.floor().max(0.0) as usize).min(self.height);
        let (cx0, cx1) = (clamp_x(x0), clamp_x(x1 + 1.0));
        let (cy0, cy1) = (clamp_y(y0), clamp_y(y1 + 1.0));
        for py in cy0..cy1 {
            for px in cx0..cx1 {
                let alpha = coverage(px as f64 + 0.5, py as f64 + 0.5);
                if alpha > 0.0 {
                    let i = py * self.width + px;
                    self.pixels[i] = blend(self.pixels[i], color, alpha.min(1.0));
                }
            }
        }
    }

    fn stroke(&mut self, from: (f64, f64), to: (f64, f64), weight: f64, color: Srgb) {
        let r = (weight / 2.0).max(0.5);
        let bounds = (
            from.0.min(to.0) - r,
            from.1.min(to.1) - r,
            from.0.max(to.0) + r,
            from.1.max(to.1) + r,
        );
        self.paint(bounds, color, |x, y| {
            if segment_distance((x, y), from, to) <= r {
                1.0
            } else {
                0.0
            }
        });
    }

    fn glow(&mut self, d: &DrawDescriptor) {
        let radius = d.size / 2.0 + d.glow_intensity;
        let bounds = (d.x - radius, d.y - radius, d.x + radius, d.y + radius);
        self.paint(bounds, d.color, |x, y| {
            let t = (x - d.x).hypot(y - d.y) / radius;
            if t < 1.0 {
                GLOW_ALPHA * (1.0 - t) * (1.0 - t)
            } else {
                0.0
            }
        });
    }

    /// Fills a shape given in particle-local coordinates, rotated by `angle`
    /// for oriented shapes.
    fn fill_local<F>(&mut self, d: &DrawDescriptor, extent: f64, inside: F)
    where
        F: Fn(f64, f64) -> bool,
    {
        let angle = if d.shape.is_oriented() { d.angle } else { 0.0 };
        let (sin, cos) = angle.sin_cos();
        let bounds = (d.x - extent, d.y - extent, d.x + extent, d.y + extent);
        let (cx, cy) = (d.x, d.y);
        self.paint(bounds, d.color, move |x, y| {
            let (dx, dy) = (x - cx, y - cy);
            let lx = dx * cos + dy * sin;
            let ly = -dx * sin + dy * cos;
            if inside(lx, ly) {
                1.0
            } else {
                0.0
            }
        });
    }

    /// Line: the whole trail segment. Dash: its last 30%, slightly thinner.
    fn trail(&mut self, d: &DrawDescriptor) {
        let (fraction, weight) = match d.shape {
            ShapeKind::Dash => (DASH_FRACTION, DASH_WEIGHT),
            _ => (1.0, 1.0),
        };
        let start = (
            d.x - (d.x - d.prev_x) * fraction,
            d.y - (d.y - d.prev_y) * fraction,
        );
        self.stroke(start, (d.x, d.y), d.size * weight, d.color);
    }

    fn fill_shape(&mut self, d: &DrawDescriptor) {
        let s = d.size;
        match d.shape {
            ShapeKind::Circle => {
                let r = (s / 2.0).max(0.5);
                self.fill_local(d, r, |x, y| x * x + y * y <= r * r);
            }
            ShapeKind::Ellipse => {
                let (a, b) = ((s * 0.75).max(0.5), (s * 0.35).max(0.5));
                self.fill_local(d, a, |x, y| (x / a).powi(2) + (y / b).powi(2) <= 1.0);
            }
            ShapeKind::Triangle => {
                let v = [(0.0, -s), (-s * 0.6, s * 0.5), (s * 0.6, s * 0.5)];
                self.fill_local(d, s, move |x, y| in_triangle((x, y), v));
            }
            ShapeKind::Rect => {
                let extent = s * 1.5;
                self.fill_local(d, extent, |x, y| {
                    (-s / 2.0..=s / 2.0).contains(&x) && (-s / 2.0..=s).contains(&y)
                });
            }
            ShapeKind::Line | ShapeKind::Dash => self.trail(d),
        }
    }
}

impl Renderer for RasterCanvas {
    fn fill_background(&mut self, fill: &BackgroundFill) {
        let alpha = fill.alpha.clamp(0.0, 1.0);
        for p in &mut self.pixels {
            *p = blend(*p, fill.color, alpha);
        }
    }

    fn draw(&mut self, d: &DrawDescriptor) {
        if d.glow_intensity > 0.0 {
            self.glow(d);
        }
        if d.shape.is_stroke() {
            self.trail(d);
        } else {
            self.fill_shape(d);
        }
    }
}

fn blend(under: Srgb, over: Srgb, alpha: f64) -> Srgb {
    Srgb {
        r: under.r + (over.r - under.r) * alpha,
        g: under.g + (over.g - under.g) * alpha,
        b: under.b + (over.b - under.b) * alpha,
    }
}

fn segment_distance(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    let (abx, aby) = (b.0 - a.0, b.1 - a.1);
    let len2 = abx * abx + aby * aby;
    let t = if len2 > 0.0 {
        (((p.0 - a.0) * abx + (p.1 - a.1) * aby) / len2).clamp(0.0, 1.0)
    } else {
        0.0
    };
    (p.0 - (a.0 + abx * t)).hypot(p.1 - (a.1 + aby * t))
}

fn in_triangle(p: (f64, f64), [a, b, c]: [(f64, f64); 3]) -> bool {
    let cross = |o: (f64, f64), u: (f64, f64)| (u.0 - o.0) * (p.1 - o.1) - (u.1 - o.1) * (p.0 - o.0);
    let (d1, d2, d3) = (cross(a, b), cross(b, c), cross(c, a));
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}
