//! Per-particle kinematics and draw output.

use aura_core::{DrawDescriptor, Palette, ShapeKind, Xorshift64};
use glam::DVec2;
use serde::Serialize;

use crate::attractor::AttractorSet;
use crate::config::Dynamics;
use crate::flow_field::FlowField;
use crate::mapper::ParameterBundle;

/// Fraction of `base_speed` shed at full stability.
const SETTLED_SLOWDOWN: f64 = 0.9;
/// Fraction of the flow force shed at full stability.
const SETTLED_FLOW_DAMPING: f64 = 0.8;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Particle {
    pub position: DVec2,
    /// Position at the end of the previous frame; only used for trails.
    pub previous_position: DVec2,
    pub velocity: DVec2,
    pub acceleration: DVec2,
    /// How settled the particle is around its nearest vortex, in [0, 1].
    pub stability: f64,
    pub target_reached: bool,
    pub shape: ShapeKind,
    pub size: f64,
    pub color_index: usize,
    pub has_glow: bool,
}

impl Particle {
    /// Spawns a particle at rest, uniformly on a `width × height` canvas,
    /// styled from the bundle active at creation.
    ///
    /// Randomness is drawn in a fixed order: position, color index, shape,
    /// size, glow.
    pub fn spawn(
        bundle: &ParameterBundle,
        palette_len: usize,
        width: f64,
        height: f64,
        rng: &mut Xorshift64,
    ) -> Self {
        let x = rng.next_range(0.0, width);
        let y = rng.next_range(0.0, height);
        let position = DVec2::new(x, y);
        let color_index = rng.next_usize(palette_len);
        let shape = bundle.shape_mix.pick(rng.next_f64());
        let size = rng.next_range(bundle.size_range.min, bundle.size_range.max);
        let has_glow = rng.chance(bundle.glow_ratio);
        Self {
            position,
            previous_position: position,
            velocity: DVec2::ZERO,
            acceleration: DVec2::ZERO,
            stability: 0.0,
            target_reached: false,
            shape,
            size,
            color_index,
            has_glow,
        }
    }

    /// Speed limit, `base_speed · (1 − 0.9 · stability)`; always positive.
    pub fn max_speed(&self, dynamics: &Dynamics) -> f64 {
        dynamics.base_speed * (1.0 - SETTLED_SLOWDOWN * self.stability)
    }

    /// Heading in radians.
    pub fn heading(&self) -> f64 {
        self.velocity.y.atan2(self.velocity.x)
    }

    pub fn apply_force(&mut self, force: DVec2) {
        self.acceleration += force;
    }

    /// Pushes along the flow vector of the particle's cell, damped as the
    /// particle settles. Off-grid positions get no push.
    pub fn follow(&mut self, field: &FlowField, dynamics: &Dynamics) {
        if let Some(flow) = field.lookup(self.position) {
            let influence = dynamics.flow_weight * (1.0 - SETTLED_FLOW_DAMPING * self.stability);
            self.apply_force(flow * influence);
        }
    }

    /// Updates stability against the nearest vortex and, while unsettled,
    /// applies its orbiting and inward forces.
    pub fn attract_to(&mut self, attractors: &AttractorSet, dynamics: &Dynamics) {
        let Some((nearest, distance)) = attractors.nearest(self.position) else {
            return;
        };

        if distance < dynamics.stability_radius {
            self.stability = (self.stability + dynamics.stability_gain).min(1.0);
            if self.stability > dynamics.settle_threshold {
                self.target_reached = true;
            }
        } else {
            self.stability = (self.stability - dynamics.stability_decay).max(0.0);
            self.target_reached = false;
        }

        if self.stability < dynamics.orbit_cutoff && distance > dynamics.singularity_radius {
            let toward = (nearest.position - self.position).normalize_or_zero();
            let unsettled = 1.0 - self.stability;
            let tangential =
                toward.perp() * (nearest.rotation * distance * dynamics.tangential_gain * unsettled);
            let radial = toward * (nearest.strength * dynamics.radial_gain * unsettled);
            self.apply_force(tangential + radial);
        }
    }

    /// Integrates one step: velocity gains the accumulated acceleration, is
    /// clamped to the speed limit, and moves the particle.
    pub fn integrate(&mut self, dynamics: &Dynamics) {
        self.velocity = (self.velocity + self.acceleration).clamp_length_max(self.max_speed(dynamics));
        self.position += self.velocity;
        self.acceleration = DVec2::ZERO;
    }

    /// Wraps to the opposite edge once past one, resetting the trail so no
    /// stroke crosses the canvas. Returns whether a wrap happened.
    pub fn wrap_edges(&mut self, width: f64, height: f64) -> bool {
        let mut wrapped = false;
        if self.position.x > width {
            self.position.x = 0.0;
            wrapped = true;
        } else if self.position.x < 0.0 {
            self.position.x = width;
            wrapped = true;
        }
        if self.position.y > height {
            self.position.y = 0.0;
            wrapped = true;
        } else if self.position.y < 0.0 {
            self.position.y = height;
            wrapped = true;
        }
        if wrapped {
            self.previous_position = self.position;
        }
        wrapped
    }

    /// Draw output for this frame. Colors come from `palette` (the current
    /// frame's), so a zone change recolors by index rather than respawning.
    pub fn descriptor(&self, palette: &Palette, glow_intensity: f64) -> DrawDescriptor {
        DrawDescriptor {
            shape: self.shape,
            x: self.position.x,
            y: self.position.y,
            prev_x: self.previous_position.x,
            prev_y: self.previous_position.y,
            angle: self.heading(),
            size: self.size,
            color: palette.color(self.color_index),
            glow_intensity: if self.has_glow { glow_intensity } else { 0.0 },
        }
    }

    /// Marks the end of the frame for trail drawing.
    pub fn settle_trail(&mut self) {
        self.previous_position = self.position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attractor::Attractor;
    use crate::mapper::map;
    use crate::sentiment::Zone;

    fn at_rest(x: f64, y: f64) -> Particle {
        Particle {
            position: DVec2::new(x, y),
            previous_position: DVec2::new(x, y),
            velocity: DVec2::ZERO,
            acceleration: DVec2::ZERO,
            stability: 0.0,
            target_reached: false,
            shape: ShapeKind::Line,
            size: 3.0,
            color_index: 0,
            has_glow: false,
        }
    }

    fn single(position: DVec2, strength: f64, rotation: f64) -> AttractorSet {
        AttractorSet::from_attractors(vec![Attractor { position, strength, rotation }])
    }

    #[test]
    fn spawn_respects_bundle() {
        let bundle = map(Some(0.8), 0);
        let mut rng = Xorshift64::new(4);
        for _ in 0..200 {
            let p = Particle::spawn(&bundle, 8, 300.0, 200.0, &mut rng);
            assert!(p.position.x >= 0.0 && p.position.x < 300.0);
            assert!(p.position.y >= 0.0 && p.position.y < 200.0);
            assert!(p.size >= bundle.size_range.min && p.size < bundle.size_range.max);
            assert!(p.color_index < 8);
            assert!(bundle.shape_mix.weights().iter().any(|&(s, _)| s == p.shape));
            assert_eq!(p.velocity, DVec2::ZERO);
            assert_eq!(p.previous_position, p.position);
        }
    }

    #[test]
    fn neutral_reading_spawns_only_lines() {
        let bundle = map(Some(0.05), 0);
        let mut rng = Xorshift64::new(8);
        for _ in 0..50 {
            assert_eq!(Particle::spawn(&bundle, 6, 100.0, 100.0, &mut rng).shape, ShapeKind::Line);
        }
    }

    #[test]
    fn max_speed_follows_stability() {
        let d = Dynamics::default();
        let mut p = at_rest(0.0, 0.0);
        assert_eq!(p.max_speed(&d), 2.0);
        p.stability = 1.0;
        assert!((p.max_speed(&d) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn integrate_clamps_speed_and_clears_acceleration() {
        let d = Dynamics::default();
        let mut p = at_rest(50.0, 50.0);
        p.apply_force(DVec2::new(10.0, 0.0));
        p.integrate(&d);
        assert!((p.velocity.length() - 2.0).abs() < 1e-12);
        assert_eq!(p.position, DVec2::new(52.0, 50.0));
        assert_eq!(p.acceleration, DVec2::ZERO);
    }

    #[test]
    fn stability_rises_inside_radius_and_sets_target() {
        let d = Dynamics::default();
        let set = single(DVec2::new(100.0, 100.0), 0.1, 0.0);
        let mut p = at_rest(110.0, 100.0);
        for _ in 0..71 {
            p.attract_to(&set, &d);
        }
        assert!(p.stability > 0.7);
        assert!(p.target_reached);
    }

    #[test]
    fn leaving_the_radius_decays_and_clears_target() {
        let d = Dynamics::default();
        let set = single(DVec2::new(0.0, 0.0), 0.1, 0.0);
        let mut p = at_rest(500.0, 0.0);
        p.stability = 0.75;
        p.target_reached = true;
        p.attract_to(&set, &d);
        assert!((p.stability - 0.745).abs() < 1e-12);
        assert!(!p.target_reached);
    }

    #[test]
    fn vortex_force_has_radial_and_tangential_parts() {
        let d = Dynamics::default();
        let set = single(DVec2::new(0.0, 0.0), 0.2, 0.04);
        let mut p = at_rest(200.0, 0.0);
        p.attract_to(&set, &d);
        // outside the radius, stability stays 0
        let radial = -0.2 * 0.5;
        let tangential = 0.04 * 200.0 * 0.05;
        assert!((p.acceleration.x - radial).abs() < 1e-12);
        // toward = (-1, 0); perp = (0, -1)
        assert!((p.acceleration.y + tangential).abs() < 1e-12);
    }

    #[test]
    fn no_force_near_the_center_or_when_settled() {
        let d = Dynamics::default();
        let set = single(DVec2::new(0.0, 0.0), 0.3, 0.05);
        let mut close = at_rest(3.0, 0.0);
        close.attract_to(&set, &d);
        assert_eq!(close.acceleration, DVec2::ZERO);

        let mut settled = at_rest(40.0, 0.0);
        settled.stability = 0.85;
        settled.attract_to(&set, &d);
        assert_eq!(settled.acceleration, DVec2::ZERO);
    }

    #[test]
    fn empty_set_is_a_no_op() {
        let d = Dynamics::default();
        let mut p = at_rest(10.0, 10.0);
        p.stability = 0.4;
        p.attract_to(&AttractorSet::new(), &d);
        assert_eq!(p.stability, 0.4);
        assert_eq!(p.acceleration, DVec2::ZERO);
    }

    #[test]
    fn wrap_resets_trail() {
        let mut p = at_rest(10.0, 10.0);
        p.position = DVec2::new(101.0, 50.0);
        assert!(p.wrap_edges(100.0, 100.0));
        assert_eq!(p.position, DVec2::new(0.0, 50.0));
        assert_eq!(p.previous_position, p.position);

        p.position = DVec2::new(50.0, -0.5);
        assert!(p.wrap_edges(100.0, 100.0));
        assert_eq!(p.position, DVec2::new(50.0, 100.0));

        p.position = DVec2::new(100.0, 100.0);
        p.previous_position = DVec2::new(99.0, 99.0);
        assert!(!p.wrap_edges(100.0, 100.0), "exactly on the edge stays");
        assert_eq!(p.previous_position, DVec2::new(99.0, 99.0));
    }

    #[test]
    fn follow_skips_off_grid_positions() {
        let bundle = map(None, 0);
        let mut field = FlowField::new();
        field.rebuild(180.0, 180.0, &bundle, &aura_core::PerlinNoise::new(1), 0.0);
        let d = Dynamics::default();
        let mut p = at_rest(180.0, 20.0);
        p.follow(&field, &d);
        assert_eq!(p.acceleration, DVec2::ZERO);

        let mut q = at_rest(20.0, 20.0);
        q.follow(&field, &d);
        assert!((q.acceleration.length() - 0.5 * 0.7).abs() < 1e-12);
    }

    #[test]
    fn descriptor_uses_current_palette_and_glow() {
        let mut p = at_rest(5.0, 6.0);
        p.color_index = 7;
        p.velocity = DVec2::new(0.0, 1.0);
        let marble = Zone::Neutral.palette();
        let d = p.descriptor(&marble, 9.0);
        assert_eq!(d.color, marble.color(7 % marble.len()));
        assert_eq!(d.glow_intensity, 0.0);
        assert!((d.angle - std::f64::consts::FRAC_PI_2).abs() < 1e-12);

        p.has_glow = true;
        assert_eq!(p.descriptor(&marble, 9.0).glow_intensity, 9.0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn stability_and_speed_stay_bounded(
                seed in 1_u64..u64::MAX,
                steps in 1_usize..400,
                s in -1.0_f64..=1.0,
            ) {
                let d = Dynamics::default();
                let bundle = map(Some(s), 0);
                let mut rng = Xorshift64::new(seed);
                let mut set = AttractorSet::new();
                set.regenerate(bundle.zone, 300.0, 300.0, &mut rng);
                let mut field = FlowField::new();
                let noise = aura_core::PerlinNoise::new(seed as u32);
                field.rebuild(300.0, 300.0, &bundle, &noise, 0.0);
                let mut p = Particle::spawn(&bundle, 8, 300.0, 300.0, &mut rng);
                for _ in 0..steps {
                    p.follow(&field, &d);
                    p.attract_to(&set, &d);
                    p.integrate(&d);
                    p.wrap_edges(300.0, 300.0);
                    p.settle_trail();
                    prop_assert!((0.0..=1.0).contains(&p.stability));
                    prop_assert!(p.max_speed(&d) > 0.0);
                    prop_assert!(p.velocity.length() <= p.max_speed(&d) + 1e-9);
                    prop_assert!(p.position.x >= 0.0 && p.position.x <= 300.0);
                    prop_assert!(p.position.y >= 0.0 && p.position.y <= 300.0);
                }
            }
        }
    }
}
