//! Vortex centers that pull particles into orbit and let them settle.

use aura_core::Xorshift64;
use glam::DVec2;
use serde::Serialize;

use crate::sentiment::Zone;

/// A single vortex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Attractor {
    pub position: DVec2,
    /// Inward pull, in (0, 0.5].
    pub strength: f64,
    /// Signed orbiting rate; positive spins counter-clockwise in screen space.
    pub rotation: f64,
}

/// Per-zone generation ranges.
struct ZoneRanges {
    count: (usize, usize),
    inset: f64,
    strength: (f64, f64),
    rotation: Rotation,
}

enum Rotation {
    /// Uniform in [-limit, limit).
    Symmetric(f64),
    /// Magnitude in [min, max) with a random sign.
    Signed(f64, f64),
}

impl ZoneRanges {
    fn of(zone: Zone) -> Self {
        match zone {
            Zone::Neutral => ZoneRanges {
                count: (3, 7),
                inset: 0.2,
                strength: (0.1, 0.2),
                rotation: Rotation::Symmetric(0.02),
            },
            Zone::Positive => ZoneRanges {
                count: (5, 12),
                inset: 0.15,
                strength: (0.15, 0.35),
                rotation: Rotation::Symmetric(0.05),
            },
            Zone::Negative => ZoneRanges {
                count: (2, 5),
                inset: 0.25,
                strength: (0.25, 0.45),
                rotation: Rotation::Signed(0.03, 0.08),
            },
        }
    }
}

/// The current vortex configuration, replaced wholesale on regeneration.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AttractorSet {
    attractors: Vec<Attractor>,
    generation: u64,
}

impl AttractorSet {
    /// An empty set; it exerts no force until the first [`regenerate`](Self::regenerate).
    pub fn new() -> Self {
        Self::default()
    }

    /// A fixed set of vortices, counted as one generation.
    pub fn from_attractors(attractors: Vec<Attractor>) -> Self {
        Self {
            attractors,
            generation: 1,
        }
    }

    /// Discards the current vortices and rolls a fresh set for `zone` on a
    /// `width × height` canvas.
    pub fn regenerate(&mut self, zone: Zone, width: f64, height: f64, rng: &mut Xorshift64) {
        let ranges = ZoneRanges::of(zone);
        let count = rng.next_count(ranges.count.0, ranges.count.1);
        let (x_min, x_max) = (width * ranges.inset, width * (1.0 - ranges.inset));
        let (y_min, y_max) = (height * ranges.inset, height * (1.0 - ranges.inset));

        self.attractors.clear();
        for _ in 0..count {
            let x = rng.next_range(x_min, x_max);
            let y = rng.next_range(y_min, y_max);
            let strength = rng.next_range(ranges.strength.0, ranges.strength.1);
            let rotation = match ranges.rotation {
                Rotation::Symmetric(limit) => rng.next_range(-limit, limit),
                Rotation::Signed(min, max) => rng.next_range(min, max) * rng.next_sign(),
            };
            self.attractors.push(Attractor {
                position: DVec2::new(x, y),
                strength,
                rotation,
            });
        }
        self.generation += 1;
    }

    pub fn attractors(&self) -> &[Attractor] {
        &self.attractors
    }

    pub fn len(&self) -> usize {
        self.attractors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attractors.is_empty()
    }

    /// Number of regenerations so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Nearest vortex to `position` and its distance. Ties keep the earlier one.
    pub fn nearest(&self, position: DVec2) -> Option<(&Attractor, f64)> {
        self.attractors
            .iter()
            .map(|a| (a, a.position.distance(position)))
            .fold(None, |best, (a, d)| match best {
                Some((_, best_d)) if best_d <= d => best,
                _ => Some((a, d)),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_set_is_empty() {
        let set = AttractorSet::new();
        assert!(set.is_empty());
        assert_eq!(set.generation(), 0);
        assert!(set.nearest(DVec2::ZERO).is_none());
    }

    #[test]
    fn regenerate_bumps_generation_and_replaces() {
        let mut rng = Xorshift64::new(3);
        let mut set = AttractorSet::new();
        set.regenerate(Zone::Neutral, 800.0, 600.0, &mut rng);
        let first = set.attractors().to_vec();
        set.regenerate(Zone::Neutral, 800.0, 600.0, &mut rng);
        assert_eq!(set.generation(), 2);
        assert_ne!(first, set.attractors());
    }

    #[test]
    fn nearest_picks_closest() {
        let set = AttractorSet::from_attractors(vec![
            Attractor { position: DVec2::new(0.0, 0.0), strength: 0.1, rotation: 0.0 },
            Attractor { position: DVec2::new(100.0, 0.0), strength: 0.2, rotation: 0.0 },
        ]);
        let (a, d) = set.nearest(DVec2::new(70.0, 0.0)).unwrap();
        assert_eq!(a.strength, 0.2);
        assert!((d - 30.0).abs() < 1e-12);
    }

    #[test]
    fn nearest_tie_keeps_first() {
        let set = AttractorSet::from_attractors(vec![
            Attractor { position: DVec2::new(0.0, 0.0), strength: 0.1, rotation: 0.0 },
            Attractor { position: DVec2::new(100.0, 0.0), strength: 0.2, rotation: 0.0 },
        ]);
        let (a, _) = set.nearest(DVec2::new(50.0, 0.0)).unwrap();
        assert_eq!(a.strength, 0.1);
    }

    #[test]
    fn regeneration_is_seed_deterministic() {
        let mut a = AttractorSet::new();
        let mut b = AttractorSet::new();
        a.regenerate(Zone::Positive, 640.0, 480.0, &mut Xorshift64::new(99));
        b.regenerate(Zone::Positive, 640.0, 480.0, &mut Xorshift64::new(99));
        assert_eq!(a.attractors(), b.attractors());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn zone() -> impl Strategy<Value = Zone> {
            prop_oneof![Just(Zone::Negative), Just(Zone::Neutral), Just(Zone::Positive)]
        }

        proptest! {
            #[test]
            fn generated_values_respect_zone_ranges(
                z in zone(),
                seed in 1_u64..u64::MAX,
                w in 50.0_f64..2000.0,
                h in 50.0_f64..2000.0,
            ) {
                let mut set = AttractorSet::new();
                set.regenerate(z, w, h, &mut Xorshift64::new(seed));
                let r = ZoneRanges::of(z);
                prop_assert!(set.len() >= r.count.0 && set.len() <= r.count.1);
                for a in set.attractors() {
                    prop_assert!(a.position.x >= w * r.inset && a.position.x <= w * (1.0 - r.inset));
                    prop_assert!(a.position.y >= h * r.inset && a.position.y <= h * (1.0 - r.inset));
                    prop_assert!(a.strength > 0.0 && a.strength <= 0.5);
                    prop_assert!(a.strength >= r.strength.0 && a.strength < r.strength.1);
                    match r.rotation {
                        Rotation::Symmetric(limit) => prop_assert!(a.rotation.abs() <= limit),
                        Rotation::Signed(min, max) => {
                            prop_assert!(a.rotation.abs() >= min && a.rotation.abs() < max)
                        }
                    }
                }
            }
        }
    }
}
