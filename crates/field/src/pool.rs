//! The particle population and its resize policy.
//!
//! Growth appends freshly spawned particles styled from the current bundle;
//! shrinkage truncates from the tail. Survivors are never re-styled, so the
//! field keeps a visual memory of earlier moods.

use aura_core::Xorshift64;
use serde::Serialize;

use crate::mapper::ParameterBundle;
use crate::particle::Particle;

/// Net effect of one [`ParticlePool::resize_toward`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PoolChange {
    pub spawned: usize,
    pub removed: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ParticlePool {
    particles: Vec<Particle>,
}

impl ParticlePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Moves the population one step toward `target`.
    ///
    /// A deficit is filled at once, or by at most `max_spawn` particles when
    /// a cap is given. A surplus is always removed in full.
    #[allow(clippy::too_many_arguments)]
    pub fn resize_toward(
        &mut self,
        target: usize,
        max_spawn: Option<usize>,
        bundle: &ParameterBundle,
        palette_len: usize,
        width: f64,
        height: f64,
        rng: &mut Xorshift64,
    ) -> PoolChange {
        let current = self.particles.len();
        if current > target {
            self.particles.truncate(target);
            return PoolChange {
                spawned: 0,
                removed: current - target,
            };
        }

        let deficit = target - current;
        let spawn = max_spawn.map_or(deficit, |cap| deficit.min(cap));
        self.particles.reserve(spawn);
        for _ in 0..spawn {
            self.particles
                .push(Particle::spawn(bundle, palette_len, width, height, rng));
        }
        PoolChange {
            spawned: spawn,
            removed: 0,
        }
    }
}
