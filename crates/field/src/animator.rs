//! The frame driver.
//!
//! Each call to [`Animator::frame`] runs, in order:
//!
//! 0. apply a deferred resize;
//! 1. regenerate the vortices if the sentiment moved enough (or on first
//!    frame / after a resize);
//! 2. grow or shrink the pool toward the bundle's target;
//! 3. advance noise time by the bundle's speed;
//! 4. issue the translucent background fill;
//! 5. rebuild the flow field;
//! 6. move and emit every particle, in pool order.
//!
//! A degenerate viewport skips the whole frame.

use aura_core::{Engine, EngineError, Noise3D, Palette, PerlinNoise, Renderer, Seed, Xorshift64};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::attractor::AttractorSet;
use crate::config::AuraConfig;
use crate::flow_field::FlowField;
use crate::input::{InputSlot, InputSnapshot};
use crate::mapper::{self, ParameterBundle};
use crate::pool::{ParticlePool, PoolChange};
use crate::sentiment::{self, Zone};

/// All mutable simulation state, advanced only by [`Animator::frame`].
#[derive(Debug, Clone)]
pub struct SimulationState {
    width: f64,
    height: f64,
    pending_resize: Option<(f64, f64)>,
    /// Set by a resize until a drawable frame regenerates the vortices.
    resize_regeneration: bool,
    frame: u64,
    time_offset: f64,
    /// Sentiment at the most recent regeneration.
    last_sentiment: Option<f64>,
    rng: Xorshift64,
    pool: ParticlePool,
    attractors: AttractorSet,
    field: FlowField,
    bundle: ParameterBundle,
}

impl SimulationState {
    fn new(width: f64, height: f64, seed: u64) -> Self {
        Self {
            width,
            height,
            pending_resize: None,
            resize_regeneration: false,
            frame: 0,
            time_offset: 0.0,
            last_sentiment: None,
            rng: Xorshift64::new(seed),
            pool: ParticlePool::new(),
            attractors: AttractorSet::new(),
            field: FlowField::new(),
            bundle: mapper::map(None, 0),
        }
    }

    pub fn viewport(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Frames stepped so far, skipped ones included.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn time_offset(&self) -> f64 {
        self.time_offset
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    pub fn attractors(&self) -> &AttractorSet {
        &self.attractors
    }

    pub fn field(&self) -> &FlowField {
        &self.field
    }

    /// The bundle used by the most recent drawn frame.
    pub fn bundle(&self) -> &ParameterBundle {
        &self.bundle
    }

    fn viewport_is_drawable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// What one frame did.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameReport {
    /// 1-based index of this frame.
    pub frame: u64,
    /// True when the viewport was degenerate and nothing ran.
    pub skipped: bool,
    pub regenerated: bool,
    pub pool_change: PoolChange,
    pub particles: usize,
    pub zone: Zone,
}

/// Drives the aura one frame at a time.
pub struct Animator {
    config: AuraConfig,
    noise: Box<dyn Noise3D>,
    input: InputSlot,
    state: SimulationState,
    stopped: bool,
}

impl Animator {
    /// Creates an animator with Perlin noise seeded from the config.
    pub fn new(config: AuraConfig) -> Self {
        let noise = Box::new(PerlinNoise::new(config.noise_seed()));
        Self::with_noise(config, noise)
    }

    /// Creates an animator over a custom noise source. Dynamics are clamped
    /// to the ranges [`AuraConfig::param_schema`] advertises.
    pub fn with_noise(mut config: AuraConfig, noise: Box<dyn Noise3D>) -> Self {
        config.dynamics = config.dynamics.clamped();
        info!(
            width = config.width,
            height = config.height,
            seed = config.seed,
            "aura animator created"
        );
        let state = SimulationState::new(config.width, config.height, config.seed);
        Self {
            config,
            noise,
            input: InputSlot::new(),
            state,
            stopped: false,
        }
    }

    /// Builds an animator for a validated [`Seed`], taking overrides from its params.
    pub fn from_seed(seed: &Seed) -> Result<Self, EngineError> {
        seed.validate()?;
        Ok(Self::new(AuraConfig::from_json(
            seed.width as f64,
            seed.height as f64,
            seed.seed,
            &seed.params,
        )))
    }

    pub fn config(&self) -> &AuraConfig {
        &self.config
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// A handle producers can publish through from any thread.
    pub fn input(&self) -> InputSlot {
        self.input.clone()
    }

    pub fn set_sentiment(&self, sentiment: Option<f64>) {
        self.input.set_sentiment(sentiment);
    }

    pub fn set_keywords<S: AsRef<str>>(&self, keywords: &[S]) {
        self.input.set_keywords(keywords);
    }

    /// Records a new viewport; it takes effect at the start of the next frame.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.state.pending_resize = Some((width, height));
    }

    /// Stops the loop. Every later step fails with [`EngineError::Stopped`].
    pub fn teardown(&mut self) {
        if !self.stopped {
            info!(frames = self.state.frame, "aura animator stopped");
        }
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Runs one frame against `renderer`.
    pub fn frame(&mut self, renderer: &mut dyn Renderer) -> Result<FrameReport, EngineError> {
        if self.stopped {
            return Err(EngineError::Stopped);
        }
        let state = &mut self.state;
        state.frame += 1;

        if let Some((width, height)) = state.pending_resize.take() {
            debug!(width, height, "viewport resized");
            state.width = width;
            state.height = height;
            state.resize_regeneration = true;
        }

        let snapshot = self.input.latest();
        let sentiment = sentiment::sanitize(snapshot.sentiment);

        if !state.viewport_is_drawable() {
            warn!(
                width = state.width,
                height = state.height,
                "degenerate viewport, frame skipped"
            );
            return Ok(FrameReport {
                frame: state.frame,
                skipped: true,
                regenerated: false,
                pool_change: PoolChange::default(),
                particles: state.pool.len(),
                zone: Zone::of(sentiment),
            });
        }

        let bundle = mapper::map(sentiment, snapshot.keyword_count);
        let (width, height) = (state.width, state.height);

        // A resize regenerates but leaves the sentiment baseline alone.
        let sentiment_trigger = state.attractors.generation() == 0
            || sentiment::regeneration_needed(state.last_sentiment, sentiment);
        let regenerated = sentiment_trigger || state.resize_regeneration;
        if regenerated {
            state
                .attractors
                .regenerate(bundle.zone, width, height, &mut state.rng);
            if sentiment_trigger {
                state.last_sentiment = sentiment;
            }
            state.resize_regeneration = false;
            debug!(
                generation = state.attractors.generation(),
                vortices = state.attractors.len(),
                zone = ?bundle.zone,
                "vortices regenerated"
            );
        }

        let palette: Palette = bundle.zone.palette();
        let pool_change = state.pool.resize_toward(
            bundle.particle_count_target,
            self.config.max_spawn_per_frame,
            &bundle,
            palette.len(),
            width,
            height,
            &mut state.rng,
        );
        if pool_change != PoolChange::default() {
            debug!(
                spawned = pool_change.spawned,
                removed = pool_change.removed,
                size = state.pool.len(),
                target = bundle.particle_count_target,
                "pool resized"
            );
        }

        state.time_offset += bundle.time_speed;

        renderer.fill_background(&bundle.background_fill());

        state
            .field
            .rebuild(width, height, &bundle, self.noise.as_ref(), state.time_offset);

        let dynamics = &self.config.dynamics;
        for particle in state.pool.particles_mut() {
            particle.follow(&state.field, dynamics);
            particle.attract_to(&state.attractors, dynamics);
            particle.integrate(dynamics);
            particle.wrap_edges(width, height);
            renderer.draw(&particle.descriptor(&palette, bundle.glow_intensity));
            particle.settle_trail();
        }

        let report = FrameReport {
            frame: state.frame,
            skipped: false,
            regenerated,
            pool_change,
            particles: state.pool.len(),
            zone: bundle.zone,
        };
        state.bundle = bundle;
        Ok(report)
    }

    /// Replays `seed`: applies each scheduled input at the start of its frame
    /// and steps `seed.frames` frames.
    pub fn run_seed(
        &mut self,
        seed: &Seed,
        renderer: &mut dyn Renderer,
    ) -> Result<Vec<FrameReport>, EngineError> {
        seed.validate()?;
        (0..seed.frames)
            .map(|index| {
                for update in seed.updates_at(index) {
                    self.input
                        .publish(InputSnapshot::new(update.sentiment, &update.keywords));
                }
                self.frame(renderer)
            })
            .collect()
    }
}

impl Engine for Animator {
    fn step(&mut self, renderer: &mut dyn Renderer) -> Result<(), EngineError> {
        self.frame(renderer).map(|_| ())
    }

    fn params(&self) -> Value {
        self.config.params()
    }

    fn param_schema(&self) -> Value {
        AuraConfig::param_schema()
    }
}
