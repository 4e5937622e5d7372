#![deny(unsafe_code)]
//! Sentiment-driven flow-field particle aura.
//!
//! A sentiment reading (or its absence) and a keyword count are mapped to a
//! [`ParameterBundle`] every frame. The [`Animator`] uses it to steer a
//! [`ParticlePool`] through a noise-driven [`FlowField`] and a set of
//! vortices ([`AttractorSet`]), emitting draw descriptors to any
//! [`Renderer`](aura_core::Renderer).

pub mod animator;
pub mod attractor;
pub mod config;
pub mod flow_field;
pub mod input;
pub mod mapper;
pub mod particle;
pub mod pool;
pub mod sentiment;

pub use animator::{Animator, FrameReport, SimulationState};
pub use attractor::{Attractor, AttractorSet};
pub use config::{AuraConfig, Dynamics};
pub use flow_field::FlowField;
pub use input::{InputSlot, InputSnapshot};
pub use mapper::{map, ParameterBundle};
pub use particle::Particle;
pub use pool::{ParticlePool, PoolChange};
pub use sentiment::Zone;
