// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Port contracts shared by the dropcart core and its effect adapters.
//!
//! This crate defines the boundary between cart logic and anything that
//! animates or schedules. It owns no state machine of its own.
//!
//! # Design Principles
//!
//! - **Effects are fire-and-forget** — A sink accepts a [`BurstRequest`] and
//!   never reports back.
//! - **No time ownership** — Deferred work goes through a [`TimerPort`]; the
//!   core never sleeps or spawns on its own.
//! - **Normalized origins** — Effect origins are fractions of the viewport,
//!   not pixels.

use thiserror::Error;

/// Error type for constructing port value types.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PortError {
    /// An origin coordinate was NaN or infinite.
    #[error("origin coordinate is not finite: ({x}, {y})")]
    NonFiniteOrigin {
        /// Offending x fraction.
        x: f64,
        /// Offending y fraction.
        y: f64,
    },
    /// A burst asked for zero particles.
    #[error("particle count must be positive")]
    EmptyBurst,
}

mod burst;
mod port;
mod timer;

pub use burst::{
    BurstRequest, Origin, ParticleBurst, DEFAULT_ANGLE, DEFAULT_DURATION, DEFAULT_PARTICLE_COUNT,
    DEFAULT_SPREAD, DEFAULT_START_VELOCITY,
};
pub use port::{EffectSink, ParticleEmitter, SharedEffectSink};
pub use timer::{ManualTimer, SharedTimer, TimerPort, TimerTask};
