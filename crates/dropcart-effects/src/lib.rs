// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Effect sink adapters for dropcart.
//!
//! - [`ConfettiSink`] expands one request into a primary burst plus two
//!   staggered side bursts.
//! - [`ChannelSink`] forwards requests over a one-way channel to an
//!   [`EffectInbox`] owned by whatever drives the particle surface.
//! - [`RecordingSink`] and [`RecordingEmitter`] record calls for headless tests.

mod channel;
mod confetti;
mod mock_sink;

pub use channel::{effect_channel, ChannelSink, EffectInbox};
pub use confetti::{
    phases, BurstPhase, ConfettiSink, SECONDARY_DELAYS, SECONDARY_PARTICLE_COUNT,
    SECONDARY_SPREAD, SECONDARY_START_VELOCITY,
};
pub use mock_sink::{RecordingEmitter, RecordingSink};
