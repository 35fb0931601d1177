// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Effect port traits.

use std::sync::Arc;

use crate::{BurstRequest, ParticleBurst};

/// Celebratory effect sink.
///
/// Implementors own their rendering surface and timing. A call returns
/// immediately; the effect renders and disposes of itself without further
/// involvement from the caller. Calls in quick succession overlap rather than
/// queue.
///
/// # Design
///
/// This is a command port, not an observable. Nothing an implementor does
/// (animation frames, internal timers) may feed back into cart observers.
pub trait EffectSink {
    /// Fire a burst. No return channel.
    fn burst(&self, request: BurstRequest);
}

/// Shared, thread-safe effect sink handle.
pub type SharedEffectSink = Arc<dyn EffectSink + Send + Sync>;

impl<S: EffectSink + ?Sized> EffectSink for Arc<S> {
    fn burst(&self, request: BurstRequest) {
        (**self).burst(request);
    }
}

impl<S: EffectSink + ?Sized> EffectSink for &S {
    fn burst(&self, request: BurstRequest) {
        (**self).burst(request);
    }
}

/// Low-level particle renderer (the canvas behind an effect sink).
pub trait ParticleEmitter {
    /// Emit one burst of particles.
    fn emit(&self, burst: &ParticleBurst);
}

impl<E: ParticleEmitter + ?Sized> ParticleEmitter for Arc<E> {
    fn emit(&self, burst: &ParticleBurst) {
        (**self).emit(burst);
    }
}
