// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Staggered multi-phase confetti sink.

use std::sync::Arc;
use std::time::Duration;

use dropcart_port::{BurstRequest, EffectSink, ParticleBurst, ParticleEmitter, TimerPort};
use tracing::trace;

/// Particle count of each side burst.
pub const SECONDARY_PARTICLE_COUNT: u32 = 50;
/// Spread of each side burst, in degrees.
pub const SECONDARY_SPREAD: f64 = 55.0;
/// Initial velocity of each side burst.
pub const SECONDARY_START_VELOCITY: f64 = 25.0;
/// Delay and launch angle of the two side bursts.
pub const SECONDARY_DELAYS: [(Duration, f64); 2] = [
    (Duration::from_millis(100), 60.0),
    (Duration::from_millis(200), 120.0),
];

/// One emission in a burst plan, offset from the request time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BurstPhase {
    /// Offset from the request.
    pub delay: Duration,
    /// What to emit.
    pub burst: ParticleBurst,
}

/// Expand a request into its primary burst and two angled side bursts, all
/// from the same origin and with the request's duration.
pub fn phases(request: &BurstRequest) -> [BurstPhase; 3] {
    let side = |(delay, angle): (Duration, f64)| BurstPhase {
        delay,
        burst: ParticleBurst {
            origin: request.origin,
            particle_count: SECONDARY_PARTICLE_COUNT,
            angle,
            spread: SECONDARY_SPREAD,
            start_velocity: SECONDARY_START_VELOCITY,
            duration: request.duration,
        },
    };
    [
        BurstPhase {
            delay: Duration::ZERO,
            burst: request.primary(),
        },
        side(SECONDARY_DELAYS[0]),
        side(SECONDARY_DELAYS[1]),
    ]
}

/// Effect sink that drives a [`ParticleEmitter`] through a [`TimerPort`].
///
/// The primary burst is emitted synchronously; side bursts are scheduled.
/// Overlapping requests each get their own full plan.
#[derive(Debug)]
pub struct ConfettiSink<E, T> {
    emitter: Arc<E>,
    timer: T,
}

impl<E, T> ConfettiSink<E, T> {
    /// Wrap an emitter and a timer.
    pub fn new(emitter: Arc<E>, timer: T) -> Self {
        Self { emitter, timer }
    }

    /// The underlying emitter.
    pub fn emitter(&self) -> &Arc<E> {
        &self.emitter
    }
}

impl<E, T> EffectSink for ConfettiSink<E, T>
where
    E: ParticleEmitter + Send + Sync + 'static,
    T: TimerPort,
{
    fn burst(&self, request: BurstRequest) {
        for phase in phases(&request) {
            if phase.delay.is_zero() {
                trace!(angle = phase.burst.angle, "emitting primary burst");
                self.emitter.emit(&phase.burst);
                continue;
            }
            let emitter = Arc::clone(&self.emitter);
            let burst = phase.burst;
            self.timer.schedule(
                phase.delay,
                Box::new(move || {
                    trace!(angle = burst.angle, "emitting side burst");
                    emitter.emit(&burst);
                }),
            );
        }
    }
}
