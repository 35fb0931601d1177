// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Burst value types passed across the effect port.

use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::PortError;

/// Default number of particles in a primary burst.
pub const DEFAULT_PARTICLE_COUNT: u32 = 100;
/// Default spread of a primary burst, in degrees.
pub const DEFAULT_SPREAD: f64 = 70.0;
/// Default initial particle velocity.
pub const DEFAULT_START_VELOCITY: f64 = 30.0;
/// Default launch angle in degrees (straight up).
pub const DEFAULT_ANGLE: f64 = 90.0;
/// Default visible lifetime of a burst.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(1000);

/// Burst origin as fractions of viewport width and height.
///
/// `(0.0, 0.0)` is the top-left corner, `(1.0, 1.0)` the bottom-right.
/// Values outside `[0, 1]` are allowed (the drop target may be partially
/// off-screen) but must be finite.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Origin {
    /// Fraction of viewport width.
    pub x: f64,
    /// Fraction of viewport height.
    pub y: f64,
}

impl Origin {
    /// Builds an origin without validation; intended for constants.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Builds an origin, rejecting NaN and infinities.
    pub fn try_new(x: f64, y: f64) -> Result<Self, PortError> {
        if x.is_finite() && y.is_finite() {
            Ok(Self { x, y })
        } else {
            Err(PortError::NonFiniteOrigin { x, y })
        }
    }
}

impl Default for Origin {
    /// Center-top of the screen.
    fn default() -> Self {
        Self::new(0.5, 0.3)
    }
}

/// One celebratory burst request handed to an [`EffectSink`](crate::EffectSink).
///
/// Consumed once by the sink and then discarded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BurstRequest {
    /// Normalized burst origin.
    pub origin: Origin,
    /// Number of particles in the primary burst (positive).
    pub particle_count: u32,
    /// Spread angle in degrees.
    pub spread: f64,
    /// Initial particle velocity.
    pub start_velocity: f64,
    /// Optional visible lifetime hint.
    pub duration: Option<Duration>,
}

impl BurstRequest {
    /// Request at `origin` using the default count, spread and velocity.
    pub fn at(origin: Origin) -> Self {
        Self {
            origin,
            particle_count: DEFAULT_PARTICLE_COUNT,
            spread: DEFAULT_SPREAD,
            start_velocity: DEFAULT_START_VELOCITY,
            duration: Some(DEFAULT_DURATION),
        }
    }

    /// Override the particle count; zero is rejected.
    pub fn with_particle_count(mut self, count: u32) -> Result<Self, PortError> {
        if count == 0 {
            return Err(PortError::EmptyBurst);
        }
        self.particle_count = count;
        Ok(self)
    }

    /// The primary emission this request describes.
    pub fn primary(&self) -> ParticleBurst {
        ParticleBurst {
            origin: self.origin,
            particle_count: self.particle_count,
            angle: DEFAULT_ANGLE,
            spread: self.spread,
            start_velocity: self.start_velocity,
            duration: self.duration,
        }
    }
}

impl Default for BurstRequest {
    fn default() -> Self {
        Self::at(Origin::default())
    }
}

/// A single emission as seen by a particle renderer.
///
/// One [`BurstRequest`] may expand into several of these.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleBurst {
    /// Normalized origin.
    pub origin: Origin,
    /// Particle count.
    pub particle_count: u32,
    /// Launch angle in degrees; 90 is straight up.
    pub angle: f64,
    /// Spread in degrees.
    pub spread: f64,
    /// Initial velocity.
    pub start_velocity: f64,
    /// Visible lifetime hint carried over from the request.
    pub duration: Option<Duration>,
}
