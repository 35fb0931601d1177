// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Tunable timings and burst defaults, persisted through [`ConfigService`].

use std::time::Duration;

use dropcart_port::{
    BurstRequest, Origin, DEFAULT_DURATION, DEFAULT_PARTICLE_COUNT, DEFAULT_SPREAD,
    DEFAULT_START_VELOCITY,
};
use serde::{Deserialize, Serialize};

use crate::bounce::BOUNCE_DURATION;
use crate::config::{ConfigError, ConfigService, ConfigStore};
use crate::geometry::FALLBACK_ORIGIN;

/// Config key for [`CartSettings`].
pub const SETTINGS_KEY: &str = "settings";

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Parameters for the burst fired on every successful drop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstDefaults {
    /// Primary burst particle count.
    pub particle_count: u32,
    /// Spread in degrees.
    pub spread: f64,
    /// Initial velocity.
    pub start_velocity: f64,
    /// Visible lifetime in milliseconds.
    pub duration_ms: u64,
}

impl Default for BurstDefaults {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            spread: DEFAULT_SPREAD,
            start_velocity: DEFAULT_START_VELOCITY,
            duration_ms: millis(DEFAULT_DURATION),
        }
    }
}

impl BurstDefaults {
    /// Build a request at `origin`. A zero particle count falls back to the
    /// default so a bad config file cannot produce an invisible burst.
    pub fn request_at(&self, origin: Origin) -> BurstRequest {
        let base = BurstRequest {
            origin,
            particle_count: DEFAULT_PARTICLE_COUNT,
            spread: self.spread,
            start_velocity: self.start_velocity,
            duration: Some(Duration::from_millis(self.duration_ms)),
        };
        base.with_particle_count(self.particle_count).unwrap_or(base)
    }
}

/// Host-level settings for a cart session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartSettings {
    /// How long the bounce flag stays active after the last add.
    pub bounce_ms: u64,
    /// Burst parameters.
    pub burst: BurstDefaults,
    /// Origin used when the drop target has no usable geometry.
    pub fallback_origin: Origin,
}

impl Default for CartSettings {
    fn default() -> Self {
        Self {
            bounce_ms: millis(BOUNCE_DURATION),
            burst: BurstDefaults::default(),
            fallback_origin: FALLBACK_ORIGIN,
        }
    }
}

impl CartSettings {
    /// Bounce window as a `Duration`.
    pub fn bounce_duration(&self) -> Duration {
        Duration::from_millis(self.bounce_ms)
    }

    /// Load from `config`, using defaults when nothing is stored.
    pub fn load_or_default<S: ConfigStore>(
        config: &ConfigService<S>,
    ) -> Result<Self, ConfigError> {
        Ok(config.load(SETTINGS_KEY)?.unwrap_or_default())
    }

    /// Persist to `config`.
    pub fn save<S: ConfigStore>(&self, config: &ConfigService<S>) -> Result<(), ConfigError> {
        config.save(SETTINGS_KEY, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryConfigStore;

    #[test]
    fn test_defaults() {
        let s = CartSettings::default();
        assert_eq!(s.bounce_duration(), Duration::from_millis(200));
        assert_eq!(s.fallback_origin, Origin::new(0.8, 0.3));
        assert_eq!(s.burst.particle_count, 100);
        assert_eq!(s.burst.duration_ms, 1000);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s: CartSettings = serde_json::from_str(r#"{"bounce_ms": 350}"#).unwrap_or_default();
        assert_eq!(s.bounce_ms, 350);
        assert_eq!(s.burst, BurstDefaults::default());
    }

    #[test]
    fn test_roundtrip_through_service() {
        let svc = ConfigService::new(MemoryConfigStore::new());
        assert!(matches!(CartSettings::load_or_default(&svc), Ok(s) if s == CartSettings::default()));

        let custom = CartSettings {
            bounce_ms: 120,
            ..CartSettings::default()
        };
        assert!(custom.save(&svc).is_ok());
        assert!(matches!(CartSettings::load_or_default(&svc), Ok(s) if s.bounce_ms == 120));
    }

    #[test]
    fn test_zero_particles_fall_back() {
        let burst = BurstDefaults {
            particle_count: 0,
            ..BurstDefaults::default()
        };
        assert_eq!(burst.request_at(Origin::default()).particle_count, 100);

        let burst = BurstDefaults {
            particle_count: 7,
            ..BurstDefaults::default()
        };
        assert_eq!(burst.request_at(Origin::default()).particle_count, 7);
    }
}
