// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Recording doubles for headless testing of the drop path.
//!
//! Both types keep every call in order so tests can assert on counts,
//! origins and staggering without a rendering surface.

use std::sync::{Mutex, PoisonError};

use dropcart_port::{BurstRequest, EffectSink, ParticleBurst, ParticleEmitter};

/// Effect sink that records each request.
#[derive(Debug, Default)]
pub struct RecordingSink {
    requests: Mutex<Vec<BurstRequest>>,
}

impl RecordingSink {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request received, oldest first.
    pub fn requests(&self) -> Vec<BurstRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of requests received.
    pub fn count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Most recent request, if any.
    pub fn last(&self) -> Option<BurstRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .copied()
    }
}

impl EffectSink for RecordingSink {
    fn burst(&self, request: BurstRequest) {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
    }
}

/// Particle emitter that records each emission.
#[derive(Debug, Default)]
pub struct RecordingEmitter {
    bursts: Mutex<Vec<ParticleBurst>>,
}

impl RecordingEmitter {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every emission, oldest first.
    pub fn bursts(&self) -> Vec<ParticleBurst> {
        self.bursts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of emissions.
    pub fn count(&self) -> usize {
        self.bursts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl ParticleEmitter for RecordingEmitter {
    fn emit(&self, burst: &ParticleBurst) {
        self.bursts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(*burst);
    }
}
