// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Generation-gated bounce flag.
//!
//! Every add re-arms the flag and bumps the generation. The deferred reset
//! carries the token it was armed with and only takes effect if no later add
//! has happened since, so the flag goes idle exactly once, one window after
//! the last add.

use std::time::Duration;

/// Default bounce window.
pub const BOUNCE_DURATION: Duration = Duration::from_millis(200);

/// Bounce flag state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BounceState {
    /// No pulse.
    #[default]
    Idle,
    /// Pulse running.
    Active,
}

/// Proof of a particular arming, handed to the deferred reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BounceToken(u64);

impl BounceToken {
    /// Generation this token was issued for.
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// The bounce flag state machine.
#[derive(Clone, Debug, Default)]
pub struct BounceFlag {
    generation: u64,
    state: BounceState,
}

impl BounceFlag {
    /// Create an idle flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to `Active` (from either state) and issue a fresh token.
    pub fn arm(&mut self) -> BounceToken {
        self.generation += 1;
        self.state = BounceState::Active;
        BounceToken(self.generation)
    }

    /// Move to `Idle` if `token` is from the latest arming.
    ///
    /// Returns `true` when the state actually changed.
    pub fn expire(&mut self, token: BounceToken) -> bool {
        if token.0 != self.generation || self.state == BounceState::Idle {
            return false;
        }
        self.state = BounceState::Idle;
        true
    }

    /// Current state.
    pub fn state(&self) -> BounceState {
        self.state
    }

    /// `true` while a pulse is running.
    pub fn is_active(&self) -> bool {
        self.state == BounceState::Active
    }

    /// Number of armings so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arm_then_expire() {
        let mut flag = BounceFlag::new();
        assert_eq!(flag.state(), BounceState::Idle);
        let t = flag.arm();
        assert!(flag.is_active());
        assert!(flag.expire(t));
        assert!(!flag.is_active());
        assert!(!flag.expire(t));
    }

    #[test]
    fn test_stale_token_is_ignored() {
        let mut flag = BounceFlag::new();
        let first = flag.arm();
        let second = flag.arm();
        assert!(!flag.expire(first));
        assert!(flag.is_active());
        assert!(flag.expire(second));
        assert!(!flag.is_active());
        assert_eq!(flag.generation(), 2);
    }
}
