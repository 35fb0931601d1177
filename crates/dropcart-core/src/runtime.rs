// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Tokio-backed [`TimerPort`].

use std::time::Duration;

use dropcart_port::{TimerPort, TimerTask};
use tokio::runtime::Handle;

/// Runs each task on its own spawned sleep.
#[derive(Debug, Clone)]
pub struct TokioTimer {
    handle: Handle,
}

impl TokioTimer {
    /// Timer bound to `handle`.
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Timer bound to the runtime this is called from.
    ///
    /// Returns `None` outside a runtime.
    pub fn current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }
}

impl TimerPort for TokioTimer {
    fn schedule(&self, delay: Duration, task: TimerTask) {
        self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
    }
}
