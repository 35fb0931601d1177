// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Deferred-callback port plus a deterministic in-process implementation.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// A fire-once deferred callback.
pub type TimerTask = Box<dyn FnOnce() + Send + 'static>;

/// Timer facility used for every deferred action (bounce reset, staggered
/// bursts).
///
/// There is no cancellation: once scheduled, a task runs. Callers that need
/// "only the latest one counts" semantics must gate inside the task.
pub trait TimerPort {
    /// Run `task` once after `delay` has elapsed.
    fn schedule(&self, delay: Duration, task: TimerTask);
}

/// Shared, thread-safe timer handle.
pub type SharedTimer = Arc<dyn TimerPort + Send + Sync>;

impl<T: TimerPort + ?Sized> TimerPort for Arc<T> {
    fn schedule(&self, delay: Duration, task: TimerTask) {
        (**self).schedule(delay, task);
    }
}

struct Pending {
    due: Duration,
    seq: u64,
    task: TimerTask,
}

#[derive(Default)]
struct ManualState {
    now: Duration,
    next_seq: u64,
    pending: Vec<Pending>,
}

/// Virtual-clock timer for headless hosts and tests.
///
/// Nothing fires until [`ManualTimer::advance`] is called. Tasks run in
/// deadline order; tasks with equal deadlines run in the order they were
/// scheduled. A task that schedules another task which falls due inside the
/// same advance window runs in that same call.
#[derive(Default)]
pub struct ManualTimer {
    state: Mutex<ManualState>,
}

impl ManualTimer {
    /// Create a timer at virtual time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).now
    }

    /// Number of tasks not yet run.
    pub fn pending(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pending
            .len()
    }

    /// Move the clock forward by `by`, running every task that falls due.
    ///
    /// Returns the number of tasks run.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now() + by;
        let mut ran = 0;
        loop {
            // The lock is released before the task runs so tasks may reschedule.
            let task = {
                let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
                let next = state
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.due <= target)
                    .min_by_key(|(_, p)| (p.due, p.seq))
                    .map(|(idx, _)| idx);
                match next {
                    Some(idx) => {
                        let pending = state.pending.swap_remove(idx);
                        state.now = pending.due;
                        pending.task
                    }
                    None => {
                        state.now = target;
                        break;
                    }
                }
            };
            task();
            ran += 1;
        }
        ran
    }
}

impl TimerPort for ManualTimer {
    fn schedule(&self, delay: Duration, task: TimerTask) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let seq = state.next_seq;
        state.next_seq += 1;
        let due = state.now + delay;
        state.pending.push(Pending { due, seq, task });
    }
}

impl fmt::Debug for ManualTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("ManualTimer")
            .field("now", &state.now)
            .field("pending", &state.pending.len())
            .finish()
    }
}
