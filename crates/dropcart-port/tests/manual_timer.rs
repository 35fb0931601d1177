// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Ordering and re-entrancy tests for the virtual-clock timer.
#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use dropcart_port::{ManualTimer, TimerPort};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn nothing_runs_before_deadline() {
    let timer = ManualTimer::new();
    let hits = Arc::new(Mutex::new(0));
    let h = Arc::clone(&hits);
    timer.schedule(ms(200), Box::new(move || *h.lock().unwrap() += 1));

    assert_eq!(timer.advance(ms(199)), 0);
    assert_eq!(*hits.lock().unwrap(), 0);
    assert_eq!(timer.pending(), 1);

    assert_eq!(timer.advance(ms(1)), 1);
    assert_eq!(*hits.lock().unwrap(), 1);
    assert_eq!(timer.pending(), 0);
    assert_eq!(timer.now(), ms(200));
}

#[test]
fn tasks_run_in_deadline_then_schedule_order() {
    let timer = ManualTimer::new();
    let log = Arc::new(Mutex::new(Vec::new()));
    for (label, delay) in [("c", 200), ("a", 100), ("b", 100)] {
        let log = Arc::clone(&log);
        timer.schedule(ms(delay), Box::new(move || log.lock().unwrap().push(label)));
    }

    assert_eq!(timer.advance(ms(500)), 3);
    assert_eq!(*log.lock().unwrap(), vec!["a", "b", "c"]);
}

#[test]
fn task_scheduled_from_task_runs_in_same_window() {
    let timer = Arc::new(ManualTimer::new());
    let log = Arc::new(Mutex::new(Vec::new()));

    let inner_timer = Arc::clone(&timer);
    let inner_log = Arc::clone(&log);
    timer.schedule(
        ms(50),
        Box::new(move || {
            inner_log.lock().unwrap().push(inner_timer.now());
            let log = Arc::clone(&inner_log);
            let t = Arc::clone(&inner_timer);
            inner_timer.schedule(ms(50), Box::new(move || log.lock().unwrap().push(t.now())));
        }),
    );

    assert_eq!(timer.advance(ms(100)), 2);
    assert_eq!(*log.lock().unwrap(), vec![ms(50), ms(100)]);
}

#[test]
fn zero_delay_runs_on_next_advance() {
    let timer = ManualTimer::new();
    let hits = Arc::new(Mutex::new(0));
    let h = Arc::clone(&hits);
    timer.schedule(Duration::ZERO, Box::new(move || *h.lock().unwrap() += 1));
    assert_eq!(*hits.lock().unwrap(), 0);
    assert_eq!(timer.advance(Duration::ZERO), 1);
    assert_eq!(*hits.lock().unwrap(), 1);
}
