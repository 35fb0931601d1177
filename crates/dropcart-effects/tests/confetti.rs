// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Staggering tests for the confetti sink, driven by the virtual clock.

use std::sync::Arc;
use std::time::Duration;

use dropcart_effects::{effect_channel, phases, ConfettiSink, RecordingEmitter, RecordingSink};
use dropcart_port::{BurstRequest, EffectSink, ManualTimer, Origin};

#[test]
fn primary_fires_immediately_and_sides_follow() {
    let emitter = Arc::new(RecordingEmitter::new());
    let timer = Arc::new(ManualTimer::new());
    let sink = ConfettiSink::new(Arc::clone(&emitter), Arc::clone(&timer));

    sink.burst(BurstRequest::at(Origin::new(0.7, 0.4)));
    assert_eq!(emitter.count(), 1);
    assert_eq!(emitter.bursts()[0].particle_count, 100);
    assert_eq!(timer.pending(), 2);

    timer.advance(Duration::from_millis(100));
    assert_eq!(emitter.count(), 2);
    assert_eq!(emitter.bursts()[1].angle, 60.0);

    timer.advance(Duration::from_millis(100));
    let bursts = emitter.bursts();
    assert_eq!(bursts.len(), 3);
    assert_eq!(bursts[2].angle, 120.0);
    assert!(bursts.iter().all(|b| b.origin == Origin::new(0.7, 0.4)));
    assert!(bursts[1..].iter().all(|b| b.particle_count == 50));
}

#[test]
fn overlapping_requests_are_additive() {
    let emitter = Arc::new(RecordingEmitter::new());
    let timer = Arc::new(ManualTimer::new());
    let sink = ConfettiSink::new(Arc::clone(&emitter), Arc::clone(&timer));

    sink.burst(BurstRequest::default());
    timer.advance(Duration::from_millis(50));
    sink.burst(BurstRequest::default());
    timer.advance(Duration::from_millis(500));

    assert_eq!(emitter.count(), 6);
}

#[test]
fn phase_plan_offsets() {
    let plan = phases(&BurstRequest::default());
    let delays: Vec<u128> = plan.iter().map(|p| p.delay.as_millis()).collect();
    assert_eq!(delays, vec![0, 100, 200]);
    assert_eq!(plan[1].burst.spread, 55.0);
    assert_eq!(plan[2].burst.start_velocity, 25.0);
}

#[test]
fn every_phase_carries_request_duration() {
    let emitter = Arc::new(RecordingEmitter::new());
    let timer = Arc::new(ManualTimer::new());
    let sink = ConfettiSink::new(Arc::clone(&emitter), Arc::clone(&timer));

    let request = BurstRequest {
        duration: Some(Duration::from_millis(1500)),
        ..BurstRequest::default()
    };
    sink.burst(request);
    timer.advance(Duration::from_millis(200));

    let bursts = emitter.bursts();
    assert_eq!(bursts.len(), 3);
    assert!(bursts
        .iter()
        .all(|b| b.duration == Some(Duration::from_millis(1500))));

    let silent = phases(&BurstRequest {
        duration: None,
        ..BurstRequest::default()
    });
    assert!(silent.iter().all(|p| p.burst.duration.is_none()));
}

#[test]
fn inbox_pump_forwards_in_order() {
    let (sink, inbox) = effect_channel();
    sink.burst(BurstRequest::at(Origin::new(0.1, 0.1)));
    sink.burst(BurstRequest::at(Origin::new(0.2, 0.2)));

    let recorder = RecordingSink::new();
    assert_eq!(inbox.pump(&recorder, 16), 2);
    let origins: Vec<Origin> = recorder.requests().iter().map(|r| r.origin).collect();
    assert_eq!(origins, vec![Origin::new(0.1, 0.1), Origin::new(0.2, 0.2)]);
}
