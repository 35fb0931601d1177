// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! One-way command channel between the drop path and the effect subsystem.
//!
//! The sending half is an [`EffectSink`]; the receiving half is drained by the
//! host on its own schedule (once per frame, say). Nothing flows back.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use dropcart_port::{BurstRequest, EffectSink};

/// Sending half: forwards requests without waiting.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: Sender<BurstRequest>,
}

/// Receiving half owned by the effect subsystem.
#[derive(Debug)]
pub struct EffectInbox {
    rx: Receiver<BurstRequest>,
}

/// Create a connected sink/inbox pair.
pub fn effect_channel() -> (ChannelSink, EffectInbox) {
    let (tx, rx) = mpsc::channel();
    (ChannelSink { tx }, EffectInbox { rx })
}

impl EffectSink for ChannelSink {
    fn burst(&self, request: BurstRequest) {
        // A dropped inbox means no one is rendering; the request is discarded.
        let _ = self.tx.send(request);
    }
}

impl EffectInbox {
    /// Drain up to `max` pending requests.
    pub fn drain(&self, max: usize) -> Vec<BurstRequest> {
        let mut out = Vec::new();
        for _ in 0..max {
            match self.rx.try_recv() {
                Ok(req) => out.push(req),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        out
    }

    /// Drain up to `max` requests into `sink`. Returns how many were forwarded.
    pub fn pump<S: EffectSink + ?Sized>(&self, sink: &S, max: usize) -> usize {
        let batch = self.drain(max);
        let n = batch.len();
        for req in batch {
            sink.burst(req);
        }
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dropcart_port::Origin;

    #[test]
    fn test_drain_respects_max() {
        let (sink, inbox) = effect_channel();
        for i in 0..5 {
            sink.burst(BurstRequest::at(Origin::new(f64::from(i) / 10.0, 0.5)));
        }
        assert_eq!(inbox.drain(3).len(), 3);
        assert_eq!(inbox.drain(10).len(), 2);
        assert!(inbox.drain(10).is_empty());
    }

    #[test]
    fn test_send_after_inbox_dropped_is_silent() {
        let (sink, inbox) = effect_channel();
        drop(inbox);
        sink.burst(BurstRequest::default());
    }
}
