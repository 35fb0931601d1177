// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Cart store behavior under the virtual clock: totals, bounce timing, and
//! subscriptions.
#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use dropcart_core::{Catalog, CartStore, Price, Product};
use dropcart_port::ManualTimer;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn setup() -> (Catalog, CartStore, Arc<ManualTimer>) {
    let timer = Arc::new(ManualTimer::new());
    let store = CartStore::new(timer.clone());
    (Catalog::builtin(), store, timer)
}

fn product(catalog: &Catalog, id: &str) -> Arc<Product> {
    catalog.lookup(id).unwrap()
}

#[test]
fn reference_scenario() {
    let (catalog, store, _timer) = setup();

    store.add_to_cart(&product(&catalog, "1"));
    let snap = store.snapshot();
    assert_eq!(snap.entries.len(), 1);
    assert_eq!(snap.entries[0].quantity(), 1);
    assert_eq!(snap.subtotal, Price::from_cents(12999));
    assert_eq!(snap.item_count, 1);

    store.add_to_cart(&product(&catalog, "1"));
    let snap = store.snapshot();
    assert_eq!(snap.entries.len(), 1);
    assert_eq!(snap.entries[0].quantity(), 2);
    assert_eq!(snap.subtotal.to_string(), "259.98");
    assert_eq!(snap.item_count, 2);

    store.add_to_cart(&product(&catalog, "3"));
    let snap = store.snapshot();
    let lines: Vec<(&str, u32)> = snap
        .entries
        .iter()
        .map(|e| (e.product().id.as_str(), e.quantity()))
        .collect();
    assert_eq!(lines, vec![("1", 2), ("3", 1)]);
    assert_eq!(snap.subtotal.to_string(), "309.97");
    assert_eq!(snap.item_count, 3);

    store.clear_cart();
    let snap = store.snapshot();
    assert!(snap.entries.is_empty());
    assert_eq!(snap.subtotal, Price::ZERO);
    assert_eq!(snap.item_count, 0);
}

#[test]
fn single_add_bounces_for_window() {
    let (catalog, store, timer) = setup();
    assert!(!store.bounce_active());

    store.add_to_cart(&product(&catalog, "2"));
    assert!(store.bounce_active());

    timer.advance(ms(199));
    assert!(store.bounce_active());
    timer.advance(ms(1));
    assert!(!store.bounce_active());
}

#[test]
fn rapid_adds_extend_window_from_last_add() {
    let (catalog, store, timer) = setup();
    let p = product(&catalog, "4");

    store.add_to_cart(&p);
    timer.advance(ms(150));
    store.add_to_cart(&p);

    // First add's reset is due at 200 but belongs to a stale generation.
    timer.advance(ms(100));
    assert!(store.bounce_active());

    timer.advance(ms(49));
    assert!(store.bounce_active());
    timer.advance(ms(1));
    assert!(!store.bounce_active());
    assert_eq!(timer.pending(), 0);
}

#[test]
fn clear_does_not_touch_bounce() {
    let (catalog, store, timer) = setup();
    store.clear_cart();
    assert!(!store.bounce_active());
    assert_eq!(timer.pending(), 0);

    store.add_to_cart(&product(&catalog, "5"));
    store.clear_cart();
    assert!(store.bounce_active());
    store.clear_cart();
    assert_eq!(store.item_count(), 0);
}

#[test]
fn custom_bounce_window() {
    let timer = Arc::new(ManualTimer::new());
    let store = CartStore::with_bounce_duration(timer.clone(), ms(50));
    store.add_to_cart(&Catalog::builtin().lookup("6").unwrap());
    timer.advance(ms(50));
    assert!(!store.bounce_active());
    assert_eq!(store.bounce_duration(), ms(50));
}

#[test]
fn subscribers_see_each_transition() {
    let (catalog, store, timer) = setup();
    let mut rx = store.subscribe();
    assert!(!rx.has_changed().unwrap());

    store.add_to_cart(&product(&catalog, "1"));
    assert!(rx.has_changed().unwrap());
    {
        let snap = rx.borrow_and_update();
        assert_eq!(snap.item_count, 1);
        assert!(snap.bounce_active);
    }

    timer.advance(ms(200));
    assert!(rx.has_changed().unwrap());
    assert!(!rx.borrow_and_update().bounce_active);

    store.clear_cart();
    assert!(rx.has_changed().unwrap());
    assert!(rx.borrow_and_update().entries.is_empty());
}

#[test]
fn stale_reset_does_not_notify() {
    let (catalog, store, timer) = setup();
    let p = product(&catalog, "1");
    store.add_to_cart(&p);
    timer.advance(ms(100));
    store.add_to_cart(&p);

    let mut rx = store.subscribe();
    let _ = rx.borrow_and_update();
    timer.advance(ms(100));
    assert!(!rx.has_changed().unwrap());
    timer.advance(ms(100));
    assert!(rx.has_changed().unwrap());
}
