// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared cart handle: the only place cart state is mutated.
//!
//! A [`CartStore`] owns the [`Cart`] and [`BounceFlag`] behind one lock,
//! schedules bounce resets on a [`TimerPort`], and publishes a
//! [`CartSnapshot`] to subscribers after every observable change. Effect
//! sinks never touch this channel.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use dropcart_port::SharedTimer;
use tokio::sync::watch;
use tracing::debug;

use crate::bounce::{BounceFlag, BounceToken, BOUNCE_DURATION};
use crate::cart::{Cart, CartEntry};
use crate::catalog::{Price, Product};
use crate::settings::CartSettings;

/// Owned view of the cart for presentation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CartSnapshot {
    /// Entries in first-add order.
    pub entries: Vec<CartEntry>,
    /// Σ quantity.
    pub item_count: u64,
    /// Σ quantity × price.
    pub subtotal: Price,
    /// Bounce pulse running.
    pub bounce_active: bool,
}

#[derive(Default)]
struct CartInner {
    cart: Cart,
    bounce: BounceFlag,
}

impl CartInner {
    fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            entries: self.cart.entries().to_vec(),
            item_count: self.cart.item_count(),
            subtotal: self.cart.subtotal(),
            bounce_active: self.bounce.is_active(),
        }
    }
}

struct Shared {
    inner: Mutex<CartInner>,
    timer: SharedTimer,
    bounce_duration: Duration,
    tx: watch::Sender<CartSnapshot>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, CartInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, inner: &CartInner) {
        let snapshot = inner.snapshot();
        self.tx.send_modify(|current| *current = snapshot);
    }

    fn expire_bounce(&self, token: BounceToken) {
        let mut inner = self.lock();
        if inner.bounce.expire(token) {
            debug!(generation = token.generation(), "bounce idle");
            self.publish(&inner);
        }
    }
}

/// Cloneable handle to one cart session.
#[derive(Clone)]
pub struct CartStore {
    shared: Arc<Shared>,
}

impl CartStore {
    /// Empty cart with the default 200 ms bounce window.
    pub fn new(timer: SharedTimer) -> Self {
        Self::with_bounce_duration(timer, BOUNCE_DURATION)
    }

    /// Empty cart using the bounce window from `settings`.
    pub fn from_settings(timer: SharedTimer, settings: &CartSettings) -> Self {
        Self::with_bounce_duration(timer, settings.bounce_duration())
    }

    /// Empty cart with a custom bounce window.
    pub fn with_bounce_duration(timer: SharedTimer, bounce_duration: Duration) -> Self {
        let (tx, _rx) = watch::channel(CartSnapshot::default());
        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(CartInner::default()),
                timer,
                bounce_duration,
                tx,
            }),
        }
    }

    /// Add one unit of `product` and re-arm the bounce flag.
    ///
    /// Returns the line's new quantity. The reset is scheduled with the token
    /// of this arming, so only the reset belonging to the last add turns the
    /// flag off.
    pub fn add_to_cart(&self, product: &Arc<Product>) -> u32 {
        let (quantity, token) = {
            let mut inner = self.shared.lock();
            let quantity = inner.cart.add(product);
            let token = inner.bounce.arm();
            self.shared.publish(&inner);
            (quantity, token)
        };
        debug!(
            product = %product.id,
            quantity,
            generation = token.generation(),
            "added to cart"
        );

        let weak: Weak<Shared> = Arc::downgrade(&self.shared);
        self.shared.timer.schedule(
            self.shared.bounce_duration,
            Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    shared.expire_bounce(token);
                }
            }),
        );
        quantity
    }

    /// Remove every entry. No bounce. Clearing an empty cart changes nothing
    /// and notifies no one.
    pub fn clear_cart(&self) {
        let mut inner = self.shared.lock();
        if inner.cart.clear() {
            debug!("cart cleared");
            self.shared.publish(&inner);
        }
    }

    /// Current state.
    pub fn snapshot(&self) -> CartSnapshot {
        self.shared.lock().snapshot()
    }

    /// Entries in first-add order.
    pub fn entries(&self) -> Vec<CartEntry> {
        self.shared.lock().cart.entries().to_vec()
    }

    /// Total units.
    pub fn item_count(&self) -> u64 {
        self.shared.lock().cart.item_count()
    }

    /// Σ quantity × price.
    pub fn subtotal(&self) -> Price {
        self.shared.lock().cart.subtotal()
    }

    /// Units of `id` in the cart.
    pub fn quantity_of(&self, id: &str) -> u32 {
        self.shared.lock().cart.quantity_of(id)
    }

    /// Whether the bounce pulse is running.
    pub fn bounce_active(&self) -> bool {
        self.shared.lock().bounce.is_active()
    }

    /// Bounce window used by this store.
    pub fn bounce_duration(&self) -> Duration {
        self.shared.bounce_duration
    }

    /// Receive a fresh [`CartSnapshot`] after every observable change.
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.shared.tx.subscribe()
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.shared.lock();
        f.debug_struct("CartStore")
            .field("entries", &inner.cart.len())
            .field("bounce", &inner.bounce.state())
            .field("bounce_duration", &self.shared.bounce_duration)
            .finish_non_exhaustive()
    }
}
