// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Explicit application context.
//!
//! Components receive an [`AppContext`] by reference instead of reaching for
//! ambient state. Asking for a service that was never provided is a
//! programming error and surfaces as a [`ContextError`] at the call site.

use std::fmt;

use dropcart_port::SharedEffectSink;
use thiserror::Error;

use crate::store::CartStore;

/// Use-before-provide errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContextError {
    /// Cart accessed with no [`CartStore`] installed.
    #[error("cart accessed before a cart store was provided")]
    CartNotProvided,
    /// Effects accessed with no effect sink installed.
    #[error("effects accessed before an effect sink was provided")]
    EffectsNotProvided,
}

/// Holder for the session's shared services.
#[derive(Clone, Default)]
pub struct AppContext {
    cart: Option<CartStore>,
    effects: Option<SharedEffectSink>,
}

impl AppContext {
    /// Empty context; nothing provided yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the cart store.
    pub fn with_cart(mut self, cart: CartStore) -> Self {
        self.cart = Some(cart);
        self
    }

    /// Install the effect sink.
    pub fn with_effects(mut self, effects: SharedEffectSink) -> Self {
        self.effects = Some(effects);
        self
    }

    /// The cart store, or [`ContextError::CartNotProvided`].
    pub fn cart(&self) -> Result<&CartStore, ContextError> {
        self.cart.as_ref().ok_or(ContextError::CartNotProvided)
    }

    /// The effect sink, or [`ContextError::EffectsNotProvided`].
    pub fn effects(&self) -> Result<&SharedEffectSink, ContextError> {
        self.effects.as_ref().ok_or(ContextError::EffectsNotProvided)
    }
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext")
            .field("cart", &self.cart)
            .field("effects", &self.effects.is_some())
            .finish()
    }
}
