// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Drag/drop boundary: payload contract, drop-zone highlight, and the
//! coordinator that turns a drop into a cart add plus a burst.

use std::sync::Arc;

use dropcart_port::{EffectSink, Origin, SharedEffectSink};

use crate::catalog::{Catalog, Product};
use crate::context::{AppContext, ContextError};
use crate::geometry::{burst_origin, Rect, Viewport, FALLBACK_ORIGIN};
use crate::settings::{BurstDefaults, CartSettings};
use crate::store::CartStore;

/// Media type the payload is published under.
pub const DRAG_MEDIA_TYPE: &str = "text/plain";

/// Drop-effect hint shown while dragging over the cart.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DropEffect {
    /// Item moves into the cart.
    #[default]
    Move,
    /// Drag carries no cart payload; drop not allowed.
    None,
}

/// What a drag source publishes: exactly one string, the product id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragPayload {
    /// Media type `data` is published under.
    pub media_type: &'static str,
    /// The transferred string.
    pub data: String,
    /// Effect hint.
    pub effect: DropEffect,
}

impl DragPayload {
    /// Plain-text payload carrying `data` verbatim.
    pub fn text(data: impl Into<String>) -> Self {
        Self {
            media_type: DRAG_MEDIA_TYPE,
            data: data.into(),
            effect: DropEffect::Move,
        }
    }

    /// Payload for dragging `product`.
    pub fn for_product(product: &Product) -> Self {
        Self::text(product.id.as_str())
    }
}

/// Highlight state of the cart's drop region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DropZone {
    drag_over: bool,
}

impl DropZone {
    /// Pointer entered or moved over the zone carrying `media_type`.
    ///
    /// Only [`DRAG_MEDIA_TYPE`] highlights the zone; anything else reports
    /// [`DropEffect::None`] and leaves the highlight as it was.
    pub fn drag_over(&mut self, media_type: &str) -> DropEffect {
        if media_type != DRAG_MEDIA_TYPE {
            return DropEffect::None;
        }
        self.drag_over = true;
        DropEffect::Move
    }

    /// Pointer left the zone.
    pub fn drag_leave(&mut self) {
        self.drag_over = false;
    }

    /// Whether the zone is highlighted.
    pub fn is_drag_over(&self) -> bool {
        self.drag_over
    }
}

/// Geometry captured at the moment of the drop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DropTarget {
    /// Bounding box of the drop region, if the host could measure it.
    pub rect: Option<Rect>,
    /// Viewport dimensions.
    pub viewport: Viewport,
}

impl DropTarget {
    /// Target with measured geometry.
    pub const fn new(rect: Rect, viewport: Viewport) -> Self {
        Self {
            rect: Some(rect),
            viewport,
        }
    }

    /// Target whose geometry could not be measured.
    pub const fn unmeasured(viewport: Viewport) -> Self {
        Self {
            rect: None,
            viewport,
        }
    }
}

/// Result of [`DropCoordinator::handle_drop`].
#[derive(Clone, Debug, PartialEq)]
pub enum DropOutcome {
    /// Payload resolved; the product was added and a burst requested.
    Added {
        /// Product added.
        product: Arc<Product>,
        /// Its new quantity.
        quantity: u32,
        /// Origin the burst was requested at.
        origin: Origin,
    },
    /// Payload did not match the catalog. Nothing happened.
    Ignored,
}

/// Mediates drops into cart mutations and burst requests.
///
/// Neither the cart nor the effect sink sees interaction details.
#[derive(Clone)]
pub struct DropCoordinator {
    catalog: Arc<Catalog>,
    cart: CartStore,
    effects: SharedEffectSink,
    burst: BurstDefaults,
    fallback: Origin,
}

impl DropCoordinator {
    /// Coordinator with default burst parameters.
    pub fn new(catalog: Arc<Catalog>, cart: CartStore, effects: SharedEffectSink) -> Self {
        Self {
            catalog,
            cart,
            effects,
            burst: BurstDefaults::default(),
            fallback: FALLBACK_ORIGIN,
        }
    }

    /// Coordinator wired from `ctx`; fails if the cart or effects are missing.
    pub fn from_context(catalog: Arc<Catalog>, ctx: &AppContext) -> Result<Self, ContextError> {
        Ok(Self::new(catalog, ctx.cart()?.clone(), ctx.effects()?.clone()))
    }

    /// Apply burst parameters and fallback origin from `settings`.
    pub fn with_settings(mut self, settings: &CartSettings) -> Self {
        self.burst = settings.burst;
        self.fallback = settings.fallback_origin;
        self
    }

    /// The cart this coordinator feeds.
    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// Handle a drop of `payload` onto `target`.
    ///
    /// An unknown or empty payload is a silent no-op. On a match the cart is
    /// updated first, then the burst origin is computed from `target` and the
    /// effect sink is invoked.
    pub fn handle_drop(&self, payload: &str, target: DropTarget) -> DropOutcome {
        let Some(product) = self.catalog.lookup(payload) else {
            return DropOutcome::Ignored;
        };
        let quantity = self.cart.add_to_cart(&product);

        let origin = burst_origin(target.rect, target.viewport, self.fallback);
        self.effects.burst(self.burst.request_at(origin));

        DropOutcome::Added {
            product,
            quantity,
            origin,
        }
    }

    /// Like [`handle_drop`](Self::handle_drop), also clearing the zone's
    /// highlight whether or not the payload resolves.
    pub fn handle_drop_in(
        &self,
        zone: &mut DropZone,
        payload: &str,
        target: DropTarget,
    ) -> DropOutcome {
        zone.drag_leave();
        self.handle_drop(payload, target)
    }
}

impl std::fmt::Debug for DropCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DropCoordinator")
            .field("catalog", &self.catalog.len())
            .field("cart", &self.cart)
            .field("burst", &self.burst)
            .field("fallback", &self.fallback)
            .finish_non_exhaustive()
    }
}
