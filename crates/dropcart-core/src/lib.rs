// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Cart state machine and drop coordination for dropcart.
//!
//! Keeps UI adapters thin: presentation subscribes to [`CartStore`]
//! snapshots and forwards drops to a [`DropCoordinator`]; everything with a
//! timing or ordering contract lives here.

pub mod bounce;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod context;
pub mod drop;
pub mod geometry;
pub mod runtime;
pub mod settings;
pub mod store;

pub use bounce::{BounceFlag, BounceState, BounceToken, BOUNCE_DURATION};
pub use cart::{Cart, CartEntry};
pub use catalog::{Catalog, CatalogError, Price, Product, ProductId};
pub use context::{AppContext, ContextError};
pub use drop::{
    DragPayload, DropCoordinator, DropEffect, DropOutcome, DropTarget, DropZone, DRAG_MEDIA_TYPE,
};
pub use geometry::{burst_origin, Rect, Viewport, FALLBACK_ORIGIN};
pub use settings::{BurstDefaults, CartSettings};
pub use store::{CartSnapshot, CartStore};
