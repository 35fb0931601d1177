// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Drop-target geometry and burst origin normalization.

use dropcart_port::Origin;

/// Origin used when the drop target's geometry is unavailable (upper right).
pub const FALLBACK_ORIGIN: Origin = Origin::new(0.8, 0.3);

/// Bounding box in CSS pixels, relative to the viewport's top-left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    /// Distance from the viewport's left edge.
    pub left: f64,
    /// Distance from the viewport's top edge.
    pub top: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Rect {
    /// Build a rect.
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Center point.
    pub fn center(&self) -> (f64, f64) {
        (
            self.left + self.width / 2.0,
            self.top + self.height / 2.0,
        )
    }

    fn is_finite(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }
}

/// Viewport size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Viewport {
    /// Build a viewport.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Positive, finite dimensions.
    pub fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Normalized center of `target` within `viewport`.
///
/// Returns `fallback` when the target is missing, the rect is not finite, or
/// the viewport has no usable area.
pub fn burst_origin(target: Option<Rect>, viewport: Viewport, fallback: Origin) -> Origin {
    let Some(rect) = target.filter(Rect::is_finite) else {
        return fallback;
    };
    if !viewport.is_usable() {
        return fallback;
    }
    let (cx, cy) = rect.center();
    Origin::try_new(cx / viewport.width, cy / viewport.height).unwrap_or(fallback)
}
