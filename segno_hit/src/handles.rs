// Copyright 2026 the Segno Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resize handles on a selected stroke's bounding box.

use kurbo::{Point, Rect};

use crate::HitParams;

/// One of the four bounding-box corners used to initiate a resize gesture.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Handle {
    /// The `(x0, y0)` corner.
    TopLeft,
    /// The `(x1, y0)` corner.
    TopRight,
    /// The `(x0, y1)` corner.
    BottomLeft,
    /// The `(x1, y1)` corner.
    BottomRight,
}

impl Handle {
    /// All four handles, in a fixed order.
    pub const ALL: [Self; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// The diagonally opposite corner.
    ///
    /// During a resize this corner is the anchor that stays fixed while the
    /// grabbed corner follows the pointer.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::TopLeft => Self::BottomRight,
            Self::TopRight => Self::BottomLeft,
            Self::BottomLeft => Self::TopRight,
            Self::BottomRight => Self::TopLeft,
        }
    }

    /// The handle's position on the given bounding box.
    #[must_use]
    pub fn position(self, rect: Rect) -> Point {
        match self {
            Self::TopLeft => Point::new(rect.x0, rect.y0),
            Self::TopRight => Point::new(rect.x1, rect.y0),
            Self::BottomLeft => Point::new(rect.x0, rect.y1),
            Self::BottomRight => Point::new(rect.x1, rect.y1),
        }
    }
}

/// Finds the handle of `rect` grabbed by a pointer at `pt`, if any.
///
/// Of the corners within [`HitParams::handle_tolerance`], the nearest one
/// wins; ties resolve in [`Handle::ALL`] order. Tiny bounding boxes can put
/// several corners within tolerance, and grabbing the nearest is what the
/// gesture visually suggests.
#[must_use]
pub fn hit_handle(pt: Point, rect: Rect, params: &HitParams) -> Option<Handle> {
    let limit_sq = params.handle_tolerance * params.handle_tolerance;
    let mut best: Option<(Handle, f64)> = None;
    for handle in Handle::ALL {
        let dist_sq = handle.position(rect).distance_squared(pt);
        if dist_sq <= limit_sq && best.is_none_or(|(_, d)| dist_sq < d) {
            best = Some((handle, dist_sq));
        }
    }
    best.map(|(handle, _)| handle)
}
