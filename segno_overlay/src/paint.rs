// Copyright 2026 the Segno Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The paint contract: plain-data draw operations in view space.

use alloc::vec::Vec;

use kurbo::{Point, Rect};
use peniko::Color;

/// Visual parameters for the overlay's own chrome.
///
/// Stroke colors come from the strokes themselves; the theme covers the
/// selection box and resize handles, plus line widths in view pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayTheme {
    /// Line width for committed and in-progress strokes.
    pub stroke_width: f64,
    /// Color of the selection bounding box.
    pub selection_color: Color,
    /// Line width of the selection bounding box.
    pub selection_width: f64,
    /// Fill color of the resize handle markers.
    pub handle_color: Color,
    /// Radius of the resize handle markers.
    pub handle_radius: f64,
}

impl Default for OverlayTheme {
    fn default() -> Self {
        Self {
            stroke_width: 2.0,
            selection_color: Color::new([0.0, 0.0, 1.0, 0.5]),
            selection_width: 3.0,
            handle_color: Color::new([0.0, 0.0, 1.0, 1.0]),
            handle_radius: 6.0,
        }
    }
}

/// One item of the overlay's draw list, fully resolved in view space.
///
/// The list is ordered bottom to top; the host draws it in order with
/// whatever rasterizer it uses for the page itself.
#[derive(Clone, Debug, PartialEq)]
pub enum PaintOp {
    /// A connected polyline through `points`.
    Stroke {
        /// Polyline vertices in view space, at least two.
        points: Vec<Point>,
        /// Stroke color.
        color: Color,
        /// Line width in view pixels.
        width: f64,
    },
    /// The outline of the selected stroke's bounding box.
    SelectionBox {
        /// Box in view space.
        rect: Rect,
        /// Outline color (typically semi-transparent).
        color: Color,
        /// Line width in view pixels.
        width: f64,
    },
    /// A filled circular marker over one resize handle.
    HandleMarker {
        /// Marker center in view space.
        center: Point,
        /// Marker radius in view pixels.
        radius: f64,
        /// Fill color.
        color: Color,
    },
}
