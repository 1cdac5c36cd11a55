// Copyright 2026 the Segno Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::{Point, Rect, Vec2};
use peniko::Color;

/// One continuous freehand stroke, stored as page-space points plus a color.
///
/// Points are always page space (the unrotated page at zoom 1.0), never
/// view space; that is what keeps a stroke stable when the host changes
/// zoom, rotation, or viewport size underneath it. A stroke that lives in an
/// [`AnnotationSet`](crate::AnnotationSet) always has at least one point.
#[derive(Clone, Debug, PartialEq)]
pub struct Annotation {
    points: Vec<Point>,
    color: Color,
}

impl Annotation {
    /// Creates a stroke from its points and color.
    #[must_use]
    pub fn new(points: Vec<Point>, color: Color) -> Self {
        Self { points, color }
    }

    /// Returns the stroke's points in drawing order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Returns the stroke color.
    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the axis-aligned bounding box of the points.
    ///
    /// Computed on demand, never stored. An empty point list yields
    /// `Rect::ZERO`; a single point yields a zero-size rect at that point.
    #[must_use]
    pub fn bounding_box(&self) -> Rect {
        let mut it = self.points.iter();
        let Some(first) = it.next() else {
            return Rect::ZERO;
        };
        it.fold(Rect::from_points(*first, *first), |acc, pt| {
            acc.union_pt(*pt)
        })
    }

    /// Offsets every point by `delta`, in place.
    pub fn translate(&mut self, delta: Vec2) {
        for pt in &mut self.points {
            *pt += delta;
        }
    }

    /// Scales every point about `anchor` by per-axis factors, in place.
    ///
    /// Each point becomes `(p - anchor) * (sx, sy) + anchor`; the anchor
    /// itself is a fixed point of the mapping.
    pub fn scale_about(&mut self, anchor: Point, sx: f64, sy: f64) {
        for pt in &mut self.points {
            pt.x = (pt.x - anchor.x) * sx + anchor.x;
            pt.y = (pt.y - anchor.y) * sy + anchor.y;
        }
    }
}
