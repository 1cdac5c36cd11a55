// Copyright 2026 the Segno Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Segno Hit: hit testing for the annotation overlay.
//!
//! Two questions are answered here, both in page space:
//!
//! - Which stroke, if any, is under the pointer? ([`topmost_hit`])
//! - Which resize handle of a selected stroke's bounding box, if any, was
//!   grabbed? ([`hit_handle`])
//!
//! Stroke hits use **per-point proximity**: a stroke is hit when any of its
//! stored points lies within [`HitParams::stroke_tolerance`] of the query
//! point. This is deliberately not a segment-distance test: a fast stroke
//! with sparse points has gaps between samples that do not register a hit,
//! and tools that relied on the historical behavior expect exactly that.
//!
//! Strokes are tested topmost (most recently drawn) first, mirroring paint
//! order, so overlapping strokes resolve to the one painted on top.
//!
//! ```rust
//! use kurbo::Point;
//! use peniko::Color;
//! use segno_annotations::{Annotation, AnnotationSet};
//! use segno_hit::{HitParams, topmost_hit};
//!
//! let mut set = AnnotationSet::new();
//! let id = set.push(Annotation::new(
//!     vec![Point::new(100.0, 100.0), Point::new(110.0, 100.0)],
//!     Color::from_rgba8(255, 0, 0, 255),
//! ));
//!
//! let params = HitParams::default();
//! assert_eq!(topmost_hit(Point::new(103.0, 102.0), &set, &params), Some(id));
//! assert_eq!(topmost_hit(Point::new(50.0, 50.0), &set, &params), None);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod handles;

pub use handles::{Handle, hit_handle};

use kurbo::Point;
use segno_annotations::{AnnotationId, AnnotationSet};

/// Tolerances for hit testing, in page units.
///
/// Both values are expressed in page space, so on-screen hit slop grows and
/// shrinks with zoom; at typical sheet-music zoom levels this matches what
/// a fingertip covers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitParams {
    /// Maximum distance from a stroke point that still counts as a hit.
    pub stroke_tolerance: f64,
    /// Maximum distance from a bounding-box corner that still grabs its
    /// resize handle.
    pub handle_tolerance: f64,
}

impl Default for HitParams {
    fn default() -> Self {
        Self {
            stroke_tolerance: 5.0,
            handle_tolerance: 10.0,
        }
    }
}

/// Returns `true` if any of the stroke's points lies within `tolerance` of
/// `pt`.
#[must_use]
pub fn stroke_contains(pt: Point, points: &[Point], tolerance: f64) -> bool {
    let limit_sq = tolerance * tolerance;
    points.iter().any(|p| p.distance_squared(pt) <= limit_sq)
}

/// Finds the topmost stroke under `pt`, if any.
///
/// Strokes are tested in reverse insertion order (topmost first) and the
/// first per-point proximity hit wins.
#[must_use]
pub fn topmost_hit(pt: Point, set: &AnnotationSet, params: &HitParams) -> Option<AnnotationId> {
    set.iter_topmost_first()
        .find(|(_, annotation)| stroke_contains(pt, annotation.points(), params.stroke_tolerance))
        .map(|(id, _)| id)
}
