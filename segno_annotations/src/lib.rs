// Copyright 2026 the Segno Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Segno Annotations: the freehand annotation model and store.
//!
//! This crate owns the data side of the annotation overlay: continuous
//! freehand strokes ([`Annotation`]) anchored in page space, and the ordered
//! collection holding the strokes of the currently displayed page
//! ([`AnnotationSet`]). It knows nothing about pointer input, tools, or
//! painting; the interaction layer drives it and the host persists it.
//!
//! ## Identity
//!
//! Annotations are identified by [`AnnotationId`], a handle issued by the
//! set on insertion. Ids are unique for the lifetime of a set and never
//! reused, so a handle that outlives its annotation (after an erase or a
//! page switch) simply stops resolving; it can never alias a different
//! stroke. Mutation (`translate`, `scale_non_uniform`) rewrites a stroke's
//! points in place and leaves its id untouched, which is what keeps a
//! "selected annotation" handle valid across a move or resize gesture.
//!
//! ## Ordering
//!
//! The set is insertion-ordered and that order is the z-order: later
//! strokes paint on top of earlier ones and are found first by hit testing
//! (via [`AnnotationSet::iter_topmost_first`]).
//!
//! ## Persistence
//!
//! [`StrokeData`]/[`ColorData`] mirror the host's persistence shape (point
//! pairs plus an RGBA color with components in `[0, 1]`). They are plain
//! data; with the `serde` feature they derive `Serialize`/`Deserialize`.
//! [`AnnotationSet::from_snapshot`] validates on the way in and is the
//! host's hook for rejecting corrupt stored data before it reaches the
//! overlay.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Vec2};
//! use peniko::Color;
//! use segno_annotations::{Annotation, AnnotationSet};
//!
//! let mut set = AnnotationSet::new();
//! let id = set.push(Annotation::new(
//!     vec![Point::new(10.0, 10.0), Point::new(20.0, 15.0)],
//!     Color::from_rgba8(255, 0, 0, 255),
//! ));
//!
//! set.translate(id, Vec2::new(5.0, 0.0));
//! assert_eq!(set.get(id).unwrap().points()[0], Point::new(15.0, 10.0));
//!
//! // Round-trip through the persistence shape.
//! let restored = AnnotationSet::from_snapshot(&set.snapshot()).unwrap();
//! assert_eq!(restored.len(), 1);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod annotation;
mod set;
mod snapshot;

pub use annotation::Annotation;
pub use set::{AnnotationId, AnnotationSet};
pub use snapshot::{ColorData, SnapshotError, StrokeData};
