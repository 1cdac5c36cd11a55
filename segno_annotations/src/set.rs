// Copyright 2026 the Segno Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::{Point, Vec2};

use crate::annotation::Annotation;

/// Handle to one annotation inside an [`AnnotationSet`].
///
/// Ids are issued by the set on insertion, are unique for the lifetime of
/// that set, and are never reused: removing a stroke retires its id
/// permanently. A stale id therefore never resolves to a different stroke;
/// operations given one are no-ops (or return `None`/`false`).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct AnnotationId(u64);

#[derive(Debug, PartialEq)]
struct Entry {
    id: AnnotationId,
    annotation: Annotation,
}

/// The ordered stroke collection of the currently displayed page.
///
/// Insertion order is the z-order: later strokes paint on top and are
/// hit-tested first. Lookup by id is a linear scan; a page carries tens of
/// strokes, not thousands, and the scan keeps ids free of any ordering or
/// hashing constraints.
#[derive(Debug, Default, PartialEq)]
pub struct AnnotationSet {
    entries: Vec<Entry>,
    next_id: u64,
}

impl AnnotationSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Returns the number of strokes in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the set holds no strokes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends a stroke on top of the z-order and returns its id.
    ///
    /// # Panics (debug only)
    ///
    /// Panics in debug builds if the stroke has no points; callers commit
    /// only strokes with at least one recorded point.
    pub fn push(&mut self, annotation: Annotation) -> AnnotationId {
        debug_assert!(
            !annotation.points().is_empty(),
            "strokes in a set must have at least one point"
        );
        let id = AnnotationId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, annotation });
        id
    }

    /// Removes the stroke with the given id, returning it if present.
    pub fn remove(&mut self, id: AnnotationId) -> Option<Annotation> {
        let idx = self.position_of(id)?;
        Some(self.entries.remove(idx).annotation)
    }

    /// Removes every stroke. Issued ids stay retired.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Replaces the whole collection, issuing fresh ids.
    ///
    /// Ids handed out before the replacement no longer resolve.
    pub fn replace_all<I>(&mut self, annotations: I)
    where
        I: IntoIterator<Item = Annotation>,
    {
        self.entries.clear();
        for annotation in annotations {
            self.push(annotation);
        }
    }

    /// Returns `true` if the id still resolves to a stroke.
    #[must_use]
    pub fn contains(&self, id: AnnotationId) -> bool {
        self.position_of(id).is_some()
    }

    /// Returns the stroke with the given id, if it is still present.
    #[must_use]
    pub fn get(&self, id: AnnotationId) -> Option<&Annotation> {
        self.position_of(id).map(|idx| &self.entries[idx].annotation)
    }

    /// Iterates strokes bottom-to-top, i.e. in paint order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (AnnotationId, &Annotation)> {
        self.entries.iter().map(|e| (e.id, &e.annotation))
    }

    /// Iterates strokes top-to-bottom, i.e. in hit-test order.
    pub fn iter_topmost_first(&self) -> impl Iterator<Item = (AnnotationId, &Annotation)> {
        self.iter().rev()
    }

    /// Offsets every point of the stroke by `delta`.
    ///
    /// Returns `false` (and does nothing) if the id no longer resolves.
    pub fn translate(&mut self, id: AnnotationId, delta: Vec2) -> bool {
        match self.get_mut(id) {
            Some(annotation) => {
                annotation.translate(delta);
                true
            }
            None => false,
        }
    }

    /// Scales the stroke about an anchor by per-axis factors.
    ///
    /// When `anchor` is `None`, the stroke's bounding-box origin (its
    /// top-left corner) is used. Returns `false` (and does nothing) if the
    /// id no longer resolves.
    pub fn scale_non_uniform(
        &mut self,
        id: AnnotationId,
        sx: f64,
        sy: f64,
        anchor: Option<Point>,
    ) -> bool {
        match self.get_mut(id) {
            Some(annotation) => {
                let anchor = anchor.unwrap_or_else(|| annotation.bounding_box().origin());
                annotation.scale_about(anchor, sx, sy);
                true
            }
            None => false,
        }
    }

    fn get_mut(&mut self, id: AnnotationId) -> Option<&mut Annotation> {
        let idx = self.position_of(id)?;
        Some(&mut self.entries[idx].annotation)
    }

    fn position_of(&self, id: AnnotationId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }
}
