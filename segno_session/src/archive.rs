// Copyright 2026 the Segno Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-page stroke storage backing the overlay across page switches.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;
use segno_annotations::StrokeData;

/// One stored row of page strokes, in the host persistence shape.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageStrokesData<D> {
    /// Document the row belongs to.
    pub document: D,
    /// Zero-based page index within the document.
    pub page: u32,
    /// The page's strokes, in z-order.
    pub strokes: Vec<StrokeData>,
}

/// Stroke snapshots per (document, page).
///
/// This is the store the host loads the overlay engine from on every page
/// switch and writes back to whenever the engine marks its contents
/// changed. Pages with no entry read back as empty, like any page nobody
/// has annotated yet.
#[derive(Clone, Debug)]
pub struct StrokeArchive<D> {
    documents: HashMap<D, HashMap<u32, Vec<StrokeData>>>,
}

impl<D> Default for StrokeArchive<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> StrokeArchive<D> {
    /// Creates an empty archive.
    #[must_use]
    pub fn new() -> Self {
        Self {
            documents: HashMap::new(),
        }
    }

    /// Returns `true` if no strokes are stored for any document.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.values().all(HashMap::is_empty)
    }
}

impl<D> StrokeArchive<D>
where
    D: Eq + Hash,
{
    /// Returns the stored strokes for a page; empty if none were stored.
    #[must_use]
    pub fn get(&self, document: &D, page: u32) -> &[StrokeData] {
        self.documents
            .get(document)
            .and_then(|pages| pages.get(&page))
            .map_or(&[], Vec::as_slice)
    }

    /// Stores a page's strokes, replacing any previous entry.
    ///
    /// Storing an empty snapshot removes the entry, so an un-annotated
    /// page and a page whose last stroke was erased read back the same.
    pub fn set(&mut self, document: D, page: u32, strokes: Vec<StrokeData>) {
        if strokes.is_empty() {
            if let Some(pages) = self.documents.get_mut(&document) {
                pages.remove(&page);
            }
            return;
        }
        self.documents
            .entry(document)
            .or_default()
            .insert(page, strokes);
    }

    /// Forgets every page of a document.
    pub fn forget_document(&mut self, document: &D) {
        self.documents.remove(document);
    }

    /// Builds an archive from persistence rows.
    #[must_use]
    pub fn from_snapshot<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = PageStrokesData<D>>,
    {
        let mut archive = Self::new();
        for row in rows {
            archive.set(row.document, row.page, row.strokes);
        }
        archive
    }
}

impl<D> StrokeArchive<D>
where
    D: Eq + Hash + Clone,
{
    /// Serializes the archive into persistence rows.
    ///
    /// Row order is unspecified; the archive is a map, not a sequence.
    #[must_use]
    pub fn snapshot(&self) -> Vec<PageStrokesData<D>> {
        let mut rows = Vec::new();
        for (document, pages) in &self.documents {
            for (&page, strokes) in pages {
                rows.push(PageStrokesData {
                    document: document.clone(),
                    page,
                    strokes: strokes.clone(),
                });
            }
        }
        rows
    }
}
