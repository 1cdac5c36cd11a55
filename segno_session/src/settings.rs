// Copyright 2026 the Segno Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-page view settings and their keyed store.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::Vec2;
use segno_page_view::Rotation;

/// Lower zoom bound enforced by the zoom controls.
pub const MIN_ZOOM: f64 = 0.1;
/// Upper zoom bound enforced by the zoom controls.
pub const MAX_ZOOM: f64 = 3.0;
/// Multiplicative step of one zoom-in/zoom-out control press.
pub const ZOOM_STEP: f64 = 1.1;

/// How one page of one document is displayed: zoom, rotation, and scroll
/// position.
///
/// The defaults are what a page gets on first view: zoom 1.0, unrotated,
/// scrolled to the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageViewSettings {
    /// Zoom factor, kept within `[MIN_ZOOM, MAX_ZOOM]` by the controls.
    pub zoom: f64,
    /// Quarter-turn display rotation.
    pub rotation: Rotation,
    /// Scroll offset of the viewport within the page, in view pixels.
    pub scroll: Vec2,
}

impl Default for PageViewSettings {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            rotation: Rotation::Deg0,
            scroll: Vec2::ZERO,
        }
    }
}

impl PageViewSettings {
    /// One press of the zoom-in control.
    #[must_use]
    pub fn zoomed_in(self) -> Self {
        Self {
            zoom: (self.zoom * ZOOM_STEP).min(MAX_ZOOM),
            ..self
        }
    }

    /// One press of the zoom-out control.
    #[must_use]
    pub fn zoomed_out(self) -> Self {
        Self {
            zoom: (self.zoom / ZOOM_STEP).max(MIN_ZOOM),
            ..self
        }
    }

    /// One press of the rotate control: a further 90° clockwise.
    #[must_use]
    pub fn rotated_cw(self) -> Self {
        Self {
            rotation: self.rotation.rotated_cw(),
            ..self
        }
    }
}

/// One stored row of per-page settings, in the host persistence shape.
///
/// Rotation travels as degrees so stored files stay readable; rows with a
/// rotation that is not a quarter turn, or a non-finite zoom, are treated
/// as absent on load rather than failing the whole store.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageSettingsData<D> {
    /// Document the row belongs to.
    pub document: D,
    /// Zero-based page index within the document.
    pub page: u32,
    /// Stored zoom factor.
    pub zoom: f64,
    /// Stored rotation in degrees (0, 90, 180, or 270).
    pub rotation_degrees: u16,
    /// Stored horizontal scroll offset.
    pub scroll_x: f64,
    /// Stored vertical scroll offset.
    pub scroll_y: f64,
}

impl<D> PageSettingsData<D> {
    fn to_settings(&self) -> Option<PageViewSettings> {
        if !self.zoom.is_finite() || self.zoom <= 0.0 {
            return None;
        }
        let rotation = Rotation::from_degrees(i32::from(self.rotation_degrees))?;
        if !(self.scroll_x.is_finite() && self.scroll_y.is_finite()) {
            return None;
        }
        Some(PageViewSettings {
            zoom: self.zoom,
            rotation,
            scroll: Vec2::new(self.scroll_x, self.scroll_y),
        })
    }
}

/// Remembered [`PageViewSettings`] per (document, page).
///
/// Generic over the document key `D`: a path, a library id, whatever the
/// host uses to identify a score. Unknown pages read back as
/// [`PageViewSettings::default`], so a freshly opened score behaves
/// sensibly without any stored state.
#[derive(Clone, Debug)]
pub struct SettingsStore<D> {
    documents: HashMap<D, HashMap<u32, PageViewSettings>>,
}

impl<D> Default for SettingsStore<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> SettingsStore<D> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            documents: HashMap::new(),
        }
    }

    /// Returns `true` if no settings are remembered for any document.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.values().all(HashMap::is_empty)
    }
}

impl<D> SettingsStore<D>
where
    D: Eq + Hash,
{
    /// Returns the remembered settings for a page, or the defaults.
    #[must_use]
    pub fn get(&self, document: &D, page: u32) -> PageViewSettings {
        self.documents
            .get(document)
            .and_then(|pages| pages.get(&page))
            .copied()
            .unwrap_or_default()
    }

    /// Remembers the settings for a page, replacing any previous entry.
    pub fn set(&mut self, document: D, page: u32, settings: PageViewSettings) {
        self.documents
            .entry(document)
            .or_default()
            .insert(page, settings);
    }

    /// Forgets everything remembered about a document.
    pub fn forget_document(&mut self, document: &D) {
        self.documents.remove(document);
    }

    /// Builds a store from persistence rows.
    ///
    /// Rows that fail validation (see [`PageSettingsData`]) are skipped;
    /// their pages simply fall back to defaults, matching how the viewer
    /// treats unreadable stored settings.
    #[must_use]
    pub fn from_snapshot<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = PageSettingsData<D>>,
    {
        let mut store = Self::new();
        for row in rows {
            if let Some(settings) = row.to_settings() {
                store.set(row.document, row.page, settings);
            }
        }
        store
    }
}

impl<D> SettingsStore<D>
where
    D: Eq + Hash + Clone,
{
    /// Serializes the store into persistence rows.
    ///
    /// Row order is unspecified; the store is a map, not a sequence.
    #[must_use]
    pub fn snapshot(&self) -> Vec<PageSettingsData<D>> {
        let mut rows = Vec::new();
        for (document, pages) in &self.documents {
            for (&page, settings) in pages {
                rows.push(PageSettingsData {
                    document: document.clone(),
                    page,
                    zoom: settings.zoom,
                    rotation_degrees: settings.rotation.degrees(),
                    scroll_x: settings.scroll.x,
                    scroll_y: settings.scroll.y,
                });
            }
        }
        rows
    }
}
