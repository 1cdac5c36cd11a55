// Copyright 2026 the Segno Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Segno Session: the bookkeeping a sheet-music viewer keeps between pages
//! and between runs.
//!
//! Musicians flip back and forth through a score and expect every page to
//! come back exactly as they left it: same zoom, same rotation, same scroll
//! position, same markings. This crate holds that state in memory:
//!
//! - [`PageViewSettings`] / [`SettingsStore`]: per-(document, page) zoom,
//!   rotation, and scroll memory, with the viewer's control steps
//!   (zoom ×1.1 within [0.1, 3.0], rotate in 90° increments).
//! - [`PageNavigator`]: the current page, clamped at both ends.
//! - [`StrokeArchive`]: per-(document, page) stroke snapshots, the backing
//!   store the overlay engine is loaded from on page switch.
//! - [`Setlist`]: the ordered list of scores for a concert, with
//!   reordering.
//!
//! Nothing here touches the filesystem. Each store converts to and from
//! plain snapshot rows (`serde`-enabled via the `serde` feature) and the
//! host decides where and when those rows are written.
//!
//! ## Minimal example
//!
//! ```rust
//! use segno_session::{PageViewSettings, SettingsStore};
//!
//! let mut store = SettingsStore::new();
//!
//! // Unknown pages come back with defaults.
//! let settings = store.get(&"aria.pdf", 3);
//! assert_eq!(settings, PageViewSettings::default());
//!
//! // Zoom in twice on page 3 and remember the result.
//! store.set("aria.pdf", 3, settings.zoomed_in().zoomed_in());
//! assert!(store.get(&"aria.pdf", 3).zoom > 1.2);
//!
//! // Page 4 is unaffected.
//! assert_eq!(store.get(&"aria.pdf", 4).zoom, 1.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod archive;
mod navigator;
mod setlist;
mod settings;

pub use archive::{PageStrokesData, StrokeArchive};
pub use navigator::PageNavigator;
pub use setlist::Setlist;
pub use settings::{
    MAX_ZOOM, MIN_ZOOM, PageSettingsData, PageViewSettings, SettingsStore, ZOOM_STEP,
};
