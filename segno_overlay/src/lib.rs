// Copyright 2026 the Segno Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Segno Overlay: the annotation overlay engine.
//!
//! [`AnnotationOverlay`] is the piece that sits between raw pointer input
//! and the stroke collection of the currently displayed page. It owns:
//!
//! - a [`PageView`](segno_page_view::PageView) describing how the page is
//!   currently displayed (sizes, zoom, rotation),
//! - the page's [`AnnotationSet`](segno_annotations::AnnotationSet),
//! - the current selection, active [`Tool`], and in-progress gesture.
//!
//! Pointer events arrive in view space and are mapped into page space on
//! entry, so everything the engine stores survives zoom, rotation, and
//! viewport changes unchanged. One tool is active at a time; switching
//! tools mid-gesture abandons the gesture without committing anything.
//!
//! ## Talking to the host
//!
//! The engine pushes nothing. It accumulates [`OverlayDamage`] flags
//! (`PAINT` when the screen is stale, `CONTENTS` when the stroke collection
//! changed in a way worth persisting) and the host drains them with
//! [`AnnotationOverlay::take_damage`] after each delivered event.
//! `CONTENTS` is marked once per completed gesture, never once per pointer
//! move, so persistence is not flooded while a stroke is being dragged.
//!
//! Painting works the same way: [`AnnotationOverlay::draw_list`] returns
//! view-space [`PaintOp`]s (strokes, the selection box, resize handles)
//! and the host rasterizes them however it likes.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use segno_overlay::{AnnotationOverlay, OverlayDamage, Tool};
//!
//! let mut overlay = AnnotationOverlay::new();
//! overlay.set_page_size(Size::new(800.0, 1000.0));
//! overlay.set_viewport_size(Size::new(400.0, 500.0));
//!
//! overlay.set_tool(Tool::Draw);
//! overlay.pointer_down(Point::new(100.0, 100.0));
//! overlay.pointer_move(Point::new(150.0, 150.0));
//! overlay.pointer_up(Point::new(150.0, 150.0));
//!
//! assert_eq!(overlay.annotations().len(), 1);
//! assert!(overlay.take_damage().contains(OverlayDamage::CONTENTS));
//! ```

#![no_std]

extern crate alloc;

mod damage;
mod overlay;
mod paint;
mod tool;

pub use damage::OverlayDamage;
pub use overlay::AnnotationOverlay;
pub use paint::{OverlayTheme, PaintOp};
pub use tool::Tool;
