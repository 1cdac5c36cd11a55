// Copyright 2026 the Segno Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Segno Page View: the coordinate transform between the on-screen viewport
//! and the document page.
//!
//! This crate provides a small, headless model of how one page of a paged
//! document is currently displayed: its intrinsic size in document units,
//! the viewport size in device pixels, a zoom factor, and a quarter-turn
//! rotation. From those parameters it derives a bidirectional mapping
//! between **view space** (pixels, as reported by pointer input) and
//! **page space** (the coordinate system of the unrotated page at zoom 1.0,
//! in which annotations are stored).
//!
//! It does **not** render anything and owns no page content. Callers are
//! expected to:
//! - Feed it the current page/viewport sizes, zoom, and rotation.
//! - Map pointer positions into page space before hit testing or editing
//!   annotations.
//! - Map stored page-space geometry back into view space before painting.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use segno_page_view::PageView;
//!
//! let mut view = PageView::new();
//! view.set_page_size(Size::new(800.0, 1000.0));
//! view.set_viewport_size(Size::new(400.0, 500.0));
//!
//! // A pointer event at view (100, 100) lands at page (200, 200).
//! let page_pt = view.view_to_page_point(Point::new(100.0, 100.0));
//! assert_eq!(page_pt, Point::new(200.0, 200.0));
//! ```
//!
//! ## Design notes
//!
//! - Viewport scaling is **per axis**; the viewport need not preserve the
//!   page's aspect ratio.
//! - Rotation is restricted to quarter turns ([`Rotation`]) and uses exact
//!   sine/cosine coefficients, so view↔page round trips are exact up to
//!   ordinary floating-point rounding.
//! - Before a page is loaded or laid out, one or more dimensions are zero;
//!   both mapping directions are then the identity function rather than a
//!   division fault.
//!
//! This crate is `no_std`.

#![no_std]

mod page_view;
mod rotation;

pub use page_view::PageView;
pub use rotation::Rotation;
