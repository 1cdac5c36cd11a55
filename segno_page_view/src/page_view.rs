// Copyright 2026 the Segno Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size};

use crate::rotation::Rotation;

/// Display state of one document page and the view↔page coordinate mapping
/// it implies.
///
/// `PageView` tracks the page's intrinsic size (document units), the
/// viewport size (device pixels), a zoom factor, and a quarter-turn
/// [`Rotation`]. It can be used to:
/// - Convert pointer positions from view space into page space.
/// - Convert stored page-space geometry back into view space for painting.
///
/// The mapping is rebuilt whenever a parameter changes and cached as a pair
/// of affines, so conversions are cheap.
///
/// View→page applies, in order: per-axis scaling by the page/viewport
/// ratios, division by the zoom factor, and rotation by the inverse display
/// angle about the zoom-scaled page center. Page→view is the exact affine
/// inverse.
#[derive(Clone, Debug)]
pub struct PageView {
    page_size: Size,
    viewport_size: Size,
    zoom: f64,
    rotation: Rotation,
    page_to_view: Affine,
    view_to_page: Affine,
}

impl Default for PageView {
    fn default() -> Self {
        Self::new()
    }
}

impl PageView {
    /// Creates a view with no page loaded.
    ///
    /// - Page and viewport sizes are zero, so the mapping starts out as the
    ///   identity function.
    /// - Initial zoom is `1.0` and the page is unrotated.
    #[must_use]
    pub fn new() -> Self {
        Self {
            page_size: Size::ZERO,
            viewport_size: Size::ZERO,
            zoom: 1.0,
            rotation: Rotation::Deg0,
            page_to_view: Affine::IDENTITY,
            view_to_page: Affine::IDENTITY,
        }
    }

    /// Returns the page's intrinsic size in document units.
    #[must_use]
    pub fn page_size(&self) -> Size {
        self.page_size
    }

    /// Sets the page's intrinsic size in document units.
    pub fn set_page_size(&mut self, size: Size) {
        if self.page_size == size {
            return;
        }
        self.page_size = size;
        self.rebuild_transforms();
    }

    /// Returns the viewport size in device pixels.
    #[must_use]
    pub fn viewport_size(&self) -> Size {
        self.viewport_size
    }

    /// Sets the viewport size in device pixels.
    pub fn set_viewport_size(&mut self, size: Size) {
        if self.viewport_size == size {
            return;
        }
        self.viewport_size = size;
        self.rebuild_transforms();
    }

    /// Returns the current zoom factor.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom factor.
    ///
    /// Non-finite or non-positive values are ignored; the view keeps its
    /// previous zoom.
    pub fn set_zoom(&mut self, zoom: f64) {
        if !zoom.is_finite() || zoom <= 0.0 {
            return;
        }
        if (self.zoom - zoom).abs() < f64::EPSILON {
            return;
        }
        self.zoom = zoom;
        self.rebuild_transforms();
    }

    /// Returns the current display rotation.
    #[must_use]
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Sets the display rotation.
    pub fn set_rotation(&mut self, rotation: Rotation) {
        if self.rotation == rotation {
            return;
        }
        self.rotation = rotation;
        self.rebuild_transforms();
    }

    /// Returns `true` while the mapping is the identity fallback.
    ///
    /// This is the case until both the page and the viewport have non-zero,
    /// finite dimensions: before the first page is shown, or before layout
    /// has assigned the viewport a size.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        !(self.page_size.width.is_finite()
            && self.page_size.height.is_finite()
            && self.viewport_size.width.is_finite()
            && self.viewport_size.height.is_finite()
            && self.page_size.width > 0.0
            && self.page_size.height > 0.0
            && self.viewport_size.width > 0.0
            && self.viewport_size.height > 0.0)
    }

    /// Converts a view-space point (pixels) into page space.
    #[must_use]
    pub fn view_to_page_point(&self, pt: Point) -> Point {
        self.view_to_page * pt
    }

    /// Converts a page-space point into view space (pixels).
    #[must_use]
    pub fn page_to_view_point(&self, pt: Point) -> Point {
        self.page_to_view * pt
    }

    /// Converts a page-space rectangle into view space.
    ///
    /// The four corners are transformed and their bounding box returned.
    /// For the quarter-turn rotations used here the result is exact, not
    /// just a conservative cover.
    #[must_use]
    pub fn page_to_view_rect(&self, rect: Rect) -> Rect {
        let p0 = rect.origin();
        let p1 = Point::new(rect.max_x(), rect.y0);
        let p2 = Point::new(rect.x0, rect.max_y());
        let p3 = Point::new(rect.max_x(), rect.max_y());
        let q0 = self.page_to_view * p0;
        let q1 = self.page_to_view * p1;
        let q2 = self.page_to_view * p2;
        let q3 = self.page_to_view * p3;
        let min_x = q0.x.min(q1.x).min(q2.x).min(q3.x);
        let min_y = q0.y.min(q1.y).min(q2.y).min(q3.y);
        let max_x = q0.x.max(q1.x).max(q2.x).max(q3.x);
        let max_y = q0.y.max(q1.y).max(q2.y).max(q3.y);
        Rect::new(min_x, min_y, max_x, max_y)
    }

    fn rebuild_transforms(&mut self) {
        if self.is_degenerate() {
            self.page_to_view = Affine::IDENTITY;
            self.view_to_page = Affine::IDENTITY;
            return;
        }

        // The rotation pivot is the page center at the current zoom; this
        // matches how the host lays the rotated raster out in the viewport.
        let center = Point::new(
            self.page_size.width / (2.0 * self.zoom),
            self.page_size.height / (2.0 * self.zoom),
        );
        let (sin, cos) = self.rotation.sin_cos();
        let rotate = Affine::translate(center.to_vec2())
            * Affine::new([cos, sin, -sin, cos, 0.0, 0.0])
            * Affine::translate(-center.to_vec2());

        // Page → view: rotate about the center, apply zoom, then stretch
        // page units onto viewport pixels per axis.
        self.page_to_view = Affine::scale_non_uniform(
            self.viewport_size.width / self.page_size.width,
            self.viewport_size.height / self.page_size.height,
        ) * Affine::scale(self.zoom)
            * rotate;
        self.view_to_page = self.page_to_view.inverse();
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size};

    use super::{PageView, Rotation};

    fn sheet_view(rotation: Rotation) -> PageView {
        let mut view = PageView::new();
        view.set_page_size(Size::new(800.0, 1000.0));
        view.set_viewport_size(Size::new(400.0, 500.0));
        view.set_rotation(rotation);
        view
    }

    fn assert_close(a: Point, b: Point) {
        assert!(
            (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9,
            "{a:?} != {b:?}"
        );
    }

    #[test]
    fn unrotated_mapping_scales_per_axis() {
        let view = sheet_view(Rotation::Deg0);
        assert_close(
            view.view_to_page_point(Point::new(100.0, 100.0)),
            Point::new(200.0, 200.0),
        );
        assert_close(
            view.page_to_view_point(Point::new(300.0, 300.0)),
            Point::new(150.0, 150.0),
        );
    }

    #[test]
    fn quarter_turn_mapping_is_exact() {
        let view = sheet_view(Rotation::Deg90);
        // Worked through the definition: view (100, 100) scales to page
        // (200, 200), then rotates -90° about the center (400, 500).
        assert_close(
            view.view_to_page_point(Point::new(100.0, 100.0)),
            Point::new(100.0, 700.0),
        );
        assert_close(
            view.page_to_view_point(Point::new(100.0, 700.0)),
            Point::new(100.0, 100.0),
        );
    }

    #[test]
    fn round_trip_across_rotations_and_zooms() {
        let samples = [
            Point::new(0.0, 0.0),
            Point::new(123.0, 45.0),
            Point::new(399.0, 499.0),
            Point::new(-20.0, 600.0),
        ];
        for rotation in [
            Rotation::Deg0,
            Rotation::Deg90,
            Rotation::Deg180,
            Rotation::Deg270,
        ] {
            for zoom in [0.1, 0.5, 1.0, 2.5, 3.0] {
                let mut view = sheet_view(rotation);
                // A viewport that does not preserve the page aspect ratio.
                view.set_viewport_size(Size::new(377.0, 613.0));
                view.set_zoom(zoom);
                for pt in samples {
                    assert_close(view.page_to_view_point(view.view_to_page_point(pt)), pt);
                    assert_close(view.view_to_page_point(view.page_to_view_point(pt)), pt);
                }
            }
        }
    }

    #[test]
    fn degenerate_dimensions_fall_back_to_identity() {
        let mut view = PageView::new();
        assert!(view.is_degenerate());
        let pt = Point::new(42.0, 17.0);
        assert_eq!(view.view_to_page_point(pt), pt);
        assert_eq!(view.page_to_view_point(pt), pt);

        view.set_page_size(Size::new(800.0, 1000.0));
        // Still no viewport.
        assert!(view.is_degenerate());
        assert_eq!(view.view_to_page_point(pt), pt);

        view.set_viewport_size(Size::new(400.0, 500.0));
        assert!(!view.is_degenerate());
        assert_eq!(view.view_to_page_point(pt), Point::new(84.0, 34.0));

        view.set_viewport_size(Size::new(400.0, 0.0));
        assert!(view.is_degenerate());
        assert_eq!(view.view_to_page_point(pt), pt);
    }

    #[test]
    fn invalid_zoom_is_ignored() {
        let mut view = sheet_view(Rotation::Deg0);
        view.set_zoom(2.0);
        view.set_zoom(0.0);
        view.set_zoom(-1.0);
        view.set_zoom(f64::NAN);
        assert_eq!(view.zoom(), 2.0);
    }

    #[test]
    fn page_rect_maps_to_rotated_view_rect() {
        let view = sheet_view(Rotation::Deg90);
        let mapped = view.page_to_view_rect(Rect::new(200.0, 200.0, 300.0, 300.0));
        assert!((mapped.x0 - 300.0).abs() < 1e-9);
        assert!((mapped.y0 - 150.0).abs() < 1e-9);
        assert!((mapped.x1 - 350.0).abs() < 1e-9);
        assert!((mapped.y1 - 200.0).abs() < 1e-9);
    }
}
