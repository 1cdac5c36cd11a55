// Copyright 2026 the Segno Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec;
use alloc::vec::Vec;

use kurbo::{Point, Size};
use peniko::Color;
use segno_annotations::{Annotation, AnnotationId, AnnotationSet, SnapshotError, StrokeData};
use segno_hit::{Handle, HitParams, hit_handle, topmost_hit};
use segno_page_view::{PageView, Rotation};

use crate::damage::OverlayDamage;
use crate::paint::{OverlayTheme, PaintOp};
use crate::tool::Tool;

/// Per-axis resize factors are clamped into this range so a gesture can
/// neither collapse a stroke to nothing nor blow it up unboundedly.
const MIN_RESIZE_FACTOR: f64 = 0.1;
const MAX_RESIZE_FACTOR: f64 = 10.0;

/// Substituted for an exactly-zero anchor offset before dividing.
const ZERO_OFFSET_EPSILON: f64 = 1e-6;

/// Ratio of the new to the old anchor offset along one axis, clamped.
///
/// Dragging a handle across the anchor would produce a negative ratio;
/// the clamp pins it at the minimum instead, so shapes never invert.
fn axis_scale(new_offset: f64, old_offset: f64) -> f64 {
    let old = if old_offset == 0.0 {
        ZERO_OFFSET_EPSILON
    } else {
        old_offset
    };
    (new_offset / old).clamp(MIN_RESIZE_FACTOR, MAX_RESIZE_FACTOR)
}

/// The in-progress gesture, if any.
///
/// Gesture scratch state (the stroke under construction, the previous
/// pointer position, the grabbed handle) lives inside the variant that
/// needs it, so there is no way to be "dragging" and "drawing" at once or
/// to read a stale anchor.
#[derive(Debug)]
enum Gesture {
    Idle,
    Drawing { points: Vec<Point> },
    Dragging { last: Point },
    Resizing { handle: Handle, last: Point },
}

/// The annotation overlay engine for the currently displayed page.
///
/// See the crate docs for the full protocol. In short: feed view-parameter
/// changes and pointer events in arrival order, drain [`OverlayDamage`]
/// after each one, repaint from [`AnnotationOverlay::draw_list`], and
/// persist [`AnnotationOverlay::snapshot`] whenever `CONTENTS` is marked.
#[derive(Debug)]
pub struct AnnotationOverlay {
    view: PageView,
    annotations: AnnotationSet,
    selected: Option<AnnotationId>,
    tool: Tool,
    gesture: Gesture,
    stroke_color: Color,
    hit_params: HitParams,
    theme: OverlayTheme,
    damage: OverlayDamage,
}

impl Default for AnnotationOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnotationOverlay {
    /// Creates an engine with no page loaded, the Select tool active, and a
    /// red drawing color.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view: PageView::new(),
            annotations: AnnotationSet::new(),
            selected: None,
            tool: Tool::Select,
            gesture: Gesture::Idle,
            stroke_color: Color::new([1.0, 0.0, 0.0, 1.0]),
            hit_params: HitParams::default(),
            theme: OverlayTheme::default(),
            damage: OverlayDamage::empty(),
        }
    }

    /// Returns the current page view state.
    #[must_use]
    pub fn view(&self) -> &PageView {
        &self.view
    }

    /// Sets the page's intrinsic size in document units.
    ///
    /// Stored strokes are unaffected; only the view mapping changes.
    pub fn set_page_size(&mut self, size: Size) {
        self.view.set_page_size(size);
        self.damage |= OverlayDamage::PAINT;
    }

    /// Sets the viewport size in device pixels.
    pub fn set_viewport_size(&mut self, size: Size) {
        self.view.set_viewport_size(size);
        self.damage |= OverlayDamage::PAINT;
    }

    /// Sets the zoom factor. Invalid values are ignored by the view.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.view.set_zoom(zoom);
        self.damage |= OverlayDamage::PAINT;
    }

    /// Sets the display rotation.
    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.view.set_rotation(rotation);
        self.damage |= OverlayDamage::PAINT;
    }

    /// Returns the active tool.
    #[must_use]
    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Activates a tool, releasing the previous one.
    ///
    /// Any in-progress gesture is abandoned: a half-drawn stroke is
    /// discarded, never committed, and a drag or resize simply stops where
    /// its last pointer move left the stroke.
    pub fn set_tool(&mut self, tool: Tool) {
        if self.tool == tool {
            return;
        }
        self.gesture = Gesture::Idle;
        self.tool = tool;
        self.damage |= OverlayDamage::PAINT;
    }

    /// Returns the color new strokes are drawn in.
    #[must_use]
    pub fn stroke_color(&self) -> Color {
        self.stroke_color
    }

    /// Sets the color for subsequently drawn strokes.
    pub fn set_stroke_color(&mut self, color: Color) {
        self.stroke_color = color;
        self.damage |= OverlayDamage::PAINT;
    }

    /// Returns the hit-testing tolerances.
    #[must_use]
    pub fn hit_params(&self) -> HitParams {
        self.hit_params
    }

    /// Overrides the hit-testing tolerances.
    pub fn set_hit_params(&mut self, params: HitParams) {
        self.hit_params = params;
    }

    /// Returns the overlay chrome theme.
    #[must_use]
    pub fn theme(&self) -> &OverlayTheme {
        &self.theme
    }

    /// Overrides the overlay chrome theme.
    pub fn set_theme(&mut self, theme: OverlayTheme) {
        self.theme = theme;
        self.damage |= OverlayDamage::PAINT;
    }

    /// Returns the selected stroke, if any.
    ///
    /// Hosts typically use this to enable a "delete selected" control.
    #[must_use]
    pub fn selected(&self) -> Option<AnnotationId> {
        self.selected
    }

    /// Returns the stroke collection of the current page.
    #[must_use]
    pub fn annotations(&self) -> &AnnotationSet {
        &self.annotations
    }

    /// Handles a pointer press at a view-space position.
    pub fn pointer_down(&mut self, view_pt: Point) {
        let pt = self.view.view_to_page_point(view_pt);
        match self.tool {
            Tool::Draw => {
                self.selected = None;
                self.gesture = Gesture::Drawing { points: vec![pt] };
                self.damage |= OverlayDamage::PAINT;
            }
            Tool::Erase => {
                if let Some(id) = topmost_hit(pt, &self.annotations, &self.hit_params) {
                    self.annotations.remove(id);
                    self.selected = None;
                    self.damage |= OverlayDamage::CONTENTS | OverlayDamage::PAINT;
                }
            }
            Tool::Select => {
                let hit = topmost_hit(pt, &self.annotations, &self.hit_params);
                if self.selected != hit {
                    self.selected = hit;
                    self.damage |= OverlayDamage::PAINT;
                }
            }
            Tool::Drag => {
                let hit = topmost_hit(pt, &self.annotations, &self.hit_params);
                if self.selected != hit {
                    self.damage |= OverlayDamage::PAINT;
                }
                self.selected = hit;
                if hit.is_some() {
                    self.gesture = Gesture::Dragging { last: pt };
                }
            }
            Tool::Resize => {
                let Some(annotation) = self.selected.and_then(|id| self.annotations.get(id))
                else {
                    return;
                };
                if let Some(handle) = hit_handle(pt, annotation.bounding_box(), &self.hit_params)
                {
                    self.gesture = Gesture::Resizing { handle, last: pt };
                }
            }
        }
    }

    /// Handles a pointer move at a view-space position.
    pub fn pointer_move(&mut self, view_pt: Point) {
        let pt = self.view.view_to_page_point(view_pt);
        match &mut self.gesture {
            Gesture::Idle => {}
            Gesture::Drawing { points } => {
                // Every sample is kept; smoothing or decimation would
                // change what gets committed and hit-tested later.
                points.push(pt);
                self.damage |= OverlayDamage::PAINT;
            }
            Gesture::Dragging { last } => {
                let delta = pt - *last;
                *last = pt;
                if let Some(id) = self.selected
                    && self.annotations.translate(id, delta)
                {
                    self.damage |= OverlayDamage::PAINT;
                }
            }
            Gesture::Resizing { handle, last } => {
                let handle = *handle;
                let prev = *last;
                *last = pt;
                let Some(id) = self.selected else {
                    return;
                };
                let Some(annotation) = self.annotations.get(id) else {
                    return;
                };
                // The anchor is recomputed from the current bounding box;
                // scaling about it leaves it in place, so it stays put for
                // the whole gesture.
                let anchor = handle.opposite().position(annotation.bounding_box());
                let old = prev - anchor;
                let new = pt - anchor;
                let sx = axis_scale(new.x, old.x);
                let sy = axis_scale(new.y, old.y);
                if self.annotations.scale_non_uniform(id, sx, sy, Some(anchor)) {
                    self.damage |= OverlayDamage::PAINT;
                }
            }
        }
    }

    /// Handles a pointer release at a view-space position.
    pub fn pointer_up(&mut self, _view_pt: Point) {
        match core::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Idle => {}
            Gesture::Drawing { points } => {
                if points.len() >= 2 {
                    self.annotations
                        .push(Annotation::new(points, self.stroke_color));
                    self.damage |= OverlayDamage::CONTENTS | OverlayDamage::PAINT;
                } else {
                    // A tap without movement records a single point; it is
                    // discarded rather than committed.
                    self.damage |= OverlayDamage::PAINT;
                }
            }
            Gesture::Dragging { .. } | Gesture::Resizing { .. } => {
                self.damage |= OverlayDamage::CONTENTS;
            }
        }
    }

    /// Removes the selected stroke, if there is one.
    ///
    /// Returns `true` if a stroke was removed.
    pub fn remove_selected(&mut self) -> bool {
        let Some(id) = self.selected.take() else {
            return false;
        };
        if self.annotations.remove(id).is_some() {
            self.damage |= OverlayDamage::CONTENTS | OverlayDamage::PAINT;
            true
        } else {
            false
        }
    }

    /// Removes every stroke on the page.
    pub fn clear_annotations(&mut self) {
        self.selected = None;
        self.gesture = Gesture::Idle;
        if !self.annotations.is_empty() {
            self.annotations.clear();
            self.damage |= OverlayDamage::CONTENTS | OverlayDamage::PAINT;
        }
    }

    /// Replaces the page's strokes from stored data (a page switch).
    ///
    /// Clears the selection and abandons any in-progress gesture. Loading
    /// marks only `PAINT`, since the host is re-reading its own data
    /// rather than observing an edit.
    ///
    /// # Errors
    ///
    /// Returns the validation failure for corrupt stored data; the current
    /// page is left untouched in that case.
    pub fn load_snapshot(&mut self, data: &[StrokeData]) -> Result<(), SnapshotError> {
        self.annotations = AnnotationSet::from_snapshot(data)?;
        self.selected = None;
        self.gesture = Gesture::Idle;
        self.damage |= OverlayDamage::PAINT;
        Ok(())
    }

    /// Serializes the page's strokes into the host persistence shape.
    #[must_use]
    pub fn snapshot(&self) -> Vec<StrokeData> {
        self.annotations.snapshot()
    }

    /// Returns the accumulated damage without clearing it.
    #[must_use]
    pub fn pending_damage(&self) -> OverlayDamage {
        self.damage
    }

    /// Drains the accumulated damage flags.
    pub fn take_damage(&mut self) -> OverlayDamage {
        core::mem::replace(&mut self.damage, OverlayDamage::empty())
    }

    /// Produces the view-space draw list for the current state.
    ///
    /// Bottom to top: committed strokes in z-order, the in-progress stroke,
    /// the selection box, and (with the Resize tool active) the four corner
    /// handles.
    #[must_use]
    pub fn draw_list(&self) -> Vec<PaintOp> {
        let mut ops = Vec::new();

        for (_, annotation) in self.annotations.iter() {
            if annotation.points().len() < 2 {
                continue;
            }
            ops.push(PaintOp::Stroke {
                points: self.map_points(annotation.points()),
                color: annotation.color(),
                width: self.theme.stroke_width,
            });
        }

        if let Gesture::Drawing { points } = &self.gesture
            && points.len() >= 2
        {
            ops.push(PaintOp::Stroke {
                points: self.map_points(points),
                color: self.stroke_color,
                width: self.theme.stroke_width,
            });
        }

        if let Some(annotation) = self.selected.and_then(|id| self.annotations.get(id)) {
            let bbox = annotation.bounding_box();
            if bbox.width() > 0.0 && bbox.height() > 0.0 {
                ops.push(PaintOp::SelectionBox {
                    rect: self.view.page_to_view_rect(bbox),
                    color: self.theme.selection_color,
                    width: self.theme.selection_width,
                });
                if self.tool == Tool::Resize {
                    for handle in Handle::ALL {
                        ops.push(PaintOp::HandleMarker {
                            center: self.view.page_to_view_point(handle.position(bbox)),
                            radius: self.theme.handle_radius,
                            color: self.theme.handle_color,
                        });
                    }
                }
            }
        }

        ops
    }

    fn map_points(&self, points: &[Point]) -> Vec<Point> {
        points
            .iter()
            .map(|&p| self.view.page_to_view_point(p))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use kurbo::{Point, Size};
    use peniko::Color;
    use segno_annotations::StrokeData;

    use super::{AnnotationOverlay, MAX_RESIZE_FACTOR, MIN_RESIZE_FACTOR, axis_scale};
    use crate::damage::OverlayDamage;
    use crate::tool::Tool;

    fn overlay_1to1() -> AnnotationOverlay {
        // Page units equal view pixels: no scaling anywhere.
        let mut overlay = AnnotationOverlay::new();
        overlay.set_page_size(Size::new(1000.0, 1000.0));
        overlay.set_viewport_size(Size::new(1000.0, 1000.0));
        overlay.take_damage();
        overlay
    }

    fn draw_line(overlay: &mut AnnotationOverlay, from: Point, to: Point) {
        overlay.set_tool(Tool::Draw);
        overlay.pointer_down(from);
        overlay.pointer_move(to);
        overlay.pointer_up(to);
    }

    #[test]
    fn axis_scale_clamps_and_never_divides_by_zero() {
        assert_eq!(axis_scale(20.0, 10.0), 2.0);
        assert_eq!(axis_scale(5.0, 10.0), 0.5);
        // Crossing the anchor gives a negative ratio; it clamps low.
        assert_eq!(axis_scale(-20.0, 10.0), MIN_RESIZE_FACTOR);
        // Exactly-zero old offset takes the epsilon path.
        assert_eq!(axis_scale(1.0, 0.0), MAX_RESIZE_FACTOR);
        assert_eq!(axis_scale(1e9, 1.0), MAX_RESIZE_FACTOR);
    }

    #[test]
    fn single_point_stroke_is_discarded() {
        let mut overlay = overlay_1to1();
        overlay.set_tool(Tool::Draw);
        overlay.pointer_down(Point::new(100.0, 100.0));
        overlay.pointer_up(Point::new(100.0, 100.0));

        assert!(overlay.annotations().is_empty());
        assert!(!overlay.take_damage().contains(OverlayDamage::CONTENTS));
    }

    #[test]
    fn two_point_stroke_commits_once() {
        let mut overlay = overlay_1to1();
        draw_line(&mut overlay, Point::new(100.0, 100.0), Point::new(150.0, 150.0));

        assert_eq!(overlay.annotations().len(), 1);
        let (_, annotation) = overlay.annotations().iter().next().unwrap();
        assert_eq!(
            annotation.points(),
            &[Point::new(100.0, 100.0), Point::new(150.0, 150.0)]
        );
    }

    #[test]
    fn switching_tools_mid_stroke_discards_it() {
        let mut overlay = overlay_1to1();
        overlay.set_tool(Tool::Draw);
        overlay.pointer_down(Point::new(100.0, 100.0));
        overlay.pointer_move(Point::new(150.0, 150.0));
        overlay.set_tool(Tool::Erase);
        // The release that would have committed arrives after the switch.
        overlay.pointer_up(Point::new(150.0, 150.0));

        assert!(overlay.annotations().is_empty());
    }

    #[test]
    fn erase_removes_exactly_the_topmost_hit() {
        let mut overlay = overlay_1to1();
        draw_line(&mut overlay, Point::new(100.0, 100.0), Point::new(200.0, 100.0));
        draw_line(&mut overlay, Point::new(100.0, 100.0), Point::new(100.0, 200.0));
        overlay.take_damage();

        overlay.set_tool(Tool::Erase);
        // Empty space: nothing happens.
        overlay.pointer_down(Point::new(500.0, 500.0));
        assert_eq!(overlay.annotations().len(), 2);
        assert!(!overlay.take_damage().contains(OverlayDamage::CONTENTS));

        // Both strokes start at (100, 100); the second one is on top.
        overlay.pointer_down(Point::new(100.0, 100.0));
        assert_eq!(overlay.annotations().len(), 1);
        let (_, survivor) = overlay.annotations().iter().next().unwrap();
        assert_eq!(survivor.points()[1], Point::new(200.0, 100.0));
        assert!(overlay.take_damage().contains(OverlayDamage::CONTENTS));
    }

    #[test]
    fn select_is_read_only() {
        let mut overlay = overlay_1to1();
        draw_line(&mut overlay, Point::new(100.0, 100.0), Point::new(150.0, 100.0));
        overlay.set_tool(Tool::Select);
        overlay.take_damage();

        overlay.pointer_down(Point::new(100.0, 100.0));
        assert!(overlay.selected().is_some());
        let damage = overlay.take_damage();
        assert!(damage.contains(OverlayDamage::PAINT));
        assert!(!damage.contains(OverlayDamage::CONTENTS));

        overlay.pointer_down(Point::new(500.0, 500.0));
        assert!(overlay.selected().is_none());
    }

    #[test]
    fn drag_translates_incrementally_and_notifies_once() {
        let mut overlay = overlay_1to1();
        draw_line(&mut overlay, Point::new(100.0, 100.0), Point::new(150.0, 100.0));
        overlay.set_tool(Tool::Drag);
        overlay.take_damage();

        overlay.pointer_down(Point::new(100.0, 100.0));
        assert!(overlay.selected().is_some());
        overlay.pointer_move(Point::new(110.0, 105.0));
        overlay.pointer_move(Point::new(130.0, 120.0));
        assert!(!overlay.take_damage().contains(OverlayDamage::CONTENTS));
        overlay.pointer_up(Point::new(130.0, 120.0));

        let (_, annotation) = overlay.annotations().iter().next().unwrap();
        assert_eq!(
            annotation.points(),
            &[Point::new(130.0, 120.0), Point::new(180.0, 120.0)]
        );
        assert!(overlay.take_damage().contains(OverlayDamage::CONTENTS));
    }

    #[test]
    fn drag_on_empty_space_clears_selection_and_moves_nothing() {
        let mut overlay = overlay_1to1();
        draw_line(&mut overlay, Point::new(100.0, 100.0), Point::new(150.0, 100.0));
        overlay.set_tool(Tool::Drag);
        overlay.pointer_down(Point::new(100.0, 100.0));
        overlay.pointer_up(Point::new(100.0, 100.0));
        assert!(overlay.selected().is_some());

        overlay.pointer_down(Point::new(500.0, 500.0));
        assert!(overlay.selected().is_none());
        overlay.pointer_move(Point::new(510.0, 510.0));
        overlay.pointer_up(Point::new(510.0, 510.0));

        let (_, annotation) = overlay.annotations().iter().next().unwrap();
        assert_eq!(annotation.points()[0], Point::new(100.0, 100.0));
    }

    #[test]
    fn resize_scales_about_the_opposite_corner() {
        let mut overlay = overlay_1to1();
        draw_line(&mut overlay, Point::new(100.0, 100.0), Point::new(200.0, 200.0));
        overlay.set_tool(Tool::Drag);
        overlay.pointer_down(Point::new(100.0, 100.0));
        overlay.pointer_up(Point::new(100.0, 100.0));
        overlay.set_tool(Tool::Resize);
        overlay.take_damage();

        // Grab the bottom-right handle at (200, 200); the anchor is the
        // top-left corner (100, 100).
        overlay.pointer_down(Point::new(200.0, 200.0));
        overlay.pointer_move(Point::new(300.0, 150.0));
        overlay.pointer_up(Point::new(300.0, 150.0));

        let (_, annotation) = overlay.annotations().iter().next().unwrap();
        assert_eq!(
            annotation.points(),
            &[Point::new(100.0, 100.0), Point::new(300.0, 150.0)]
        );
        assert!(overlay.take_damage().contains(OverlayDamage::CONTENTS));
    }

    #[test]
    fn resize_without_selection_is_a_no_op() {
        let mut overlay = overlay_1to1();
        draw_line(&mut overlay, Point::new(100.0, 100.0), Point::new(200.0, 200.0));
        overlay.set_tool(Tool::Resize);
        overlay.take_damage();

        overlay.pointer_down(Point::new(200.0, 200.0));
        overlay.pointer_move(Point::new(300.0, 300.0));
        overlay.pointer_up(Point::new(300.0, 300.0));

        let (_, annotation) = overlay.annotations().iter().next().unwrap();
        assert_eq!(annotation.points()[1], Point::new(200.0, 200.0));
        assert!(overlay.take_damage().is_empty());
    }

    #[test]
    fn resize_crossing_the_anchor_clamps_instead_of_inverting() {
        let mut overlay = overlay_1to1();
        draw_line(&mut overlay, Point::new(100.0, 100.0), Point::new(200.0, 200.0));
        overlay.set_tool(Tool::Drag);
        overlay.pointer_down(Point::new(100.0, 100.0));
        overlay.pointer_up(Point::new(100.0, 100.0));
        overlay.set_tool(Tool::Resize);

        // Drag the bottom-right handle far past the top-left anchor.
        overlay.pointer_down(Point::new(200.0, 200.0));
        overlay.pointer_move(Point::new(0.0, 0.0));
        overlay.pointer_up(Point::new(0.0, 0.0));

        let (_, annotation) = overlay.annotations().iter().next().unwrap();
        let bbox = annotation.bounding_box();
        // Clamped to the minimum factor: a tenth of the original 100x100.
        assert!((bbox.width() - 10.0).abs() < 1e-9);
        assert!((bbox.height() - 10.0).abs() < 1e-9);
        assert!(bbox.width() > 0.0 && bbox.height() > 0.0);
    }

    #[test]
    fn remove_selected_requires_a_selection() {
        let mut overlay = overlay_1to1();
        draw_line(&mut overlay, Point::new(100.0, 100.0), Point::new(150.0, 100.0));
        overlay.take_damage();
        assert!(!overlay.remove_selected());

        overlay.set_tool(Tool::Select);
        overlay.pointer_down(Point::new(100.0, 100.0));
        assert!(overlay.remove_selected());
        assert!(overlay.annotations().is_empty());
        assert!(overlay.selected().is_none());
        assert!(overlay.take_damage().contains(OverlayDamage::CONTENTS));
    }

    #[test]
    fn load_snapshot_clears_selection_and_marks_paint_only() {
        let mut overlay = overlay_1to1();
        draw_line(&mut overlay, Point::new(100.0, 100.0), Point::new(150.0, 100.0));
        overlay.set_tool(Tool::Select);
        overlay.pointer_down(Point::new(100.0, 100.0));
        assert!(overlay.selected().is_some());
        overlay.take_damage();

        let next_page = vec![StrokeData {
            points: vec![[10.0, 10.0], [20.0, 20.0]],
            color: Color::new([0.0, 1.0, 0.0, 1.0]).into(),
        }];
        overlay.load_snapshot(&next_page).unwrap();

        assert_eq!(overlay.annotations().len(), 1);
        assert!(overlay.selected().is_none());
        let damage = overlay.take_damage();
        assert!(damage.contains(OverlayDamage::PAINT));
        assert!(!damage.contains(OverlayDamage::CONTENTS));
    }

    #[test]
    fn corrupt_snapshot_leaves_the_page_untouched() {
        let mut overlay = overlay_1to1();
        draw_line(&mut overlay, Point::new(100.0, 100.0), Point::new(150.0, 100.0));

        let corrupt = vec![StrokeData {
            points: vec![],
            color: Color::new([0.0, 1.0, 0.0, 1.0]).into(),
        }];
        assert!(overlay.load_snapshot(&corrupt).is_err());
        assert_eq!(overlay.annotations().len(), 1);
    }
}
