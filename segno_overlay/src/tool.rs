// Copyright 2026 the Segno Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// The active annotation tool.
///
/// Exactly one tool is hot at a time, mirroring a toolbar of mutually
/// exclusive toggles; selecting one implicitly releases the others. The
/// single-value representation makes contradictory mode combinations
/// unrepresentable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Tool {
    /// Tap a stroke to select it (or empty space to deselect). Read-only.
    #[default]
    Select,
    /// Freehand drawing; press, move, release commits a stroke.
    Draw,
    /// Tap a stroke to delete it.
    Erase,
    /// Press a stroke and move to translate it.
    Drag,
    /// Grab a corner handle of the selected stroke's bounding box and move
    /// to resize it non-uniformly.
    Resize,
}
