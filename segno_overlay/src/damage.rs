// Copyright 2026 the Segno Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

bitflags::bitflags! {
    /// Engine outputs accumulated for the host.
    ///
    /// Flags accumulate across events until drained with
    /// [`AnnotationOverlay::take_damage`](crate::AnnotationOverlay::take_damage);
    /// the host is free to batch redraws and persistence however it likes.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct OverlayDamage: u8 {
        /// The rendered overlay is stale; repaint from
        /// [`draw_list`](crate::AnnotationOverlay::draw_list).
        const PAINT    = 0b0000_0001;
        /// The stroke collection changed structurally; re-read the
        /// snapshot and persist it.
        const CONTENTS = 0b0000_0010;
    }
}
