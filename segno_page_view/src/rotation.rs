// Copyright 2026 the Segno Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Display rotation of the current page, in quarter turns clockwise.
///
/// Paged-document viewers rotate in 90° steps only, so the full set of
/// rotations is enumerable and their sine/cosine coefficients are exact.
/// This keeps the view↔page mapping free of trigonometric error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    /// The unrotated page.
    #[default]
    Deg0,
    /// Rotated 90° clockwise.
    Deg90,
    /// Rotated 180°.
    Deg180,
    /// Rotated 270° clockwise (90° counter-clockwise).
    Deg270,
}

impl Rotation {
    /// Interprets a rotation given in degrees.
    ///
    /// Any integer multiple of 90 is accepted and normalized into
    /// `0..360` first, so `-90` maps to [`Rotation::Deg270`]. Returns
    /// `None` for anything that is not a quarter turn.
    #[must_use]
    pub const fn from_degrees(degrees: i32) -> Option<Self> {
        match degrees.rem_euclid(360) {
            0 => Some(Self::Deg0),
            90 => Some(Self::Deg90),
            180 => Some(Self::Deg180),
            270 => Some(Self::Deg270),
            _ => None,
        }
    }

    /// Returns the rotation in degrees, one of 0, 90, 180, or 270.
    #[must_use]
    pub const fn degrees(self) -> u16 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// Returns the next rotation a "rotate 90°" control would step to.
    #[must_use]
    pub const fn rotated_cw(self) -> Self {
        match self {
            Self::Deg0 => Self::Deg90,
            Self::Deg90 => Self::Deg180,
            Self::Deg180 => Self::Deg270,
            Self::Deg270 => Self::Deg0,
        }
    }

    /// Exact `(sin, cos)` of the rotation angle.
    pub(crate) const fn sin_cos(self) -> (f64, f64) {
        match self {
            Self::Deg0 => (0.0, 1.0),
            Self::Deg90 => (1.0, 0.0),
            Self::Deg180 => (0.0, -1.0),
            Self::Deg270 => (-1.0, 0.0),
        }
    }
}
