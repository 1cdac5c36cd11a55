// Copyright 2026 the Segno Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Persistence wire types and validated bulk load/store.

use alloc::vec::Vec;
use core::fmt;

use kurbo::Point;
use peniko::Color;

use crate::annotation::Annotation;
use crate::set::AnnotationSet;

/// RGBA stroke color as stored by the host, components in `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColorData {
    /// Red component.
    pub red: f32,
    /// Green component.
    pub green: f32,
    /// Blue component.
    pub blue: f32,
    /// Alpha component.
    pub alpha: f32,
}

impl From<Color> for ColorData {
    fn from(color: Color) -> Self {
        let [red, green, blue, alpha] = color.components;
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }
}

impl From<ColorData> for Color {
    fn from(data: ColorData) -> Self {
        Self::new([data.red, data.green, data.blue, data.alpha])
    }
}

/// One stroke as stored by the host: page-space point pairs plus a color.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrokeData {
    /// The stroke's points in drawing order, as `[x, y]` pairs.
    pub points: Vec<[f64; 2]>,
    /// The stroke color.
    pub color: ColorData,
}

impl From<&Annotation> for StrokeData {
    fn from(annotation: &Annotation) -> Self {
        Self {
            points: annotation.points().iter().map(|p| [p.x, p.y]).collect(),
            color: annotation.color().into(),
        }
    }
}

/// Why a stored snapshot was rejected on load.
///
/// The index identifies the offending stroke within the snapshot. The
/// overlay engine itself never produces invalid snapshots; these arise from
/// corrupt or hand-edited stored data, which the host is expected to catch
/// here before the data reaches a live page.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SnapshotError {
    /// A stroke had no points; strokes in a set carry at least one.
    EmptyStroke {
        /// Index of the stroke within the snapshot.
        index: usize,
    },
    /// A stroke contained a NaN or infinite coordinate.
    NonFinitePoint {
        /// Index of the stroke within the snapshot.
        index: usize,
    },
    /// A color component was NaN or outside `[0, 1]`.
    ColorOutOfRange {
        /// Index of the stroke within the snapshot.
        index: usize,
    },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyStroke { index } => {
                write!(f, "stroke {index} has no points")
            }
            Self::NonFinitePoint { index } => {
                write!(f, "stroke {index} contains a non-finite coordinate")
            }
            Self::ColorOutOfRange { index } => {
                write!(f, "stroke {index} has a color component outside [0, 1]")
            }
        }
    }
}

impl core::error::Error for SnapshotError {}

impl AnnotationSet {
    /// Serializes the whole collection into the host persistence shape.
    ///
    /// Point order and z-order are preserved verbatim. The host may call
    /// this at any time; the engine makes no assumption about when
    /// snapshots are taken.
    #[must_use]
    pub fn snapshot(&self) -> Vec<StrokeData> {
        self.iter().map(|(_, annotation)| annotation.into()).collect()
    }

    /// Builds a fresh collection from stored data, validating every stroke.
    ///
    /// # Errors
    ///
    /// Returns a [`SnapshotError`] naming the first offending stroke when
    /// the data contains an empty stroke, a non-finite coordinate, or a
    /// color component outside `[0, 1]`. On error nothing is constructed;
    /// the caller keeps its current collection.
    pub fn from_snapshot(data: &[StrokeData]) -> Result<Self, SnapshotError> {
        let mut set = Self::new();
        for (index, stroke) in data.iter().enumerate() {
            if stroke.points.is_empty() {
                return Err(SnapshotError::EmptyStroke { index });
            }
            if stroke
                .points
                .iter()
                .any(|[x, y]| !(x.is_finite() && y.is_finite()))
            {
                return Err(SnapshotError::NonFinitePoint { index });
            }
            let c = stroke.color;
            if [c.red, c.green, c.blue, c.alpha]
                .iter()
                .any(|v| !(0.0..=1.0).contains(v))
            {
                return Err(SnapshotError::ColorOutOfRange { index });
            }
            let points = stroke.points.iter().map(|[x, y]| Point::new(*x, *y)).collect();
            set.push(Annotation::new(points, stroke.color.into()));
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use kurbo::Point;
    use peniko::Color;

    use super::{ColorData, SnapshotError, StrokeData};
    use crate::annotation::Annotation;
    use crate::set::AnnotationSet;

    const RED: ColorData = ColorData {
        red: 1.0,
        green: 0.0,
        blue: 0.0,
        alpha: 1.0,
    };

    #[test]
    fn snapshot_round_trip_preserves_structure_and_values() {
        let mut set = AnnotationSet::new();
        set.push(Annotation::new(
            vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)],
            Color::new([1.0, 0.0, 0.0, 1.0]),
        ));
        set.push(Annotation::new(
            vec![Point::new(5.0, 6.0)],
            Color::new([0.0, 0.25, 0.5, 0.75]),
        ));

        let snapshot = set.snapshot();
        let restored = AnnotationSet::from_snapshot(&snapshot).unwrap();

        assert_eq!(restored.len(), set.len());
        assert_eq!(restored.snapshot(), snapshot);
    }

    #[test]
    fn empty_stroke_is_rejected() {
        let data = vec![StrokeData {
            points: vec![],
            color: RED,
        }];
        assert_eq!(
            AnnotationSet::from_snapshot(&data),
            Err(SnapshotError::EmptyStroke { index: 0 })
        );
    }

    #[test]
    fn non_finite_coordinate_is_rejected() {
        let data = vec![
            StrokeData {
                points: vec![[0.0, 0.0], [1.0, 1.0]],
                color: RED,
            },
            StrokeData {
                points: vec![[f64::NAN, 0.0]],
                color: RED,
            },
        ];
        assert_eq!(
            AnnotationSet::from_snapshot(&data),
            Err(SnapshotError::NonFinitePoint { index: 1 })
        );
    }

    #[test]
    fn out_of_range_color_is_rejected() {
        let data = vec![StrokeData {
            points: vec![[0.0, 0.0]],
            color: ColorData {
                red: 1.5,
                green: 0.0,
                blue: 0.0,
                alpha: 1.0,
            },
        }];
        assert_eq!(
            AnnotationSet::from_snapshot(&data),
            Err(SnapshotError::ColorOutOfRange { index: 0 })
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn stroke_data_serializes_to_the_host_shape() {
        let stroke = StrokeData {
            points: vec![[1.0, 2.0], [3.0, 4.0]],
            color: RED,
        };
        let json = serde_json::to_string(&stroke).unwrap();
        assert_eq!(
            json,
            r#"{"points":[[1.0,2.0],[3.0,4.0]],"color":{"red":1.0,"green":0.0,"blue":0.0,"alpha":1.0}}"#
        );
        let back: StrokeData = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stroke);
    }
}
