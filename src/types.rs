//! Core data types for labels and point sets.

use serde::{Deserialize, Serialize};

/// A point in image pixel coordinates.
///
/// `x` is the column and `y` is the row. Rasters are indexed `[row][col]`,
/// so code converting between the two representations swaps the axes; see
/// [`crate::centroids::extract_centroids`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another point.
    pub fn distance_squared(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Check that both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// An axis-aligned box around a handwritten number, plus the integer value
/// read from the image. `(x, y)` is the box anchor in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumberBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub value: i64,
}

/// A single annotation on an image.
///
/// The three kinds map one-to-one onto the storage tables; the store
/// switches on the discriminant when serializing rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Label {
    /// A point detection of a bug.
    Bug { x: f64, y: f64 },
    /// The tick mark itself, not the numbers written next to it.
    Tickmark { x: f64, y: f64 },
    /// The box surrounding the numbers written next to a tick mark.
    TickmarkNumber {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        value: i64,
    },
}

impl Label {
    /// The anchor position of the label, regardless of kind.
    pub fn position(&self) -> Point {
        match *self {
            Label::Bug { x, y }
            | Label::Tickmark { x, y }
            | Label::TickmarkNumber { x, y, .. } => Point::new(x, y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_squared() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance_squared(&b) - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_label_position() {
        let label = Label::TickmarkNumber {
            x: 5.0,
            y: 6.0,
            width: 20.0,
            height: 10.0,
            value: 48,
        };
        assert_eq!(label.position(), Point::new(5.0, 6.0));
    }

    #[test]
    fn test_point_finite() {
        assert!(Point::new(1.0, 2.0).is_finite());
        assert!(!Point::new(f64::NAN, 2.0).is_finite());
        assert!(!Point::new(1.0, f64::INFINITY).is_finite());
    }
}
