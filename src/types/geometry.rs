//! Horizontal-plane geometry

use serde::{Deserialize, Serialize};

/// Tolerance below which two horizontal positions are treated as coincident.
pub const COINCIDENT_EPSILON: f64 = 1e-9;

/// A position in the horizontal plane (easting, northing).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Planar Euclidean distance.
    pub fn distance_to(self, other: Self) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    pub fn is_coincident(self, other: Self) -> bool {
        self.distance_to(other) <= COINCIDENT_EPSILON
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}
