//! 2D point type for venue locations.

use serde::{Deserialize, Serialize};

/// A 2D coordinate pair.
///
/// Stored as an embedded document with `x`/`y` fields, which the legacy
/// planar geo indexes of the backing store accept directly. The type itself
/// performs no validation; checking that a point is syntactically valid is
/// the mapping layer's responsibility via [`GeoPoint::is_valid`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub x: f64,
    pub y: f64,
}

impl GeoPoint {
    /// Create a point from its two coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// A point is valid when both coordinates are finite numbers.
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
