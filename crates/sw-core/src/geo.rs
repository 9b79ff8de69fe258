//! World-space position type and distance helpers.
//!
//! The world uses a right-handed block grid: `x` and `z` span the horizontal
//! plane, `y` is altitude.  The hazard field only looks at the horizontal
//! plane; mobile hazards use full 3-D distance.

/// A point in world space, `f64` per axis.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position3D {
    pub const ORIGIN: Position3D = Position3D { x: 0.0, y: 0.0, z: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Squared distance over the horizontal (`x`, `z`) plane only.
    ///
    /// Band-edge comparisons stay in squared space so the common
    /// clearly-inside / clearly-outside cases never pay for a `sqrt`.
    #[inline]
    pub fn planar_distance_sq(self, other: Position3D) -> f64 {
        let dx = self.x - other.x;
        let dz = self.z - other.z;
        dx * dx + dz * dz
    }

    /// Squared Euclidean distance over all three axes.
    #[inline]
    pub fn distance_sq(self, other: Position3D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    /// Euclidean distance over all three axes.
    #[inline]
    pub fn distance(self, other: Position3D) -> f64 {
        self.distance_sq(other).sqrt()
    }

    /// `true` if every component is finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// `[x, y, z]` array form, as used by R-tree envelopes.
    #[inline]
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl std::fmt::Display for Position3D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}
