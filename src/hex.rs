//! Basic types for the hex coordinate systems used throughout this crate.
//!
//! ## Coordinate Systems
//!
//! ### Axial Coordinates
//!
//! Positions on the hex tiling are [axial coordinates as defined by Amit
//! Patel](https://www.redblobgames.com/grids/hexagons/#coordinates-axial):
//! a pair `(q, r)` in a skewed coordinate system aligned to the grid.
//! Continuous axial positions are [AxialPoint]s; whole tiles (hexagon
//! centers, where both components are integers) are [TilePoint]s.
//!
//! ### Cube Coordinates
//!
//! Axial coordinates are a projection of the [cube coordinate
//! system](https://www.redblobgames.com/grids/hexagons/#coordinates-cube):
//! three components `(x, y, z)` constrained to the plane `x + y + z = 0`,
//! with `x = q`, `z = r` and `y` redundant. Both point types here store only
//! `q` and `r` and derive the third component, so the plane constraint holds
//! for every value by construction. The cube form is what makes
//! nearest-hexagon rounding well-defined; see [AxialPoint::round].

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// A continuous position in axial hex coordinates. Unlike [TilePoint], the
/// components can be fractional, so a value of this type can reference any
/// point on the plane of the grid, not just tile centers.
#[derive(Copy, Clone, Debug, Display, PartialEq, Serialize, Deserialize)]
#[display(fmt = "({}, {})", "self.q", "self.r")]
pub struct AxialPoint {
    q: f64,
    r: f64,
}

impl AxialPoint {
    pub const fn new(q: f64, r: f64) -> Self {
        Self { q, r }
    }

    pub fn q(&self) -> f64 {
        self.q
    }

    pub fn r(&self) -> f64 {
        self.r
    }

    /// The derived third cube coordinate, such that `q + r + s = 0`
    pub fn s(&self) -> f64 {
        -self.q - self.r
    }

    /// Round this position to the tile whose center is nearest.
    ///
    /// Rounding happens in cube coordinates, adapted from
    /// <https://www.redblobgames.com/grids/hexagons/#rounding>: each of the
    /// three cube components is rounded to the nearest integer
    /// independently, which usually knocks the result off the plane
    /// `x + y + z = 0`. The component with the largest rounding error is
    /// then recomputed from the other two to restore the plane constraint.
    ///
    /// The comparisons below are strict, so an exact tie in rounding error
    /// falls through to the final branch (the `z` correction). Points
    /// equidistant between tile centers therefore land in a single
    /// deterministic tile instead of jittering between neighbors.
    pub fn round(self) -> TilePoint {
        let x = self.q;
        let z = self.r;
        let y = -x - z;

        let rx = x.round();
        let ry = y.round();
        let rz = z.round();

        let dx = (rx - x).abs();
        let dy = (ry - y).abs();
        let dz = (rz - z).abs();

        if dx > dy && dx > dz {
            // x took the most damage, rebuild it from y and z
            TilePoint::new((-(ry + rz)) as i64, rz as i64)
        } else if dy > dz {
            // y is corrected instead; it's not part of the output, so x and
            // z pass through as rounded
            TilePoint::new(rx as i64, rz as i64)
        } else {
            TilePoint::new(rx as i64, (-(rx + ry)) as i64)
        }
    }
}

impl From<TilePoint> for AxialPoint {
    fn from(other: TilePoint) -> Self {
        Self::new(other.q() as f64, other.r() as f64)
    }
}

/// A single tile in the hex grid, identified by the axial coordinates of its
/// center. Since `q + r + s = 0` for all tiles, only `q` and `r` are stored
/// and `s` is derived as needed.
///
/// The derived `Ord` is the natural lexicographic ordering on `(q, r)`,
/// which is what binned output is sorted by.
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {})", "self.q", "self.r")]
pub struct TilePoint {
    q: i64,
    r: i64,
}

impl TilePoint {
    pub const ORIGIN: Self = Self::new(0, 0);

    pub const fn new(q: i64, r: i64) -> Self {
        Self { q, r }
    }

    pub fn q(&self) -> i64 {
        self.q
    }

    pub fn r(&self) -> i64 {
        self.r
    }

    /// The derived third cube coordinate, such that `q + r + s = 0`
    pub fn s(&self) -> i64 {
        -(self.q + self.r)
    }
}
