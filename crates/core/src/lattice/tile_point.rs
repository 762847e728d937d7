//! Integer coordinates that identify a single tile in a hexagonal lattice.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// A point in the lattice that refers to a whole tile (via its center).
///
/// This uses the axial flavor of the cube coordinate system described at
/// https://www.redblobgames.com/grids/hexagons/#coordinates-cube, with
/// **flat topped** tiles. Cube coordinates have three components with the
/// constraint `i + j + k = 0`, so we only need to store two and can derive
/// the third as needed.
///
/// For a given lattice, the same tile always gets the same coordinate, so
/// these are safe to use as stable identifiers across runs.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {}, {})", "self.i()", "self.j()", "self.k()")]
pub struct TilePoint {
    i: i32,
    j: i32,
}

impl TilePoint {
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Construct a new tile point with the given i and j. Since i+j+k=0 for all
    /// points, we can derive k from i & j.
    pub const fn new(i: i32, j: i32) -> Self {
        Self { i, j }
    }

    /// Column coordinate. Each step in `i` moves 1.5 tile radii along X.
    pub fn i(&self) -> i32 {
        self.i
    }

    /// Each step in `j` moves one full tile height along Y.
    pub fn j(&self) -> i32 {
        self.j
    }

    pub fn k(&self) -> i32 {
        -(self.i + self.j)
    }

    /// Calculate the path distance between two tiles, meaning the number of
    /// hops it takes to get from one to the other. 0 if the points are equal,
    /// 1 if the tiles are adjacent, 2 if there is 1 tile between them, etc.
    pub fn distance_to(self, other: TilePoint) -> usize {
        // https://www.redblobgames.com/grids/hexagons/#distances
        ((self.i() - other.i()).abs()
            + (self.j() - other.j()).abs()
            + (self.k() - other.k()).abs()) as usize
            / 2
    }
}

impl From<(i32, i32)> for TilePoint {
    fn from((i, j): (i32, i32)) -> Self {
        Self::new(i, j)
    }
}
