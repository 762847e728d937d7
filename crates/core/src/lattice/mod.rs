//! Hexagonal lattice used to tile the eyebox plane.
//!
//! ## Coordinate Systems
//!
//! Tiles are addressed by [TilePoint]s, which are integer axial coordinates.
//! Lattice space is the 2D plane that the tiles are laid out in. Tile
//! `(0, 0)` is centered on the lattice origin, and the tiles are **flat
//! topped**, meaning two of each tile's vertices sit on the horizontal line
//! through its center:
//!
//! ```text
//!          +y
//!           ^
//!     ___   |   ___
//!    /   \__|__/   \
//!    \___/  |  \___/
//!    /   \__o__/   \ ---> +x
//!    \___/     \___/
//! ```
//!
//! Stepping `i` moves one column right (and half a row up), stepping `j`
//! moves one row up.

mod tile_point;

pub use self::tile_point::TilePoint;

use crate::{geometry::BoundingBox, util::range::NumRange};
use fnv::FnvBuildHasher;
use indexmap::IndexSet;
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// An insertion-ordered set of tiles. Iteration order is deterministic, which
/// we rely on to keep lenslet output stable between runs.
pub type TilePointSet = IndexSet<TilePoint, FnvBuildHasher>;

/// sqrt(3), which shows up everywhere in hexagon math
const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// A regular hexagonal tiling of the plane.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HexLattice {
    /// Distance between the center of a tile and one of its 6 vertices. This
    /// is also the length of one side of the tile.
    tile_size: f64,
}

impl HexLattice {
    /// Every tile is a hexagon
    pub const VERTICES_PER_TILE: usize = 6;

    /// Create a new lattice. Panics if the tile size isn't a positive finite
    /// number.
    pub fn new(tile_size: f64) -> Self {
        assert!(
            tile_size.is_finite() && tile_size > 0.0,
            "tile size must be positive, but was {}",
            tile_size
        );
        Self { tile_size }
    }

    /// Distance between a tile's center and any of its vertices
    pub fn tile_size(&self) -> f64 {
        self.tile_size
    }

    /// Distance between the center of a tile and the midpoint of one of its
    /// sides
    pub fn side_radius(&self) -> f64 {
        self.tile_size * SQRT_3 / 2.0
    }

    /// Location of a tile's center, in lattice space
    pub fn tile_center(&self, tile: TilePoint) -> Point2<f64> {
        let i = tile.i() as f64;
        let j = tile.j() as f64;
        Point2::new(
            1.5 * self.tile_size * i,
            SQRT_3 * self.tile_size * (j + i / 2.0),
        )
    }

    /// The 6 vertices of a tile, in lattice space. They go counter-clockwise,
    /// starting from the vertex directly to the right (+x) of the center.
    pub fn tile_vertices(
        &self,
        tile: TilePoint,
    ) -> [Point2<f64>; Self::VERTICES_PER_TILE] {
        let center = self.tile_center(tile);
        [0, 1, 2, 3, 4, 5].map(|n| {
            let angle = n as f64 * std::f64::consts::FRAC_PI_3;
            center + Vector2::new(angle.cos(), angle.sin()) * self.tile_size
        })
    }

    /// Find the tile that contains the given point
    pub fn tile_at(&self, point: &Point2<f64>) -> TilePoint {
        // Fractional cube coordinates, then round to the nearest tile
        // https://www.redblobgames.com/grids/hexagons/#rounding
        let i = (2.0 / 3.0 * point.x) / self.tile_size;
        let j = (-point.x / 3.0 + SQRT_3 / 3.0 * point.y) / self.tile_size;
        let k = -i - j;

        let mut ri = i.round();
        let mut rj = j.round();
        let rk = k.round();
        let di = (ri - i).abs();
        let dj = (rj - j).abs();
        let dk = (rk - k).abs();
        // Rounding each component independently can break i+j+k=0, so
        // recompute whichever one was furthest off
        if di > dj && di > dk {
            ri = -rj - rk;
        } else if dj > dk {
            rj = -ri - rk;
        }
        TilePoint::new(ri as i32, rj as i32)
    }

    /// Get every tile whose hexagon touches the box (including tiles that
    /// only share an edge or vertex with it). Tiles are ordered by `i`, then
    /// by `j`.
    pub fn tiles_in_box(&self, bounds: &BoundingBox) -> TilePointSet {
        let column_width = 1.5 * self.tile_size;
        let row_height = SQRT_3 * self.tile_size;
        let side_radius = self.side_radius();

        // Start with a conservative range of candidates, then filter them
        // with an exact overlap test
        let i_min = ((bounds.x.min - self.tile_size) / column_width).floor();
        let i_max = ((bounds.x.max + self.tile_size) / column_width).ceil();

        let mut tiles = TilePointSet::default();
        for i in (i_min as i32)..=(i_max as i32) {
            let row_offset = i as f64 / 2.0;
            let j_min = (bounds.y.min - side_radius) / row_height - row_offset;
            let j_max = (bounds.y.max + side_radius) / row_height - row_offset;
            for j in (j_min.floor() as i32)..=(j_max.ceil() as i32) {
                let tile = TilePoint::new(i, j);
                if self.tile_overlaps_box(tile, bounds) {
                    tiles.insert(tile);
                }
            }
        }
        tiles
    }

    /// Separating axis test between a tile's hexagon and a box. Two convex
    /// shapes are disjoint iff there's some edge normal (from either shape)
    /// where their projections don't overlap.
    fn tile_overlaps_box(&self, tile: TilePoint, bounds: &BoundingBox) -> bool {
        let center = self.tile_center(tile);
        let side_radius = self.side_radius();

        // Box edge normals, which are also the hexagon's vertex-to-vertex
        // axis (x) and one of its edge normals (y)
        let x_range =
            NumRange::new(center.x - self.tile_size, center.x + self.tile_size);
        let y_range =
            NumRange::new(center.y - side_radius, center.y + side_radius);
        if !x_range.overlaps(&bounds.x) || !y_range.overlaps(&bounds.y) {
            return false;
        }

        // The remaining two hexagon edge normals, at 30° and 150°
        let corners = bounds.corners();
        [Vector2::new(SQRT_3 / 2.0, 0.5), Vector2::new(-SQRT_3 / 2.0, 0.5)]
            .iter()
            .all(|normal| {
                let offset = normal.dot(&center.coords);
                let hexagon =
                    NumRange::new(offset - side_radius, offset + side_radius);
                // Corners is never empty, so this always exists
                NumRange::enclosing(
                    corners.iter().map(|corner| normal.dot(&corner.coords)),
                )
                .map_or(false, |projected| hexagon.overlaps(&projected))
            })
    }
}
