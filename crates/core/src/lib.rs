//! Lenslet is a hexagonal lenslet tiling system for near-eye displays. Given
//! an eyebox, a spherical display surface, a field of view, and a hexagonal
//! lattice, it figures out which lattice tiles are visible, carries each of
//! them over onto the display sphere, and attaches an ideal (paraxial) lens
//! to every resulting flat polygon.
//!
//! ```
//! use lenslet::{LensletArray, LensletConfig};
//!
//! let config = LensletConfig::default();
//! let array = LensletArray::generate(config).unwrap();
//! println!("{} lenses", array.lenses().len());
//! // From here you can export/use the lenses however you like.
//! ```
//!
//! See [LensletConfig] for details on how generation can be customized. The
//! individual pipeline stages are also exposed, see [geometry], [lattice],
//! and [lenslet].

mod config;
pub mod geometry;
pub mod lattice;
pub mod lenslet;
pub mod render;
mod util;

pub use crate::{
    config::{Direction, LatticeConfig, LensletConfig},
    lattice::{HexLattice, TilePoint},
    lenslet::{lens::ParaxialLens, LensletArray},
    render::{
        config::{AperturePaint, RenderConfig},
        LensletRenderer,
    },
    util::{
        range::NumRange,
        unit::{Degrees, Millimeter, Radians, RADIANS_PER_DEGREE},
    },
};
