pub mod boundary;
pub mod lens;
pub mod tiling;

use crate::{
    lattice::TilePoint,
    lenslet::{lens::ParaxialLens, tiling::SphereLenslets},
    timed, LensletConfig,
};
use anyhow::Context;
use log::info;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A fully generated lenslet array. Contains one [ParaxialLens] per visible
/// lattice tile, as well as the configuration that was used to generate it.
///
/// ## Serialization
/// Arrays can be serialized to and from JSON (with the `json` feature). All
/// fields and values use snake casing. Lenses and their tile coordinates are
/// stored as parallel arrays rather than a keyed object, because tile
/// coordinates can't be JSON keys.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LensletArray {
    /// The config used to generate this array. Generation is deterministic
    /// based on config, and once the array has been generated, the config can
    /// never change.
    config: LensletConfig,

    /// Generated lenses, in lattice enumeration order
    lenses: Vec<ParaxialLens>,

    /// Tile that each lens was generated from. `tiles[n]` goes with
    /// `lenses[n]`.
    tiles: Vec<TilePoint>,

    /// Tiles that were in view but couldn't be projected onto the sphere
    dropped: Vec<TilePoint>,
}

impl LensletArray {
    /// Generate a new lenslet array with the given config. Returns an error if
    /// the config is invalid, or if the geometry it describes is unusable
    /// (e.g. the field of view never makes it back to the eyebox).
    pub fn generate(config: LensletConfig) -> anyhow::Result<Self> {
        info!("Generating lenslet array with config {:#?}", config);

        config.validate().context("invalid config")?;

        let SphereLenslets {
            lenses,
            tiles,
            dropped,
        } = timed!(
            "Lenslet generation",
            log::Level::Info,
            tiling::generate_sphere_lenslets(
                &config.eyebox_plane(),
                config.eye_relief,
                config.focal_length,
                &config.direction_vector(),
                config.sphere_radius,
                config.fov_theta,
                config.fov_phi,
                &config.hex_lattice(),
                config.failure_policy,
            )
        )
        .context("error generating lenslets")?;

        Ok(Self {
            config,
            lenses,
            tiles,
            dropped,
        })
    }

    /// Get a reference to the config that defines this array.
    pub fn config(&self) -> &LensletConfig {
        &self.config
    }

    pub fn lenses(&self) -> &[ParaxialLens] {
        &self.lenses
    }

    pub fn tiles(&self) -> &[TilePoint] {
        &self.tiles
    }

    /// Tiles that touched the field of view, but whose hexagon didn't project
    /// onto the sphere, so they have no lens
    pub fn dropped_tiles(&self) -> &[TilePoint] {
        &self.dropped
    }

    /// Iterate over each lens along with the tile it was generated from
    pub fn iter(&self) -> impl Iterator<Item = (TilePoint, &ParaxialLens)> {
        self.tiles.iter().copied().zip(self.lenses.iter())
    }

    /// Find the lens generated for a particular tile, if there is one
    pub fn lens_at(&self, tile: TilePoint) -> Option<&ParaxialLens> {
        self.tiles
            .iter()
            .position(|t| *t == tile)
            .and_then(|index| self.lenses.get(index))
    }

    /// Deserialize an array from JSON. An array can be serialized into JSON
    /// with [LensletArray::to_json]. Will fail if the input is malformed, or
    /// if it describes an array that generation could never have produced.
    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let array: Self = serde_json::from_str(json)
            .context("error deserializing lenslet array")?;
        array.check().context("invalid lenslet array")?;
        Ok(array)
    }

    /// Check the invariants that [LensletArray::generate] guarantees, for
    /// arrays that came from somewhere else
    #[cfg(feature = "json")]
    fn check(&self) -> anyhow::Result<()> {
        self.config.validate().context("invalid config")?;
        anyhow::ensure!(
            self.lenses.len() == self.tiles.len(),
            "array has {} lenses but {} tiles",
            self.lenses.len(),
            self.tiles.len()
        );
        for (tile, lens) in self.iter() {
            let vertex_count = lens.aperture().vertices().len();
            anyhow::ensure!(
                vertex_count >= crate::geometry::ConvexPolygon::MIN_VERTICES,
                "aperture for tile {} has only {} vertices",
                tile,
                vertex_count
            );
        }
        Ok(())
    }

    /// Serializes this array into JSON. This is a recoverable format, which
    /// can be loaded back into a [LensletArray] with [LensletArray::from_json].
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> String {
        // Panic here indicates an internal bug in the data format
        serde_json::to_string(self).expect("error serializing lenslet array")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{util::unit::Millimeter, LatticeConfig};

    #[test]
    fn test_generate_default() {
        let array = LensletArray::generate(LensletConfig::default()).unwrap();
        assert!(!array.lenses().is_empty());
        assert_eq!(array.lenses().len(), array.tiles().len());
        assert_eq!(array.iter().count(), array.lenses().len());
        for tile in array.dropped_tiles() {
            assert!(array.lens_at(*tile).is_none());
        }
        let (tile, lens) = array.iter().next().unwrap();
        assert_eq!(array.lens_at(tile), Some(lens));
    }

    #[test]
    fn test_generate_invalid_config() {
        let config = LensletConfig {
            lattice: LatticeConfig {
                tile_size: Millimeter(0.0),
            },
            ..Default::default()
        };
        let error = LensletArray::generate(config).unwrap_err();
        assert_eq!(error.to_string(), "invalid config");
    }

    #[test]
    fn test_deterministic() {
        let config = LensletConfig {
            sphere_radius: Millimeter(25.0),
            ..Default::default()
        };
        let first = LensletArray::generate(config).unwrap();
        let second = LensletArray::generate(config).unwrap();
        assert_eq!(first, second);
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_json_round_trip() {
        let array = LensletArray::generate(LensletConfig::default()).unwrap();
        let json = array.to_json();
        let loaded = LensletArray::from_json(&json).unwrap();
        assert_eq!(loaded.tiles(), array.tiles());
        assert_eq!(loaded.config(), array.config());
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_json_rejects_mismatched_lenses() {
        let array = LensletArray::generate(LensletConfig::default()).unwrap();
        let mut value: serde_json::Value =
            serde_json::from_str(&array.to_json()).unwrap();
        value["lenses"].as_array_mut().unwrap().truncate(1);

        let error = LensletArray::from_json(&value.to_string()).unwrap_err();
        assert_eq!(error.to_string(), "invalid lenslet array");
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_json_rejects_degenerate_aperture() {
        let array = LensletArray::generate(LensletConfig::default()).unwrap();
        let mut value: serde_json::Value =
            serde_json::from_str(&array.to_json()).unwrap();
        value["lenses"][0]["aperture"]["vertices"]
            .as_array_mut()
            .unwrap()
            .truncate(2);

        assert!(LensletArray::from_json(&value.to_string()).is_err());
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_json_rejects_invalid_config() {
        let array = LensletArray::generate(LensletConfig::default()).unwrap();
        let mut value: serde_json::Value =
            serde_json::from_str(&array.to_json()).unwrap();
        value["config"]["sphere_radius"] = serde_json::json!(-1.0);

        assert!(LensletArray::from_json(&value.to_string()).is_err());
    }
}
