use crate::{
    geometry::{Plane, ProjectionFailurePolicy},
    lattice::HexLattice,
    util::unit::{Degrees, Millimeter},
};
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Projection direction as `[x, y, z]`. Kept as a plain array so it reads
/// naturally in TOML/JSON config files.
pub type Direction = [f64; 3];

/// Configuration that defines a lenslet array. Two arrays generated with the
/// same config will always be identical.
///
/// All lengths are in millimeters and all angles in degrees. The optical axis
/// is world +Z: the eyebox is a plane perpendicular to it, and the display
/// sphere sits out along it.
// Field order matters here: TOML requires tables (`lattice`) to come after
// all plain values
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LensletConfig {
    /// Position of the eyebox plane along the optical axis
    pub eyebox_z: Millimeter,

    /// Distance along the optical axis from the eyebox to where the display
    /// sphere crosses the axis, ahead of the eyebox
    #[validate(custom = "validate_positive_length")]
    pub eye_relief: Millimeter,

    /// Radius of the spherical display surface. The sphere crosses the
    /// optical axis `eye_relief` ahead of the eyebox. With a radius smaller
    /// than the relief, the eyebox sits inside the sphere.
    #[validate(custom = "validate_positive_length")]
    pub sphere_radius: Millimeter,

    /// Focal length given to every generated lens
    #[validate(custom = "validate_positive_length")]
    pub focal_length: Millimeter,

    /// Full vertical field of view, as seen from the eyebox. Must be strictly
    /// between 0° and 180°.
    #[validate(custom = "validate_fov")]
    pub fov_theta: Degrees,

    /// Full horizontal field of view, as seen from the eyebox. Must be
    /// strictly between 0° and 180°.
    #[validate(custom = "validate_fov")]
    pub fov_phi: Degrees,

    /// Direction that tiles are projected from the eyebox onto the sphere.
    /// Doesn't need to be normalized, but can't be zero, and can't run
    /// parallel to the eyebox.
    #[validate(custom = "validate_direction")]
    pub direction: Direction,

    /// What to do with tiles whose hexagon only partially projects onto the
    /// sphere
    pub failure_policy: ProjectionFailurePolicy,

    /// Config for the lattice that tiles the eyebox
    #[validate]
    pub lattice: LatticeConfig,
}

/// Configuration for the hexagonal lattice laid over the eyebox.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LatticeConfig {
    /// Distance from the center of a tile to any of its vertices
    #[validate(custom = "validate_positive_length")]
    pub tile_size: Millimeter,
}

impl LensletConfig {
    /// Get the eyebox as a plane in world space
    pub fn eyebox_plane(&self) -> Plane {
        Plane::new(Point3::new(0.0, 0.0, self.eyebox_z.0), Vector3::z())
    }

    /// Get the projection direction as a vector
    pub fn direction_vector(&self) -> Vector3<f64> {
        Vector3::from(self.direction)
    }

    /// Build the lattice described by this config. Panics if the config
    /// hasn't been validated and the tile size is invalid.
    pub fn hex_lattice(&self) -> HexLattice {
        HexLattice::new(self.lattice.tile_size.0)
    }
}

impl Default for LensletConfig {
    fn default() -> Self {
        Self {
            eyebox_z: Millimeter(0.0),
            eye_relief: Millimeter(15.0),
            sphere_radius: Millimeter(10.0),
            focal_length: Millimeter(10.0),
            fov_theta: Degrees(100.0),
            fov_phi: Degrees(70.0),
            direction: [0.0, 0.0, 1.0],
            failure_policy: ProjectionFailurePolicy::default(),
            lattice: LatticeConfig::default(),
        }
    }
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            tile_size: Millimeter(1.0),
        }
    }
}

fn validate_positive_length(value: &Millimeter) -> Result<(), ValidationError> {
    if value.0.is_finite() && value.0 > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::new("positive_length"))
    }
}

fn validate_fov(value: &Degrees) -> Result<(), ValidationError> {
    if value.0 > 0.0 && value.0 < 180.0 {
        Ok(())
    } else {
        Err(ValidationError::new("fov_range"))
    }
}

fn validate_direction(value: &Direction) -> Result<(), ValidationError> {
    let direction = Vector3::from(*value);
    let norm = direction.norm();
    if !norm.is_finite() || norm == 0.0 {
        return Err(ValidationError::new("zero_direction"));
    }
    // Anything (nearly) perpendicular to the optical axis would never leave
    // the eyebox plane
    if direction.z.abs() / norm < 1e-6 {
        return Err(ValidationError::new("direction_parallel_to_eyebox"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(LensletConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_fields() {
        let config = LensletConfig {
            eye_relief: Millimeter(0.0),
            fov_phi: Degrees(180.0),
            direction: [1.0, 0.0, 0.0],
            ..Default::default()
        };
        let errors = config.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("eye_relief"));
        assert!(fields.contains_key("fov_phi"));
        assert!(fields.contains_key("direction"));
        assert!(!fields.contains_key("fov_theta"));
    }

    #[test]
    fn test_zero_direction() {
        let config = LensletConfig {
            direction: [0.0, 0.0, 0.0],
            ..Default::default()
        };
        let errors = config.validate().unwrap_err();
        assert_eq!(
            errors.field_errors()["direction"][0].code,
            "zero_direction"
        );
    }

    #[test]
    fn test_parallel_direction() {
        for direction in [[1.0, 0.0, 0.0], [0.0, -3.0, 0.0], [1.0, 1.0, 1e-9]] {
            let config = LensletConfig {
                direction,
                ..Default::default()
            };
            let errors = config.validate().unwrap_err();
            assert_eq!(
                errors.field_errors()["direction"][0].code,
                "direction_parallel_to_eyebox"
            );
        }

        // Steep but not parallel is fine
        let config = LensletConfig {
            direction: [1.0, 1.0, 0.1],
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nested_lattice() {
        let config = LensletConfig {
            lattice: LatticeConfig {
                tile_size: Millimeter(-1.0),
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_geometry_helpers() {
        let config = LensletConfig {
            eyebox_z: Millimeter(-2.0),
            direction: [0.0, 0.5, 2.0],
            ..Default::default()
        };
        let plane = config.eyebox_plane();
        assert_eq!(plane.point(), Point3::new(0.0, 0.0, -2.0));
        assert_eq!(plane.normal().into_inner(), Vector3::z());
        assert_eq!(config.direction_vector(), Vector3::new(0.0, 0.5, 2.0));
        assert_eq!(config.hex_lattice().tile_size(), 1.0);
    }
}
