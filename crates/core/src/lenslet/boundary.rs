//! Sampling of the field-of-view footprint on the display sphere. The FOV is
//! a rectangle in angular (θ, ϕ) space, which becomes a curved patch on the
//! sphere. We walk the patch's edges at a fixed angular step to get a point
//! cloud that bounds it.

use crate::util::unit::{Millimeter, Radians};
use nalgebra::Point3;

/// Angular distance between neighboring boundary samples. This is an upper
/// bound, the actual step is shrunk slightly so that samples land exactly on
/// both ends of each edge.
pub const BOUNDARY_SAMPLE_STEP: Radians = Radians(0.01);

/// Map angular coordinates to a point on a sphere of the given radius,
/// centered on the origin. θ is elevation (rotation towards +y) and ϕ is
/// azimuth (rotation from +z towards +x), so `(0, 0)` is straight down the
/// optical axis.
pub fn sample_sphere_point(
    radius: Millimeter,
    theta: Radians,
    phi: Radians,
) -> Point3<f64> {
    Point3::new(
        theta.cos() * phi.sin(),
        theta.sin(),
        theta.cos() * phi.cos(),
    ) * radius.0
}

/// Sample the boundary of the angular rectangle `[theta_min, theta_max] x
/// [phi_min, phi_max]` on a sphere. Every edge is sampled from end to end, so
/// all four corners are included (corners show up once per adjacent edge).
///
/// Panics if either angular extent is zero.
pub fn sample_angular_boundary(
    radius: Millimeter,
    theta_min: Radians,
    theta_max: Radians,
    phi_min: Radians,
    phi_max: Radians,
) -> Vec<Point3<f64>> {
    assert!(
        theta_min != theta_max,
        "theta extent must be non-zero, but both ends were {}",
        theta_min
    );
    assert!(
        phi_min != phi_max,
        "phi extent must be non-zero, but both ends were {}",
        phi_min
    );

    let thetas = subdivide(theta_min, theta_max);
    let phis = subdivide(phi_min, phi_max);

    let mut points = Vec::with_capacity(2 * (thetas.len() + phis.len()));
    for &phi in &[phi_min, phi_max] {
        points.extend(
            thetas
                .iter()
                .map(|&theta| sample_sphere_point(radius, theta, phi)),
        );
    }
    for &theta in &[theta_min, theta_max] {
        points.extend(
            phis.iter()
                .map(|&phi| sample_sphere_point(radius, theta, phi)),
        );
    }
    points
}

/// Sample the boundary of a symmetric field of view. The FOV angles are full
/// angles as seen from the eye, which sits `eye_relief` away from the sphere
/// surface along the optical axis. Those get converted to the half angles
/// they subtend about the sphere's own center, then handed off to
/// [sample_angular_boundary].
pub fn sample_fov_boundary(
    eye_relief: Millimeter,
    radius: Millimeter,
    fov_theta: Radians,
    fov_phi: Radians,
) -> Vec<Point3<f64>> {
    let half_theta = subtended_half_angle(eye_relief, radius, fov_theta);
    let half_phi = subtended_half_angle(eye_relief, radius, fov_phi);
    sample_angular_boundary(
        radius,
        -half_theta,
        half_theta,
        -half_phi,
        half_phi,
    )
}

/// Half of `fov` spans `relief * tan(fov / 2)` across at the eye relief
/// distance. This is the angle that same span subtends from the center of a
/// sphere with the given radius.
fn subtended_half_angle(
    eye_relief: Millimeter,
    radius: Millimeter,
    fov: Radians,
) -> Radians {
    let half_width = eye_relief.0 * (fov / 2.0).tan();
    Radians((half_width / radius.0).atan())
}

/// Split `[start, end]` into equal steps no bigger than
/// [BOUNDARY_SAMPLE_STEP]. Both ends are included.
fn subdivide(start: Radians, end: Radians) -> Vec<Radians> {
    let extent = end - start;
    let steps = (extent.0.abs() / BOUNDARY_SAMPLE_STEP.0).ceil().max(1.0);
    let count = steps as usize;
    (0..=count)
        .map(|n| {
            if n == count {
                // Avoid any rounding drift on the last sample
                end
            } else {
                start + extent * (n as f64 / steps)
            }
        })
        .collect()
}
