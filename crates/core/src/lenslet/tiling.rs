//! The tiling pipeline: figure out which lattice tiles the field of view
//! covers on the eyebox, then carry each of those tiles over onto the display
//! sphere as a flat polygon.

use crate::{
    geometry::{
        build_planar_polygon, project, project_points_with_policy,
        BoundingBox, ConvexPolygon, Plane, ProjectionFailurePolicy, Sphere,
    },
    lattice::{HexLattice, TilePoint, TilePointSet},
    lenslet::{boundary::sample_fov_boundary, lens::ParaxialLens},
    util::unit::{Millimeter, Radians},
};
use anyhow::{anyhow, ensure};
use log::{debug, warn};
use nalgebra::{Point2, Point3, Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// How far the eyebox normal can stray from the optical axis (measured as
/// `1 - |cos|`) and still count as perpendicular to it
const PERPENDICULAR_TOLERANCE: f64 = 1e-9;

/// The optical axis of the system. The eyebox is perpendicular to this and
/// the display sphere sits out along it.
pub fn optical_axis() -> Vector3<f64> {
    Vector3::z()
}

/// Center of a display sphere of the given radius, placed such that the
/// sphere crosses the optical axis `eye_relief` ahead of the eyebox. If the
/// radius is smaller than the relief, the eyebox ends up inside the sphere.
pub fn sphere_center(
    eyebox: &Plane,
    eye_relief: Millimeter,
    sphere_radius: Millimeter,
) -> Point3<f64> {
    eyebox.point() + optical_axis() * (eye_relief - sphere_radius).0
}

/// Polygons generated by [generate_sphere_polygons]. `polygons` and `tiles`
/// always have the same length, and `polygons[n]` was generated from
/// `tiles[n]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpherePolygons {
    pub polygons: Vec<ConvexPolygon>,
    pub tiles: Vec<TilePoint>,
    /// Tiles that were in view, but whose hexagon didn't project onto the
    /// sphere. These are in the same relative order as they were enumerated.
    pub dropped: Vec<TilePoint>,
}

/// Lenses generated by [generate_sphere_lenslets]. Same layout as
/// [SpherePolygons], with `lenses[n]` belonging to `tiles[n]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SphereLenslets {
    pub lenses: Vec<ParaxialLens>,
    pub tiles: Vec<TilePoint>,
    pub dropped: Vec<TilePoint>,
}

/// Get the footprint of the field of view on the eyebox plane. The FOV
/// boundary is sampled on the display sphere, then each sample is projected
/// along `direction` onto the eyebox. The returned box is in world X/Y, and
/// only includes samples that actually hit the eyebox.
///
/// Returns an error if the eyebox isn't perpendicular to the optical axis,
/// or if not a single sample makes it onto the eyebox. The latter means the
/// direction can't possibly get from the sphere to the eyebox (e.g. it runs
/// parallel to the eyebox).
pub fn eyebox_bounds(
    eyebox: &Plane,
    eye_relief: Millimeter,
    direction: &Vector3<f64>,
    sphere_radius: Millimeter,
    fov_theta: Radians,
    fov_phi: Radians,
) -> anyhow::Result<BoundingBox> {
    ensure_perpendicular(eyebox)?;

    let center = sphere_center(eyebox, eye_relief, sphere_radius);
    let samples =
        sample_fov_boundary(eye_relief, sphere_radius, fov_theta, fov_phi);
    let sample_count = samples.len();

    let projected: Vec<Point2<f64>> = samples
        .into_iter()
        .filter_map(|sample| {
            project(center + sample.coords, direction, eyebox)
                .map(|point| point.xy())
        })
        .collect();
    debug!(
        "{} of {} boundary samples projected onto the eyebox",
        projected.len(),
        sample_count
    );

    BoundingBox::enclosing(&projected).ok_or_else(|| {
        anyhow!(
            "none of the {} boundary samples projected onto the eyebox \
            along {:?}",
            sample_count,
            direction
        )
    })
}

/// Get every lattice tile that touches the bounding box
pub fn tiles_in_box(
    bounds: &BoundingBox,
    lattice: &HexLattice,
) -> TilePointSet {
    lattice.tiles_in_box(bounds)
}

/// Generate one flat polygon per visible lattice tile, approximating that
/// tile's footprint on the display sphere.
///
/// The visible tiles are the ones touching the eyebox footprint of the FOV
/// (see [eyebox_bounds]). Each tile's hexagon is laid on the eyebox, then
/// projected along `direction` onto the sphere and flattened onto its
/// best-fit plane. Polygons face back towards the eyebox (their normal is
/// `-direction`).
///
/// Tiles whose hexagon doesn't make it onto the sphere are handled according
/// to `policy`. Rejected tiles are left out of the polygons and listed in
/// [SpherePolygons::dropped].
#[allow(clippy::too_many_arguments)]
pub fn generate_sphere_polygons(
    eyebox: &Plane,
    eye_relief: Millimeter,
    sphere_radius: Millimeter,
    direction: &Vector3<f64>,
    fov_theta: impl Into<Radians>,
    fov_phi: impl Into<Radians>,
    lattice: &HexLattice,
    policy: ProjectionFailurePolicy,
) -> anyhow::Result<SpherePolygons> {
    let fov_theta = fov_theta.into();
    let fov_phi = fov_phi.into();
    let sphere = Sphere::new(
        sphere_center(eyebox, eye_relief, sphere_radius),
        sphere_radius.0,
    );

    // Bounds go from the sphere to the eyebox, so they use the opposite
    // direction from the tiles
    let bounds = eyebox_bounds(
        eyebox,
        eye_relief,
        &-direction,
        sphere_radius,
        fov_theta,
        fov_phi,
    )?;
    let candidates = tiles_in_box(&bounds, lattice);
    debug!("{} tiles touch eyebox bounds {}", candidates.len(), bounds);

    let eyebox_z = eyebox.point().z;
    let facing = -direction;
    let mut polygons = Vec::with_capacity(candidates.len());
    let mut tiles = Vec::with_capacity(candidates.len());
    let mut dropped = Vec::new();
    for tile in candidates {
        let hexagon: Vec<Point3<f64>> = lattice
            .tile_vertices(tile)
            .iter()
            .map(|vertex| Point3::new(vertex.x, vertex.y, eyebox_z))
            .collect();
        match project_points_with_policy(&hexagon, direction, &sphere, policy)
        {
            Some(projected) => {
                polygons.push(build_planar_polygon(&projected, &facing));
                tiles.push(tile);
            }
            None => dropped.push(tile),
        }
    }

    if !dropped.is_empty() {
        warn!(
            "{} of {} tiles did not project onto the sphere and were \
            dropped (policy: {})",
            dropped.len(),
            dropped.len() + tiles.len(),
            policy
        );
    }
    debug!("Generated {} sphere polygons", polygons.len());

    Ok(SpherePolygons {
        polygons,
        tiles,
        dropped,
    })
}

/// Generate one [ParaxialLens] per visible lattice tile. The lens apertures
/// are exactly the polygons from [generate_sphere_polygons], in the same
/// order, and every lens has its optical axis through the aperture origin
/// (zero offset).
#[allow(clippy::too_many_arguments)]
pub fn generate_sphere_lenslets(
    eyebox: &Plane,
    eye_relief: Millimeter,
    focal_length: Millimeter,
    direction: &Vector3<f64>,
    sphere_radius: Millimeter,
    fov_theta: impl Into<Radians>,
    fov_phi: impl Into<Radians>,
    lattice: &HexLattice,
    policy: ProjectionFailurePolicy,
) -> anyhow::Result<SphereLenslets> {
    let SpherePolygons {
        polygons,
        tiles,
        dropped,
    } = generate_sphere_polygons(
        eyebox,
        eye_relief,
        sphere_radius,
        direction,
        fov_theta,
        fov_phi,
        lattice,
        policy,
    )?;

    let lenses = polygons
        .into_iter()
        .map(|aperture| {
            ParaxialLens::new(focal_length, aperture, Vector2::zeros())
        })
        .collect();

    Ok(SphereLenslets {
        lenses,
        tiles,
        dropped,
    })
}

fn ensure_perpendicular(eyebox: &Plane) -> anyhow::Result<()> {
    let alignment = eyebox.normal().dot(&optical_axis()).abs();
    ensure!(
        1.0 - alignment < PERPENDICULAR_TOLERANCE,
        "eyebox normal {:?} must be parallel to the optical axis {:?}",
        eyebox.normal().into_inner(),
        optical_axis()
    );
    Ok(())
}
