use crate::geometry::fit::fit_plane;
use nalgebra::{Isometry3, Point2, Point3, Unit, Vector3};
use serde::{Deserialize, Serialize};

/// A flat convex polygon embedded in 3D space. The vertices are stored in 2D,
/// in the polygon's own local frame, and `local_to_world` maps that frame
/// (with local z = 0) into world space. Vertices wind counter-clockwise when
/// viewed from the side the [normal](Self::normal) faces.
///
/// Convexity is **not** checked, it's up to whoever builds the polygon to
/// pass in a sane vertex ring.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConvexPolygon {
    local_to_world: Isometry3<f64>,
    vertices: Vec<Point2<f64>>,
}

impl ConvexPolygon {
    /// Fewest vertices that still make a polygon
    pub const MIN_VERTICES: usize = 3;

    /// Create a polygon from local vertices and the transform that places it
    /// in the world. Panics if there are fewer than 3 vertices.
    pub fn new(
        local_to_world: Isometry3<f64>,
        vertices: Vec<Point2<f64>>,
    ) -> Self {
        assert!(
            vertices.len() >= Self::MIN_VERTICES,
            "polygon needs at least 3 vertices, but got {}",
            vertices.len()
        );
        Self {
            local_to_world,
            vertices,
        }
    }

    /// Vertices in the polygon's local 2D frame
    pub fn vertices(&self) -> &[Point2<f64>] {
        &self.vertices
    }

    pub fn local_to_world(&self) -> &Isometry3<f64> {
        &self.local_to_world
    }

    /// Map a point in the polygon's local frame into world space
    pub fn to_world(&self, point: &Point2<f64>) -> Point3<f64> {
        self.local_to_world
            .transform_point(&Point3::new(point.x, point.y, 0.0))
    }

    /// Vertices mapped into world space, in the same order as
    /// [Self::vertices]
    pub fn world_vertices(&self) -> Vec<Point3<f64>> {
        self.vertices.iter().map(|v| self.to_world(v)).collect()
    }

    /// The direction the polygon faces, in world space
    pub fn normal(&self) -> Unit<Vector3<f64>> {
        Unit::new_normalize(
            self.local_to_world.transform_vector(&Vector3::z()),
        )
    }

    /// Average of the vertices, in world space
    pub fn centroid(&self) -> Point3<f64> {
        let sum: Vector3<f64> =
            self.world_vertices().iter().map(|v| v.coords).sum();
        Point3::from(sum / self.vertices.len() as f64)
    }

    /// Area of the polygon. Always non-negative.
    pub fn area(&self) -> f64 {
        signed_area(&self.vertices).abs()
    }
}

/// Shoelace formula. Positive for counter-clockwise rings.
fn signed_area(vertices: &[Point2<f64>]) -> f64 {
    let n = vertices.len();
    (0..n)
        .map(|i| {
            let a = vertices[i];
            let b = vertices[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum::<f64>()
        / 2.0
}

/// Flatten a ring of (roughly coplanar) 3D vertices into a [ConvexPolygon].
/// The vertices get a best-fit plane (see [fit_plane]) whose normal points
/// towards `desired_normal`, then each vertex is dropped straight onto that
/// plane. Whatever distance a vertex had off the plane is discarded, so the
/// result is only a good approximation when the input is nearly flat.
///
/// If the ring winds clockwise about the fitted normal, it gets reversed so
/// the polygon is always counter-clockwise.
pub fn build_planar_polygon(
    vertices: &[Point3<f64>],
    desired_normal: &Vector3<f64>,
) -> ConvexPolygon {
    let plane = fit_plane(vertices, desired_normal);
    let mut local: Vec<Point2<f64>> = vertices
        .iter()
        .map(|v| plane.world_to_local.transform_point(v).xy())
        .collect();
    if signed_area(&local) < 0.0 {
        local.reverse();
    }
    ConvexPolygon::new(plane.local_to_world, local)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn hexagon(z: f64) -> Vec<Point3<f64>> {
        (0..6)
            .map(|i| {
                let angle = i as f64 * std::f64::consts::FRAC_PI_3;
                Point3::new(angle.cos(), angle.sin(), z)
            })
            .collect()
    }

    #[test]
    fn test_square_area() {
        let polygon = ConvexPolygon::new(
            Isometry3::translation(0.0, 0.0, 4.0),
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(2.0, 0.0),
                Point2::new(2.0, 2.0),
                Point2::new(0.0, 2.0),
            ],
        );
        assert_approx_eq!(polygon.area(), 4.0);
        assert_approx_eq!(polygon.normal().z, 1.0);
        let centroid = polygon.centroid();
        assert_approx_eq!(centroid.x, 1.0);
        assert_approx_eq!(centroid.y, 1.0);
        assert_approx_eq!(centroid.z, 4.0);
    }

    #[test]
    #[should_panic]
    fn test_too_few_vertices() {
        ConvexPolygon::new(
            Isometry3::identity(),
            vec![Point2::origin(), Point2::new(1.0, 0.0)],
        );
    }

    #[test]
    fn test_planar_round_trip() {
        // A polygon that's already flat and facing the desired way should
        // come back out exactly as it went in
        let input = hexagon(3.0);
        let polygon = build_planar_polygon(&input, &Vector3::z());
        assert_eq!(polygon.vertices().len(), 6);
        for (expected, actual) in input.iter().zip(polygon.world_vertices()) {
            assert_approx_eq!(expected.x, actual.x);
            assert_approx_eq!(expected.y, actual.y);
            assert_approx_eq!(expected.z, actual.z);
        }
        // Regular hexagon with unit circumradius
        assert_approx_eq!(polygon.area(), 1.5 * 3.0f64.sqrt());
    }

    #[test]
    fn test_planar_flipped_normal() {
        // Facing backwards means the ring winds clockwise in the fitted frame,
        // so it should get reversed
        let input = hexagon(3.0);
        let polygon = build_planar_polygon(&input, &-Vector3::z());
        assert_approx_eq!(polygon.normal().z, -1.0);
        assert!(signed_area(polygon.vertices()) > 0.0);

        let mut world = polygon.world_vertices();
        world.reverse();
        for (expected, actual) in input.iter().zip(world) {
            assert_approx_eq!(expected.x, actual.x);
            assert_approx_eq!(expected.y, actual.y);
            assert_approx_eq!(expected.z, actual.z);
        }
    }

    #[test]
    fn test_planar_drops_offsets() {
        let mut input = hexagon(0.0);
        input[0].z = 0.1;
        input[3].z = 0.1;
        let polygon = build_planar_polygon(&input, &Vector3::z());
        let world = polygon.world_vertices();
        // The two raised vertices get pulled down towards the plane, the rest
        // get pulled up. Everything should end up within the bump height.
        for (original, flattened) in input.iter().zip(world) {
            assert!((original.z - flattened.z).abs() < 0.1);
            assert_approx_eq!(original.x, flattened.x, 1e-2);
        }
    }
}
