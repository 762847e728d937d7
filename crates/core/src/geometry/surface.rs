use crate::{
    geometry::ray::{Intersection, Ray},
    util::cmp_unwrap,
};
use nalgebra::{Point3, Unit, Vector3};
use std::fmt::Debug;

/// Anything below this is considered zero when checking whether a ray runs
/// parallel to a plane, or whether a vector has any length at all.
const EPSILON: f64 = 1e-12;

/// A surface that rays can be intersected with.
pub trait Surface: Debug {
    /// Find every point where the ray crosses this surface. The output is
    /// ordered by increasing `t`, and **includes** hits behind the ray origin
    /// (negative `t`). It's up to the caller to decide which hits matter. An
    /// empty list means the ray misses entirely.
    fn intersect(&self, ray: &Ray) -> Vec<Intersection>;
}

/// A full sphere, defined by its center and radius.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sphere {
    center: Point3<f64>,
    radius: f64,
}

impl Sphere {
    /// Create a new sphere. Panics if the radius isn't positive.
    pub fn new(center: Point3<f64>, radius: f64) -> Self {
        assert!(
            radius > 0.0,
            "sphere radius must be positive, but was {}",
            radius
        );
        Self { center, radius }
    }

    pub fn center(&self) -> Point3<f64> {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Surface for Sphere {
    fn intersect(&self, ray: &Ray) -> Vec<Intersection> {
        // Solve |o + td - c|² = r² for t, which is a quadratic
        let oc = ray.origin - self.center;
        let a = ray.direction.norm_squared();
        if a < EPSILON {
            return Vec::new();
        }
        let half_b = oc.dot(&ray.direction);
        let c = oc.norm_squared() - self.radius * self.radius;
        let discriminant = half_b * half_b - a * c;

        if discriminant < 0.0 {
            Vec::new()
        } else if discriminant == 0.0 {
            // Tangent, just one hit
            vec![Intersection::at(ray, -half_b / a)]
        } else {
            let root = discriminant.sqrt();
            vec![
                Intersection::at(ray, (-half_b - root) / a),
                Intersection::at(ray, (-half_b + root) / a),
            ]
        }
    }
}

/// An infinite plane, defined by any point on the plane and the plane normal.
/// The normal is always unit-length.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Plane {
    point: Point3<f64>,
    normal: Unit<Vector3<f64>>,
}

impl Plane {
    /// Create a new plane. The normal will be normalized, so it can have any
    /// non-zero length. Panics if the normal is zero.
    pub fn new(point: Point3<f64>, normal: Vector3<f64>) -> Self {
        let normal = Unit::try_new(normal, EPSILON).unwrap_or_else(|| {
            panic!("plane normal must be non-zero, but was {:?}", normal)
        });
        Self { point, normal }
    }

    /// A point on the plane. This is the exact point the plane was created
    /// with, so it can double as the "origin" of the plane.
    pub fn point(&self) -> Point3<f64> {
        self.point
    }

    pub fn normal(&self) -> Unit<Vector3<f64>> {
        self.normal
    }

    /// Find the ray parameter where it crosses this plane, if it does
    fn intersect_t(&self, ray: &Ray) -> Option<f64> {
        let denominator = self.normal.dot(&ray.direction);
        if denominator.abs() < EPSILON {
            // Ray runs parallel to the plane
            None
        } else {
            Some(self.normal.dot(&(self.point - ray.origin)) / denominator)
        }
    }
}

impl Surface for Plane {
    fn intersect(&self, ray: &Ray) -> Vec<Intersection> {
        self.intersect_t(ray)
            .map(|t| Intersection::at(ray, t))
            .into_iter()
            .collect()
    }
}

/// A bounded rectangular section of a plane. The rectangle is centered on
/// the plane's point, and its sides run along `u_axis` and `normal × u_axis`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rectangle {
    plane: Plane,
    u_axis: Unit<Vector3<f64>>,
    v_axis: Unit<Vector3<f64>>,
    half_width: f64,
    half_height: f64,
}

impl Rectangle {
    /// Create a new rectangle. `u_axis` gets projected into the plane, so it
    /// only needs to be roughly perpendicular to the normal. Panics if the
    /// axis is parallel to the normal or either half extent is negative.
    pub fn new(
        center: Point3<f64>,
        normal: Vector3<f64>,
        u_axis: Vector3<f64>,
        half_width: f64,
        half_height: f64,
    ) -> Self {
        assert!(
            half_width >= 0.0 && half_height >= 0.0,
            "rectangle extents must be non-negative, but were {} x {}",
            half_width,
            half_height
        );
        let plane = Plane::new(center, normal);
        let in_plane =
            u_axis - plane.normal.into_inner() * plane.normal.dot(&u_axis);
        let u_axis = Unit::try_new(in_plane, EPSILON).unwrap_or_else(|| {
            panic!(
                "rectangle axis {:?} must not be parallel to normal {:?}",
                u_axis, normal
            )
        });
        let v_axis =
            Unit::new_normalize(plane.normal.cross(&u_axis.into_inner()));
        Self {
            plane,
            u_axis,
            v_axis,
            half_width,
            half_height,
        }
    }

    /// Is the given point (assumed to be on the rectangle's plane) within
    /// the rectangle's bounds?
    fn contains(&self, point: &Point3<f64>) -> bool {
        let offset = point - self.plane.point;
        self.u_axis.dot(&offset).abs() <= self.half_width
            && self.v_axis.dot(&offset).abs() <= self.half_height
    }
}

impl Surface for Rectangle {
    fn intersect(&self, ray: &Ray) -> Vec<Intersection> {
        let mut hits: Vec<Intersection> = self
            .plane
            .intersect(ray)
            .into_iter()
            .filter(|hit| self.contains(&hit.point))
            .collect();
        hits.sort_by(|a, b| cmp_unwrap(&a.t, &b.t));
        hits
    }
}
