//! Geometric building blocks for the tiling pipeline: rays, the surfaces they
//! can hit, projection of points onto those surfaces, best-fit planes, and
//! the planar convex polygons that come out the other end.
//!
//! All points and vectors are [nalgebra] types in `f64`. Linear units are
//! millimeters throughout, but since every value here is a raw coordinate we
//! don't bother wrapping them in [Millimeter](crate::Millimeter).

mod bounds;
mod fit;
mod polygon;
mod projection;
mod ray;
mod surface;

pub use self::{
    bounds::BoundingBox,
    fit::{fit_plane, FittedPlane},
    polygon::{build_planar_polygon, ConvexPolygon},
    projection::{
        project, project_points, project_points_with_policy,
        ProjectionFailurePolicy,
    },
    ray::{Intersection, Ray},
    surface::{Plane, Rectangle, Sphere, Surface},
};
