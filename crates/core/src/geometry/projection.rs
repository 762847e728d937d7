use crate::{
    geometry::{ray::Ray, surface::Surface},
    util::cmp_unwrap,
};
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// What to do with a point set when some of its points fail to project onto
/// a surface.
#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    PartialEq,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ProjectionFailurePolicy {
    /// If any single point fails, the whole set fails. This is the default,
    /// because a polygon missing vertices is a different polygon.
    RejectAll,
    /// Drop the points that fail and keep the rest, as long as at least
    /// three survive (anything less can't be a polygon).
    DropFailed,
}

impl ProjectionFailurePolicy {
    /// Minimum number of points that must survive [Self::DropFailed]
    pub const MIN_SURVIVING_POINTS: usize = 3;
}

impl Default for ProjectionFailurePolicy {
    fn default() -> Self {
        Self::RejectAll
    }
}

/// Project a point along a direction onto a surface. Returns the nearest hit
/// that's in front of the point (`t >= 0`), or `None` if the ray never hits
/// the surface going forward.
pub fn project<S: Surface + ?Sized>(
    point: Point3<f64>,
    direction: &Vector3<f64>,
    surface: &S,
) -> Option<Point3<f64>> {
    let ray = Ray::new(point, *direction);
    surface
        .intersect(&ray)
        .into_iter()
        .filter(|hit| hit.t >= 0.0)
        .min_by(|a, b| cmp_unwrap(&a.t, &b.t))
        .map(|hit| hit.point)
}

/// Project every point along the same direction onto a surface. This is all
/// or nothing: if any point fails to project, the whole thing is `None`.
pub fn project_points<S: Surface + ?Sized>(
    points: &[Point3<f64>],
    direction: &Vector3<f64>,
    surface: &S,
) -> Option<Vec<Point3<f64>>> {
    points
        .iter()
        .map(|point| project(*point, direction, surface))
        .collect()
}

/// Project every point along the same direction onto a surface, using the
/// given policy to decide what happens when some of them miss. Order of the
/// surviving points is always preserved.
pub fn project_points_with_policy<S: Surface + ?Sized>(
    points: &[Point3<f64>],
    direction: &Vector3<f64>,
    surface: &S,
    policy: ProjectionFailurePolicy,
) -> Option<Vec<Point3<f64>>> {
    match policy {
        ProjectionFailurePolicy::RejectAll => {
            project_points(points, direction, surface)
        }
        ProjectionFailurePolicy::DropFailed => {
            let projected: Vec<_> = points
                .iter()
                .filter_map(|point| project(*point, direction, surface))
                .collect();
            if projected.len() >= ProjectionFailurePolicy::MIN_SURVIVING_POINTS
            {
                Some(projected)
            } else {
                None
            }
        }
    }
}
