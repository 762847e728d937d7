use nalgebra::{Point3, Vector3};

/// A half-line in 3D space. The direction does **not** need to be normalized,
/// which means the `t` values of any intersections are in units of the
/// direction's length, not necessarily millimeters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    pub origin: Point3<f64>,
    pub direction: Vector3<f64>,
}

impl Ray {
    pub fn new(origin: Point3<f64>, direction: Vector3<f64>) -> Self {
        Self { origin, direction }
    }

    /// Get the point at parameter `t` along the ray
    pub fn at(&self, t: f64) -> Point3<f64> {
        self.origin + self.direction * t
    }
}

/// A single hit between a [Ray] and a [Surface](super::Surface).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Intersection {
    /// Parameter along the ray. Negative values are behind the ray origin.
    pub t: f64,
    /// The hit location, in world space
    pub point: Point3<f64>,
}

impl Intersection {
    /// Build an intersection for the given ray parameter
    pub fn at(ray: &Ray, t: f64) -> Self {
        Self {
            t,
            point: ray.at(t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_ray_at() {
        let ray =
            Ray::new(Point3::new(1.0, 2.0, 3.0), Vector3::new(0.0, 0.0, 2.0));
        let point = ray.at(1.5);
        assert_approx_eq!(point.x, 1.0);
        assert_approx_eq!(point.y, 2.0);
        assert_approx_eq!(point.z, 6.0);

        // Negative parameters go backwards
        assert_approx_eq!(ray.at(-1.0).z, 1.0);
    }
}
