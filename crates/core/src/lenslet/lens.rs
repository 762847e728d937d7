use crate::{geometry::ConvexPolygon, util::unit::Millimeter};
use nalgebra::{Point2, Point3, Unit, Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// An ideal thin lens. Geometrically it's flat (its aperture is a planar
/// polygon), but it refracts as a perfect lens with the given focal length.
///
/// The optical axis runs along the aperture's normal, through the aperture's
/// local origin shifted by `axis_offset` (in the aperture's local frame).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParaxialLens {
    focal_length: Millimeter,
    aperture: ConvexPolygon,
    axis_offset: Vector2<f64>,
}

impl ParaxialLens {
    pub fn new(
        focal_length: Millimeter,
        aperture: ConvexPolygon,
        axis_offset: Vector2<f64>,
    ) -> Self {
        Self {
            focal_length,
            aperture,
            axis_offset,
        }
    }

    pub fn focal_length(&self) -> Millimeter {
        self.focal_length
    }

    pub fn aperture(&self) -> &ConvexPolygon {
        &self.aperture
    }

    pub fn axis_offset(&self) -> Vector2<f64> {
        self.axis_offset
    }

    /// Where the optical axis crosses the aperture plane, in world space
    pub fn optical_center(&self) -> Point3<f64> {
        self.aperture
            .to_world(&(Point2::origin() + self.axis_offset))
    }

    /// Direction of the optical axis in world space. Same as the aperture
    /// normal.
    pub fn optical_axis(&self) -> Unit<Vector3<f64>> {
        self.aperture.normal()
    }

    /// The front focal point, one focal length out along the optical axis
    pub fn focal_point(&self) -> Point3<f64> {
        self.optical_center()
            + self.optical_axis().into_inner() * self.focal_length.0
    }

    /// Thin lens equation: distance from the lens at which an object
    /// `object_distance` away comes into focus. `None` when the object sits
    /// on the focal plane, since the image is then at infinity.
    pub fn image_distance(
        &self,
        object_distance: Millimeter,
    ) -> Option<Millimeter> {
        let f = self.focal_length.0;
        let o = object_distance.0;
        if (o - f).abs() < f64::EPSILON {
            None
        } else {
            Some(Millimeter(o * f / (o - f)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use nalgebra::Isometry3;

    fn lens(axis_offset: Vector2<f64>) -> ParaxialLens {
        let aperture = ConvexPolygon::new(
            Isometry3::translation(1.0, 2.0, 3.0),
            vec![
                Point2::new(-1.0, -1.0),
                Point2::new(1.0, -1.0),
                Point2::new(1.0, 1.0),
                Point2::new(-1.0, 1.0),
            ],
        );
        ParaxialLens::new(Millimeter(10.0), aperture, axis_offset)
    }

    #[test]
    fn test_optical_axis() {
        let lens = lens(Vector2::zeros());
        let center = lens.optical_center();
        assert_approx_eq!(center.x, 1.0);
        assert_approx_eq!(center.y, 2.0);
        assert_approx_eq!(center.z, 3.0);
        assert_approx_eq!(lens.optical_axis().z, 1.0);
        assert_approx_eq!(lens.focal_point().z, 13.0);
    }

    #[test]
    fn test_axis_offset() {
        let lens = lens(Vector2::new(0.5, -0.25));
        let center = lens.optical_center();
        assert_approx_eq!(center.x, 1.5);
        assert_approx_eq!(center.y, 1.75);
        assert_approx_eq!(center.z, 3.0);
    }

    #[test]
    fn test_image_distance() {
        let lens = lens(Vector2::zeros());
        let image = lens.image_distance(Millimeter(20.0)).unwrap();
        assert_approx_eq!(image.0, 20.0);
        // Inside the focal length gives a virtual image
        let image = lens.image_distance(Millimeter(5.0)).unwrap();
        assert_approx_eq!(image.0, -10.0);
        assert_eq!(lens.image_distance(Millimeter(10.0)), None);
    }
}
