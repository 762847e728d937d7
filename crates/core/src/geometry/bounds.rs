use crate::util::range::NumRange;
use derive_more::Display;
use nalgebra::Point2;

/// An axis-aligned 2D box. Both ranges are inclusive.
#[derive(Copy, Clone, Debug, Display, PartialEq)]
#[display(fmt = "x: {}, y: {}", x, y)]
pub struct BoundingBox {
    pub x: NumRange<f64>,
    pub y: NumRange<f64>,
}

impl BoundingBox {
    pub fn new(x: NumRange<f64>, y: NumRange<f64>) -> Self {
        Self { x, y }
    }

    /// Build the smallest box that contains every point. Returns `None` if
    /// there are no points.
    pub fn enclosing<'a>(
        points: impl IntoIterator<Item = &'a Point2<f64>>,
    ) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let init = Self::new(
            NumRange::new(first.x, first.x),
            NumRange::new(first.y, first.y),
        );
        Some(points.fold(init, |bounds, point| {
            Self::new(bounds.x.extend(point.x), bounds.y.extend(point.y))
        }))
    }

    pub fn contains(&self, point: &Point2<f64>) -> bool {
        self.x.contains(point.x) && self.y.contains(point.y)
    }

    /// The four corners, counter-clockwise starting from the min corner
    pub fn corners(&self) -> [Point2<f64>; 4] {
        [
            Point2::new(self.x.min, self.y.min),
            Point2::new(self.x.max, self.y.min),
            Point2::new(self.x.max, self.y.max),
            Point2::new(self.x.min, self.y.max),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enclosing() {
        let points = vec![
            Point2::new(1.0, -2.0),
            Point2::new(-3.0, 0.5),
            Point2::new(0.0, 4.0),
        ];
        let bounds = BoundingBox::enclosing(&points).unwrap();
        assert_eq!(bounds.x, NumRange::new(-3.0, 1.0));
        assert_eq!(bounds.y, NumRange::new(-2.0, 4.0));
        assert!(points.iter().all(|p| bounds.contains(p)));
        assert!(!bounds.contains(&Point2::new(1.1, 0.0)));

        assert_eq!(BoundingBox::enclosing(&Vec::new()), None);
    }

    #[test]
    fn test_corners() {
        let bounds =
            BoundingBox::new(NumRange::new(0.0, 2.0), NumRange::new(1.0, 3.0));
        let corners = bounds.corners();
        assert_eq!(corners[0], Point2::new(0.0, 1.0));
        assert_eq!(corners[2], Point2::new(2.0, 3.0));
        assert_eq!(bounds.to_string(), "x: [0, 2], y: [1, 3]");
    }
}
