use crate::util::cmp_unwrap;
use nalgebra::{
    Isometry3, Matrix3, Point3, Rotation3, SymmetricEigen, Translation3, Unit,
    UnitQuaternion, Vector3,
};

/// Relative size (compared to the largest principal variance) below which
/// the second principal variance is considered zero, i.e. the points are
/// collinear and don't define a plane.
const COLLINEAR_TOLERANCE: f64 = 1e-12;

/// The result of fitting a plane to a point set. The plane's local frame has
/// its origin at the centroid of the points, the local X and Y axes in the
/// plane, and the local Z axis as the plane normal.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FittedPlane {
    /// Centroid of the fitted points, in world space
    pub center: Point3<f64>,
    /// Maps points in the plane's local frame into world space
    pub local_to_world: Isometry3<f64>,
    /// Inverse of `local_to_world`
    pub world_to_local: Isometry3<f64>,
}

impl FittedPlane {
    /// The plane normal (local Z axis), in world space
    pub fn normal(&self) -> Unit<Vector3<f64>> {
        Unit::new_normalize(
            self.local_to_world.transform_vector(&Vector3::z()),
        )
    }
}

/// Fit a least-squares plane to a set of 3D points.
///
/// The local frame comes from the principal axes of the points' covariance:
/// X is the direction of greatest spread, Y the second greatest, and Z
/// (the normal) the least. Principal axes have no inherent sign, so the frame
/// is oriented such that the normal has a non-negative dot product with
/// `desired_normal`. When the normal has to be flipped, Y is flipped with it
/// so the frame stays right-handed.
///
/// Panics if there are fewer than 3 points, or if the points are collinear.
pub fn fit_plane(
    points: &[Point3<f64>],
    desired_normal: &Vector3<f64>,
) -> FittedPlane {
    assert!(
        points.len() >= 3,
        "need at least 3 points to fit a plane, but got {}",
        points.len()
    );

    let center = Point3::from(
        points.iter().map(|p| p.coords).sum::<Vector3<f64>>()
            / points.len() as f64,
    );
    let covariance: Matrix3<f64> = points
        .iter()
        .map(|p| {
            let offset = p - center;
            offset * offset.transpose()
        })
        .sum();

    let eigen = SymmetricEigen::new(covariance);
    // Sort the axes by decreasing variance
    let mut order = [0, 1, 2];
    order.sort_by(|a, b| {
        cmp_unwrap(&eigen.eigenvalues[*b], &eigen.eigenvalues[*a])
    });
    let largest = eigen.eigenvalues[order[0]];
    let second = eigen.eigenvalues[order[1]];
    assert!(
        second > largest * COLLINEAR_TOLERANCE,
        "points are collinear, can't fit a plane: {:?}",
        points
    );

    let x_axis: Vector3<f64> =
        eigen.eigenvectors.column(order[0]).normalize();
    let mut y_axis: Vector3<f64> =
        eigen.eigenvectors.column(order[1]).normalize();
    // Eigenvectors of a symmetric matrix are already orthogonal, but clean
    // up any numerical drift
    y_axis = (y_axis - x_axis * x_axis.dot(&y_axis)).normalize();
    // Derive Z from the other two so the frame is right-handed by
    // construction, regardless of what sign the solver gave the third vector
    let mut z_axis = x_axis.cross(&y_axis);

    if z_axis.dot(desired_normal) < 0.0 {
        // Flip two axes, which keeps the determinant at +1
        z_axis = -z_axis;
        y_axis = -y_axis;
    }

    let rotation = Rotation3::from_matrix_unchecked(Matrix3::from_columns(&[
        x_axis, y_axis, z_axis,
    ]));
    let local_to_world = Isometry3::from_parts(
        Translation3::from(center.coords),
        UnitQuaternion::from_rotation_matrix(&rotation),
    );

    FittedPlane {
        center,
        local_to_world,
        world_to_local: local_to_world.inverse(),
    }
}
